//! Request handlers, one submodule per resource.
//!
//! Handlers validate request DTOs, check brand-scoped access through
//! [`crate::middleware::auth::AuthUser`], delegate to the repositories in
//! `brandpanel_db`, and map errors via [`crate::error::AppError`].

pub mod announcements;
pub mod auth;
pub mod brands;
pub mod chargers;
pub mod media;
pub mod pages;
pub mod partnerships;
pub mod stations;
pub mod users;
