//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` or `super_admin` role.
//! - [`rbac::RequireSuperAdmin`] -- Requires the `super_admin` role.

pub mod auth;
pub mod rbac;
