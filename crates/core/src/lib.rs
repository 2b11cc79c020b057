//! Domain types and pure logic for the brand panel backend.
//!
//! Nothing in this crate performs I/O; the database and HTTP layers build
//! on top of it.

pub mod announcements;
pub mod charging;
pub mod diff;
pub mod error;
pub mod media;
pub mod page_content;
pub mod pagination;
pub mod permissions;
pub mod roles;
pub mod slug;
pub mod stations;
pub mod types;
