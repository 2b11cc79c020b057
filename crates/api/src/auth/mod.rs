//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation, opaque refresh tokens.

pub mod jwt;
pub mod password;
