//! Shared query parameter types for API handlers.
//!
//! Every content list is scoped to one brand, so the brand-scoped query
//! structs live next to their handlers and carry a required `brand_id`.

use brandpanel_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// `(limit, offset)` clamped to the allowed range.
    pub fn resolve(&self) -> (i64, i64) {
        resolve_page(self.limit, self.offset)
    }
}

/// Clamp raw `limit`/`offset` query values. Limit defaults to 50, max 200.
pub fn resolve_page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
        clamp_offset(offset),
    )
}

/// Query parameters for endpoints that can include unchanged entries in a diff.
#[derive(Debug, Deserialize)]
pub struct DiffParams {
    #[serde(default)]
    pub include_unchanged: bool,
}
