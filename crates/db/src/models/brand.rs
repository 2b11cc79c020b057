//! Brand entity model and DTOs.

use brandpanel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A brand row from the `brands` table.
///
/// `station_count` is denormalized and written only by the station-count poller.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub domain: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub station_count: i32,
    pub station_count_updated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a brand. The slug defaults to one generated from the name.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBrand {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub slug: Option<String>,
    #[validate(length(max = 255))]
    pub domain: Option<String>,
    #[validate(url, length(max = 1024))]
    pub logo_url: Option<String>,
    pub is_active: Option<bool>,
}

/// DTO for updating a brand. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBrand {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 255))]
    pub domain: Option<String>,
    #[validate(url, length(max = 1024))]
    pub logo_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Outcome of one station-counter write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationCountUpdate {
    /// Slugs whose brand row was overwritten.
    pub updated: Vec<String>,
    /// Mapped slugs with no brand row.
    pub missing: Vec<String>,
}
