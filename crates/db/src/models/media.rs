//! Media library item model and DTOs.

use brandpanel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `media_items` table.
///
/// `storage_key` is set only for files stored by this server; items
/// registered by external URL leave it empty.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaItem {
    pub id: DbId,
    pub brand_id: DbId,
    pub file_name: String,
    pub url: String,
    pub mime_type: String,
    pub kind: String,
    pub size_bytes: Option<i64>,
    pub alt_text: Option<String>,
    pub folder: Option<String>,
    #[serde(skip_serializing)]
    pub storage_key: Option<String>,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for registering an externally hosted file.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterMediaItem {
    pub brand_id: DbId,
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(url, length(max = 1024))]
    pub url: String,
    #[validate(length(min = 1, max = 100))]
    pub mime_type: String,
    #[validate(range(min = 0))]
    pub size_bytes: Option<i64>,
    #[validate(length(max = 500))]
    pub alt_text: Option<String>,
    #[validate(length(min = 1, max = 160))]
    pub folder: Option<String>,
}

/// Fully resolved insert for a media row.
#[derive(Debug, Clone)]
pub struct CreateMediaItem {
    pub brand_id: DbId,
    pub file_name: String,
    pub url: String,
    pub mime_type: String,
    pub kind: String,
    pub size_bytes: Option<i64>,
    pub alt_text: Option<String>,
    pub folder: Option<String>,
    pub storage_key: Option<String>,
    pub uploaded_by: Option<DbId>,
}

/// Only descriptive fields are editable; the file itself is immutable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMediaItem {
    #[validate(length(min = 1, max = 255))]
    pub file_name: Option<String>,
    #[validate(length(max = 500))]
    pub alt_text: Option<String>,
    #[validate(length(min = 1, max = 160))]
    pub folder: Option<String>,
}
