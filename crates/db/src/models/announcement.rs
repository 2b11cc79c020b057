//! Announcement entity model and DTOs.

use brandpanel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `announcements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: DbId,
    pub brand_id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub is_published: bool,
    pub is_pinned: bool,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnnouncement {
    pub brand_id: DbId,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 500))]
    pub summary: Option<String>,
    #[validate(length(min = 1, max = 65535))]
    pub body: String,
    #[validate(url, length(max = 1024))]
    pub image_url: Option<String>,
    #[validate(url, length(max = 1024))]
    pub link_url: Option<String>,
    pub is_published: Option<bool>,
    pub is_pinned: Option<bool>,
    #[serde(default, deserialize_with = "super::deserialize_present")]
    pub starts_at: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "super::deserialize_present")]
    pub ends_at: Option<Option<Timestamp>>,
    pub sort_order: Option<i32>,
}

impl UpdateAnnouncement {
    /// The publication window after applying this update to `current`.
    pub fn merged_window(
        &self,
        current: &Announcement,
    ) -> (Option<Timestamp>, Option<Timestamp>) {
        (
            self.starts_at.unwrap_or(current.starts_at),
            self.ends_at.unwrap_or(current.ends_at),
        )
    }
}

/// DTO for updating an announcement. All fields are optional.
///
/// `starts_at` and `ends_at` accept `null` to clear a bound.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAnnouncement {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 500))]
    pub summary: Option<String>,
    #[validate(length(min = 1, max = 65535))]
    pub body: Option<String>,
    #[validate(url, length(max = 1024))]
    pub image_url: Option<String>,
    #[validate(url, length(max = 1024))]
    pub link_url: Option<String>,
    pub is_published: Option<bool>,
    pub is_pinned: Option<bool>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub sort_order: Option<i32>,
}
