//! Partnership entity model and DTOs.

use brandpanel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `partnerships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Partnership {
    pub id: DbId,
    pub brand_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePartnership {
    pub brand_id: DbId,
    #[validate(length(min = 1, max = 160))]
    pub name: String,
    #[validate(length(max = 65535))]
    pub description: Option<String>,
    #[validate(url, length(max = 1024))]
    pub logo_url: Option<String>,
    #[validate(url, length(max = 1024))]
    pub website_url: Option<String>,
    #[validate(length(min = 1, max = 80))]
    pub category: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePartnership {
    #[validate(length(min = 1, max = 160))]
    pub name: Option<String>,
    #[validate(length(max = 65535))]
    pub description: Option<String>,
    #[validate(url, length(max = 1024))]
    pub logo_url: Option<String>,
    #[validate(url, length(max = 1024))]
    pub website_url: Option<String>,
    #[validate(length(min = 1, max = 80))]
    pub category: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
