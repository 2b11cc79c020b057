//! Repository for the `announcements` table.

use brandpanel_core::types::{DbId, Timestamp};
use sqlx::MySqlPool;

use super::inserted_id;
use crate::models::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, brand_id, title, summary, body, image_url, link_url, is_published, \
                        is_pinned, starts_at, ends_at, sort_order, created_at, updated_at";

/// Provides CRUD operations for announcements.
pub struct AnnouncementRepo;

impl AnnouncementRepo {
    pub async fn create(
        pool: &MySqlPool,
        input: &CreateAnnouncement,
    ) -> Result<Announcement, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO announcements
                (brand_id, title, summary, body, image_url, link_url, is_published,
                 is_pinned, starts_at, ends_at, sort_order)
             VALUES (?, ?, ?, ?, ?, ?, COALESCE(?, FALSE), COALESCE(?, FALSE), ?, ?,
                     COALESCE(?, 0))",
        )
        .bind(input.brand_id)
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.body)
        .bind(&input.image_url)
        .bind(&input.link_url)
        .bind(input.is_published)
        .bind(input.is_pinned)
        .bind(input.starts_at.is_some())
        .bind(input.starts_at.flatten())
        .bind(input.ends_at.is_some())
        .bind(input.ends_at.flatten())
        .bind(input.sort_order)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, inserted_id(&result))
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(
        pool: &MySqlPool,
        id: DbId,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM announcements WHERE id = ?");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a brand's announcements: pinned first, then by `sort_order`,
    /// then newest first.
    ///
    /// With `live_at` set, only published announcements whose window
    /// contains that instant are returned.
    pub async fn list_by_brand(
        pool: &MySqlPool,
        brand_id: DbId,
        live_at: Option<Timestamp>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements
             WHERE brand_id = ?
               AND (? IS NULL OR (
                    is_published = TRUE
                    AND (starts_at IS NULL OR starts_at <= ?)
                    AND (ends_at IS NULL OR ends_at > ?)))
             ORDER BY is_pinned DESC, sort_order ASC, created_at DESC, id DESC
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(brand_id)
            .bind(live_at)
            .bind(live_at)
            .bind(live_at)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update an announcement. Only non-`None` fields in `input` are applied;
    /// `Some(None)` clears a window bound.
    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateAnnouncement,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        sqlx::query(
            "UPDATE announcements SET
                title = COALESCE(?, title),
                summary = COALESCE(?, summary),
                body = COALESCE(?, body),
                image_url = COALESCE(?, image_url),
                link_url = COALESCE(?, link_url),
                is_published = COALESCE(?, is_published),
                is_pinned = COALESCE(?, is_pinned),
                starts_at = CASE WHEN ? THEN ? ELSE starts_at END,
                ends_at = CASE WHEN ? THEN ? ELSE ends_at END,
                sort_order = COALESCE(?, sort_order)
             WHERE id = ?",
        )
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.body)
        .bind(&input.image_url)
        .bind(&input.link_url)
        .bind(input.is_published)
        .bind(input.is_pinned)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .bind(input.sort_order)
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
