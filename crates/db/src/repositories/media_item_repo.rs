//! Repository for the `media_items` table.

use brandpanel_core::types::DbId;
use sqlx::MySqlPool;

use super::inserted_id;
use crate::models::media::{CreateMediaItem, MediaItem, UpdateMediaItem};

const COLUMNS: &str = "id, brand_id, file_name, url, mime_type, kind, size_bytes, alt_text, \
                        folder, storage_key, uploaded_by, created_at, updated_at";

/// Provides CRUD operations for media library entries. File bytes are
/// handled by the caller; this repository only stores metadata.
pub struct MediaItemRepo;

impl MediaItemRepo {
    pub async fn create(pool: &MySqlPool, input: &CreateMediaItem) -> Result<MediaItem, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO media_items
                (brand_id, file_name, url, mime_type, kind, size_bytes, alt_text, folder,
                 storage_key, uploaded_by)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(input.brand_id)
        .bind(&input.file_name)
        .bind(&input.url)
        .bind(&input.mime_type)
        .bind(&input.kind)
        .bind(input.size_bytes)
        .bind(&input.alt_text)
        .bind(&input.folder)
        .bind(&input.storage_key)
        .bind(input.uploaded_by)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, inserted_id(&result))
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_items WHERE id = ?");
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a brand's media, newest first, optionally narrowed by kind and folder.
    pub async fn list_by_brand(
        pool: &MySqlPool,
        brand_id: DbId,
        kind: Option<&str>,
        folder: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_items
             WHERE brand_id = ?
               AND (? IS NULL OR kind = ?)
               AND (? IS NULL OR folder = ?)
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(brand_id)
            .bind(kind)
            .bind(kind)
            .bind(folder)
            .bind(folder)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateMediaItem,
    ) -> Result<Option<MediaItem>, sqlx::Error> {
        sqlx::query(
            "UPDATE media_items SET
                file_name = COALESCE(?, file_name),
                alt_text = COALESCE(?, alt_text),
                folder = COALESCE(?, folder)
             WHERE id = ?",
        )
        .bind(&input.file_name)
        .bind(&input.alt_text)
        .bind(&input.folder)
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_items WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
