//! Repository for the `static_pages` table.
//!
//! Edits to versioned fields snapshot the previous state into
//! `page_revisions` in the same transaction, so `revision` on the page and
//! the highest stored snapshot never drift apart.

use brandpanel_core::types::DbId;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::{MySqlConnection, MySqlPool};

use super::inserted_id;
use super::page_revision_repo::PageRevisionRepo;
use crate::models::page::{CreateStaticPage, StaticPage, UpdateStaticPage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, brand_id, slug, title, content, meta_title, meta_description, \
                        meta_keywords, is_published, published_at, revision, created_by, \
                        updated_by, created_at, updated_at";

/// Provides CRUD and revision-aware updates for static pages.
pub struct StaticPageRepo;

impl StaticPageRepo {
    /// Insert a new page at revision 1 with an already-resolved slug.
    pub async fn create(
        pool: &MySqlPool,
        input: &CreateStaticPage,
        slug: &str,
        created_by: Option<DbId>,
    ) -> Result<StaticPage, sqlx::Error> {
        let is_published = input.is_published.unwrap_or(false);
        let published_at = is_published.then(Utc::now);

        let result = sqlx::query(
            "INSERT INTO static_pages
                (brand_id, slug, title, content, meta_title, meta_description, meta_keywords,
                 is_published, published_at, created_by, updated_by)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(input.brand_id)
        .bind(slug)
        .bind(&input.title)
        .bind(Json(&input.content))
        .bind(&input.meta_title)
        .bind(&input.meta_description)
        .bind(&input.meta_keywords)
        .bind(is_published)
        .bind(published_at)
        .bind(created_by)
        .bind(created_by)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, inserted_id(&result))
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<StaticPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM static_pages WHERE id = ?");
        sqlx::query_as::<_, StaticPage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_brand_and_slug(
        pool: &MySqlPool,
        brand_id: DbId,
        slug: &str,
    ) -> Result<Option<StaticPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM static_pages WHERE brand_id = ? AND slug = ?");
        sqlx::query_as::<_, StaticPage>(&query)
            .bind(brand_id)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List a brand's pages, most recently updated first.
    pub async fn list_by_brand(
        pool: &MySqlPool,
        brand_id: DbId,
        published: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StaticPage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM static_pages
             WHERE brand_id = ? AND (? IS NULL OR is_published = ?)
             ORDER BY updated_at DESC, id DESC
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, StaticPage>(&query)
            .bind(brand_id)
            .bind(published)
            .bind(published)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update.
    ///
    /// When a versioned field (title, content, meta fields) changes, the
    /// current state is stored as a revision and `revision` is incremented.
    /// Publishing a draft stamps `published_at`; unpublishing clears it.
    /// Returns `None` if the page does not exist.
    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateStaticPage,
        slug: Option<&str>,
        edited_by: Option<DbId>,
    ) -> Result<Option<StaticPage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::lock(&mut *tx, id).await? else {
            return Ok(None);
        };

        let revision = if input.changes_versioned_fields(&current) {
            PageRevisionRepo::insert_snapshot(&mut *tx, &current).await?;
            current.revision + 1
        } else {
            current.revision
        };

        let is_published = input.is_published.unwrap_or(current.is_published);
        let published_at = match (current.is_published, is_published) {
            (false, true) => Some(Utc::now()),
            (_, false) => None,
            (true, true) => current.published_at,
        };

        sqlx::query(
            "UPDATE static_pages SET
                slug = ?, title = ?, content = ?, meta_title = ?, meta_description = ?,
                meta_keywords = ?, is_published = ?, published_at = ?, revision = ?,
                updated_by = ?
             WHERE id = ?",
        )
        .bind(slug.unwrap_or(&current.slug))
        .bind(input.title.as_ref().unwrap_or(&current.title))
        .bind(Json(input.content.as_ref().unwrap_or(&current.content.0)))
        .bind(input.meta_title.as_ref().or(current.meta_title.as_ref()))
        .bind(input.meta_description.as_ref().or(current.meta_description.as_ref()))
        .bind(input.meta_keywords.as_ref().or(current.meta_keywords.as_ref()))
        .bind(is_published)
        .bind(published_at)
        .bind(revision)
        .bind(edited_by.or(current.updated_by))
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let updated = Self::lock(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Replace the versioned fields with those stored in `revision`.
    ///
    /// The current state is snapshotted first, so a restore is itself
    /// undoable. Returns `None` if the page or the revision does not exist.
    pub async fn restore_revision(
        pool: &MySqlPool,
        id: DbId,
        revision: i32,
        edited_by: Option<DbId>,
    ) -> Result<Option<StaticPage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::lock(&mut *tx, id).await? else {
            return Ok(None);
        };
        let Some(target) = PageRevisionRepo::find_in(&mut *tx, id, revision).await? else {
            return Ok(None);
        };

        PageRevisionRepo::insert_snapshot(&mut *tx, &current).await?;

        sqlx::query(
            "UPDATE static_pages SET
                title = ?, content = ?, meta_title = ?, meta_description = ?,
                meta_keywords = ?, revision = ?, updated_by = ?
             WHERE id = ?",
        )
        .bind(&target.title)
        .bind(&target.content)
        .bind(&target.meta_title)
        .bind(&target.meta_description)
        .bind(&target.meta_keywords)
        .bind(current.revision + 1)
        .bind(edited_by.or(current.updated_by))
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let restored = Self::lock(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(restored)
    }

    /// Delete a page and its revisions. Returns `true` if a row was removed.
    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM static_pages WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read a page row, locking it until the surrounding transaction ends.
    async fn lock(
        conn: &mut MySqlConnection,
        id: DbId,
    ) -> Result<Option<StaticPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM static_pages WHERE id = ? FOR UPDATE");
        sqlx::query_as::<_, StaticPage>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
