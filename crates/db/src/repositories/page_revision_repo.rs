//! Repository for the `page_revisions` table.

use brandpanel_core::types::DbId;
use sqlx::{MySqlConnection, MySqlPool};

use crate::models::page::{PageRevision, PageRevisionSummary, StaticPage};

const COLUMNS: &str = "id, page_id, revision, title, content, meta_title, meta_description, \
                        meta_keywords, edited_by, created_at";

/// Read access to stored page revisions. Writes happen only through
/// [`StaticPageRepo`](super::StaticPageRepo).
pub struct PageRevisionRepo;

impl PageRevisionRepo {
    /// List a page's revisions, newest first, without content bodies.
    pub async fn list_by_page(
        pool: &MySqlPool,
        page_id: DbId,
    ) -> Result<Vec<PageRevisionSummary>, sqlx::Error> {
        sqlx::query_as::<_, PageRevisionSummary>(
            "SELECT id, revision, title, edited_by, created_at
             FROM page_revisions
             WHERE page_id = ?
             ORDER BY revision DESC",
        )
        .bind(page_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find(
        pool: &MySqlPool,
        page_id: DbId,
        revision: i32,
    ) -> Result<Option<PageRevision>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM page_revisions WHERE page_id = ? AND revision = ?");
        sqlx::query_as::<_, PageRevision>(&query)
            .bind(page_id)
            .bind(revision)
            .fetch_optional(pool)
            .await
    }

    pub(crate) async fn find_in(
        conn: &mut MySqlConnection,
        page_id: DbId,
        revision: i32,
    ) -> Result<Option<PageRevision>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM page_revisions WHERE page_id = ? AND revision = ?");
        sqlx::query_as::<_, PageRevision>(&query)
            .bind(page_id)
            .bind(revision)
            .fetch_optional(conn)
            .await
    }

    /// Store `page`'s current versioned fields under its current revision
    /// number, credited to whoever last wrote that state.
    pub(crate) async fn insert_snapshot(
        conn: &mut MySqlConnection,
        page: &StaticPage,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO page_revisions
                (page_id, revision, title, content, meta_title, meta_description,
                 meta_keywords, edited_by)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(page.id)
        .bind(page.revision)
        .bind(&page.title)
        .bind(&page.content)
        .bind(&page.meta_title)
        .bind(&page.meta_description)
        .bind(&page.meta_keywords)
        .bind(page.updated_by)
        .execute(conn)
        .await?;
        Ok(())
    }
}
