//! Repository for the `brands` table.

use std::collections::BTreeMap;

use brandpanel_core::types::DbId;
use sqlx::{Connection, MySql, MySqlPool, QueryBuilder};

use super::inserted_id;
use crate::models::brand::{Brand, CreateBrand, StationCountUpdate, UpdateBrand};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, domain, logo_url, is_active, station_count, \
                        station_count_updated_at, created_at, updated_at";

/// Provides CRUD operations for brands plus the station-counter write.
pub struct BrandRepo;

impl BrandRepo {
    /// Insert a new brand with an already-resolved slug.
    pub async fn create(
        pool: &MySqlPool,
        input: &CreateBrand,
        slug: &str,
    ) -> Result<Brand, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO brands (name, slug, domain, logo_url, is_active)
             VALUES (?, ?, ?, ?, COALESCE(?, TRUE))",
        )
        .bind(&input.name)
        .bind(slug)
        .bind(&input.domain)
        .bind(&input.logo_url)
        .bind(input.is_active)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, inserted_id(&result))
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE id = ?");
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &MySqlPool, slug: &str) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE slug = ?");
        sqlx::query_as::<_, Brand>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List brands ordered by name.
    ///
    /// `visible` restricts the result to the given ids; `None` lists every
    /// brand and an empty slice lists none.
    pub async fn list(
        pool: &MySqlPool,
        visible: Option<&[DbId]>,
    ) -> Result<Vec<Brand>, sqlx::Error> {
        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM brands"));

        if let Some(ids) = visible {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            builder.push(" WHERE id IN (");
            let mut separated = builder.separated(", ");
            for id in ids {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");
        }
        builder.push(" ORDER BY name ASC, id ASC");

        builder.build_query_as::<Brand>().fetch_all(pool).await
    }

    /// Update a brand. `slug` is the already-validated replacement, if any.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateBrand,
        slug: Option<&str>,
    ) -> Result<Option<Brand>, sqlx::Error> {
        sqlx::query(
            "UPDATE brands SET
                name = COALESCE(?, name),
                slug = COALESCE(?, slug),
                domain = COALESCE(?, domain),
                logo_url = COALESCE(?, logo_url),
                is_active = COALESCE(?, is_active)
             WHERE id = ?",
        )
        .bind(&input.name)
        .bind(slug)
        .bind(&input.domain)
        .bind(&input.logo_url)
        .bind(input.is_active)
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    /// Delete a brand and, through cascading keys, all of its content.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brands WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite `station_count` for every slug in `counts` inside one
    /// serializable transaction.
    ///
    /// Slugs without a brand row are reported in
    /// [`StationCountUpdate::missing`] and otherwise skipped. Either every
    /// existing brand is updated or none is.
    pub async fn overwrite_station_counts(
        pool: &MySqlPool,
        counts: &BTreeMap<String, i64>,
    ) -> Result<StationCountUpdate, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        // Applies to the next transaction started on this connection only.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *conn)
            .await?;
        let mut tx = conn.begin().await?;

        let mut outcome = StationCountUpdate::default();
        for (slug, count) in counts {
            let id: Option<DbId> =
                sqlx::query_scalar("SELECT id FROM brands WHERE slug = ? FOR UPDATE")
                    .bind(slug)
                    .fetch_optional(&mut *tx)
                    .await?;

            let Some(id) = id else {
                outcome.missing.push(slug.clone());
                continue;
            };

            sqlx::query(
                "UPDATE brands
                 SET station_count = ?, station_count_updated_at = UTC_TIMESTAMP(6)
                 WHERE id = ?",
            )
            .bind(*count)
            .bind(id)
            .execute(&mut *tx)
            .await?;
            outcome.updated.push(slug.clone());
        }

        tx.commit().await?;
        Ok(outcome)
    }
}
