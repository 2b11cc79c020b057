//! Repository for the `partnerships` table.

use brandpanel_core::types::DbId;
use sqlx::MySqlPool;

use super::inserted_id;
use crate::models::partnership::{CreatePartnership, Partnership, UpdatePartnership};

const COLUMNS: &str = "id, brand_id, name, description, logo_url, website_url, category, \
                        sort_order, is_active, created_at, updated_at";

pub struct PartnershipRepo;

impl PartnershipRepo {
    pub async fn create(
        pool: &MySqlPool,
        input: &CreatePartnership,
    ) -> Result<Partnership, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO partnerships
                (brand_id, name, description, logo_url, website_url, category, sort_order,
                 is_active)
             VALUES (?, ?, ?, ?, ?, ?, COALESCE(?, 0), COALESCE(?, TRUE))",
        )
        .bind(input.brand_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.logo_url)
        .bind(&input.website_url)
        .bind(&input.category)
        .bind(input.sort_order)
        .bind(input.is_active)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, inserted_id(&result))
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(
        pool: &MySqlPool,
        id: DbId,
    ) -> Result<Option<Partnership>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partnerships WHERE id = ?");
        sqlx::query_as::<_, Partnership>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a brand's partnerships by `sort_order`, then name. Optional
    /// filters narrow by category and active flag.
    pub async fn list_by_brand(
        pool: &MySqlPool,
        brand_id: DbId,
        category: Option<&str>,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Partnership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM partnerships
             WHERE brand_id = ?
               AND (? IS NULL OR category = ?)
               AND (? IS NULL OR is_active = ?)
             ORDER BY sort_order ASC, name ASC, id ASC
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, Partnership>(&query)
            .bind(brand_id)
            .bind(category)
            .bind(category)
            .bind(is_active)
            .bind(is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdatePartnership,
    ) -> Result<Option<Partnership>, sqlx::Error> {
        sqlx::query(
            "UPDATE partnerships SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                logo_url = COALESCE(?, logo_url),
                website_url = COALESCE(?, website_url),
                category = COALESCE(?, category),
                sort_order = COALESCE(?, sort_order),
                is_active = COALESCE(?, is_active)
             WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.logo_url)
        .bind(&input.website_url)
        .bind(&input.category)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM partnerships WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
