//! Repository for the `charging_stations` table.

use brandpanel_core::types::DbId;
use sqlx::MySqlPool;

use super::inserted_id;
use crate::models::charging::{ChargingStation, CreateChargingStation, UpdateChargingStation};

const COLUMNS: &str = "id, brand_id, name, address, city, latitude, longitude, \
                        operating_hours, is_active, created_at, updated_at";

/// Provides CRUD operations for the brand-managed station directory.
pub struct ChargingStationRepo;

impl ChargingStationRepo {
    pub async fn create(
        pool: &MySqlPool,
        input: &CreateChargingStation,
    ) -> Result<ChargingStation, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO charging_stations
                (brand_id, name, address, city, latitude, longitude, operating_hours, is_active)
             VALUES (?, ?, ?, ?, ?, ?, ?, COALESCE(?, TRUE))",
        )
        .bind(input.brand_id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.operating_hours)
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
    ) -> Result<Option<ChargingStation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM charging_stations WHERE id = ?");
        sqlx::query_as::<_, ChargingStation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a brand's stations by name, optionally narrowed by city and active flag.
    pub async fn list_by_brand(
        pool: &MySqlPool,
        brand_id: DbId,
        city: Option<&str>,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChargingStation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM charging_stations
             WHERE brand_id = ?
               AND (? IS NULL OR city = ?)
               AND (? IS NULL OR is_active = ?)
             ORDER BY name ASC, id ASC
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, ChargingStation>(&query)
            .bind(brand_id)
            .bind(city)
            .bind(city)
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
        input: &UpdateChargingStation,
    ) -> Result<Option<ChargingStation>, sqlx::Error> {
        sqlx::query(
            "UPDATE charging_stations SET
                name = COALESCE(?, name),
                address = COALESCE(?, address),
                city = COALESCE(?, city),
                latitude = COALESCE(?, latitude),
                longitude = COALESCE(?, longitude),
                operating_hours = COALESCE(?, operating_hours),
                is_active = COALESCE(?, is_active)
             WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.operating_hours)
        .bind(input.is_active)
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    /// Delete a station and its chargers. Returns `true` if a row was removed.
    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM charging_stations WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
