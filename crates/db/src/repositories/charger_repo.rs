//! Repository for the `chargers` table.

use brandpanel_core::types::DbId;
use sqlx::MySqlPool;

use super::inserted_id;
use crate::models::charging::{Charger, CreateCharger, UpdateCharger};

const COLUMNS: &str =
    "id, station_id, connector_type, power_kw, status, price_per_kwh, created_at, updated_at";

/// Provides CRUD operations for chargers. Every charger belongs to one station.
pub struct ChargerRepo;

impl ChargerRepo {
    pub async fn create(
        pool: &MySqlPool,
        station_id: DbId,
        input: &CreateCharger,
    ) -> Result<Charger, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO chargers (station_id, connector_type, power_kw, status, price_per_kwh)
             VALUES (?, ?, ?, COALESCE(?, 'available'), ?)",
        )
        .bind(station_id)
        .bind(input.connector_type.as_str())
        .bind(input.power_kw)
        .bind(input.status.map(|s| s.as_str()))
        .bind(input.price_per_kwh)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, inserted_id(&result))
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<Charger>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chargers WHERE id = ?");
        sqlx::query_as::<_, Charger>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_station(
        pool: &MySqlPool,
        station_id: DbId,
    ) -> Result<Vec<Charger>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chargers WHERE station_id = ? ORDER BY id ASC");
        sqlx::query_as::<_, Charger>(&query)
            .bind(station_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateCharger,
    ) -> Result<Option<Charger>, sqlx::Error> {
        sqlx::query(
            "UPDATE chargers SET
                connector_type = COALESCE(?, connector_type),
                power_kw = COALESCE(?, power_kw),
                status = COALESCE(?, status),
                price_per_kwh = COALESCE(?, price_per_kwh)
             WHERE id = ?",
        )
        .bind(input.connector_type.map(|c| c.as_str()))
        .bind(input.power_kw)
        .bind(input.status.map(|s| s.as_str()))
        .bind(input.price_per_kwh)
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chargers WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
