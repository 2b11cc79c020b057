//! Charging station and charger models and DTOs.

use brandpanel_core::charging::{ChargerStatus, ConnectorType};
use brandpanel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `charging_stations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChargingStation {
    pub id: DbId,
    pub brand_id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub operating_hours: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChargingStation {
    pub brand_id: DbId,
    #[validate(length(min = 1, max = 160))]
    pub name: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 120))]
    pub city: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[validate(length(max = 120))]
    pub operating_hours: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateChargingStation {
    #[validate(length(min = 1, max = 160))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 120))]
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(length(max = 120))]
    pub operating_hours: Option<String>,
    pub is_active: Option<bool>,
}

/// A row from the `chargers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Charger {
    pub id: DbId,
    pub station_id: DbId,
    pub connector_type: String,
    pub power_kw: f64,
    pub status: String,
    pub price_per_kwh: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a charger. The station comes from the request path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharger {
    pub connector_type: ConnectorType,
    pub power_kw: f64,
    pub status: Option<ChargerStatus>,
    pub price_per_kwh: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCharger {
    pub connector_type: Option<ConnectorType>,
    pub power_kw: Option<f64>,
    pub status: Option<ChargerStatus>,
    pub price_per_kwh: Option<f64>,
}
