//! Handlers for chargers, nested under `/stations/{station_id}/chargers`.
//!
//! Access follows the parent station's brand.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use brandpanel_core::charging::{validate_power_kw, validate_price_per_kwh};
use brandpanel_core::error::CoreError;
use brandpanel_core::permissions::{Action, Resource};
use brandpanel_core::types::DbId;
use brandpanel_db::models::charging::{Charger, CreateCharger, UpdateCharger};
use brandpanel_db::repositories::ChargerRepo;

use super::stations::find_station;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stations/{station_id}/chargers
pub async fn list_chargers(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(station_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Charger>>>> {
    let station = find_station(&state, station_id).await?;
    auth_user.require(station.brand_id, Resource::Stations, Action::Read)?;

    let chargers = ChargerRepo::list_by_station(&state.pool, station_id).await?;
    Ok(Json(DataResponse { data: chargers }))
}

/// POST /api/v1/stations/{station_id}/chargers
pub async fn create_charger(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(station_id): Path<DbId>,
    Json(input): Json<CreateCharger>,
) -> AppResult<(StatusCode, Json<DataResponse<Charger>>)> {
    validate_power_kw(input.power_kw)?;
    validate_price_per_kwh(input.price_per_kwh)?;

    let station = find_station(&state, station_id).await?;
    auth_user.require(station.brand_id, Resource::Stations, Action::Write)?;

    let charger = ChargerRepo::create(&state.pool, station_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: charger })))
}

/// GET /api/v1/stations/{station_id}/chargers/{id}
pub async fn get_charger(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((station_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Charger>>> {
    let station = find_station(&state, station_id).await?;
    auth_user.require(station.brand_id, Resource::Stations, Action::Read)?;

    let charger = find_charger(&state, station_id, id).await?;
    Ok(Json(DataResponse { data: charger }))
}

/// PUT /api/v1/stations/{station_id}/chargers/{id}
pub async fn update_charger(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((station_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCharger>,
) -> AppResult<Json<DataResponse<Charger>>> {
    if let Some(power_kw) = input.power_kw {
        validate_power_kw(power_kw)?;
    }
    validate_price_per_kwh(input.price_per_kwh)?;

    let station = find_station(&state, station_id).await?;
    auth_user.require(station.brand_id, Resource::Stations, Action::Write)?;
    find_charger(&state, station_id, id).await?;

    let charger = ChargerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Charger",
            id,
        }))?;
    Ok(Json(DataResponse { data: charger }))
}

/// DELETE /api/v1/stations/{station_id}/chargers/{id}
pub async fn delete_charger(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((station_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let station = find_station(&state, station_id).await?;
    auth_user.require(station.brand_id, Resource::Stations, Action::Write)?;
    find_charger(&state, station_id, id).await?;

    if ChargerRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Charger",
            id,
        }))
    }
}

/// A charger that exists but belongs to another station is reported as missing.
async fn find_charger(state: &AppState, station_id: DbId, id: DbId) -> AppResult<Charger> {
    ChargerRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|c| c.station_id == station_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Charger",
            id,
        }))
}
