//! Handlers for the `/stations` resource (brand-managed charging stations).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use brandpanel_core::charging::validate_coordinates;
use brandpanel_core::error::CoreError;
use brandpanel_core::permissions::{Action, Resource};
use brandpanel_core::types::DbId;
use brandpanel_db::models::charging::{
    ChargingStation, CreateChargingStation, UpdateChargingStation,
};
use brandpanel_db::repositories::ChargingStationRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::resolve_page;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /stations`.
#[derive(Debug, Deserialize)]
pub struct StationListParams {
    pub brand_id: DbId,
    pub city: Option<String>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/stations?brand_id=&city=&is_active=&limit=&offset=
pub async fn list_stations(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<StationListParams>,
) -> AppResult<Json<DataResponse<Vec<ChargingStation>>>> {
    auth_user.require(params.brand_id, Resource::Stations, Action::Read)?;
    let (limit, offset) = resolve_page(params.limit, params.offset);

    let stations = ChargingStationRepo::list_by_brand(
        &state.pool,
        params.brand_id,
        params.city.as_deref(),
        params.is_active,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: stations }))
}

/// GET /api/v1/stations/{id}
pub async fn get_station(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ChargingStation>>> {
    let station = find_station(&state, id).await?;
    auth_user.require(station.brand_id, Resource::Stations, Action::Read)?;
    Ok(Json(DataResponse { data: station }))
}

/// POST /api/v1/stations
pub async fn create_station(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateChargingStation>,
) -> AppResult<(StatusCode, Json<DataResponse<ChargingStation>>)> {
    input.validate()?;
    auth_user.require(input.brand_id, Resource::Stations, Action::Write)?;
    validate_coordinates(input.latitude, input.longitude)?;

    let station = ChargingStationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: station })))
}

/// PUT /api/v1/stations/{id}
pub async fn update_station(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChargingStation>,
) -> AppResult<Json<DataResponse<ChargingStation>>> {
    input.validate()?;
    let existing = find_station(&state, id).await?;
    auth_user.require(existing.brand_id, Resource::Stations, Action::Write)?;
    validate_coordinates(
        input.latitude.unwrap_or(existing.latitude),
        input.longitude.unwrap_or(existing.longitude),
    )?;

    let station = ChargingStationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ChargingStation",
            id,
        }))?;
    Ok(Json(DataResponse { data: station }))
}

/// DELETE /api/v1/stations/{id}
///
/// Chargers of the station are removed with it. Returns 204 No Content.
pub async fn delete_station(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let station = find_station(&state, id).await?;
    auth_user.require(station.brand_id, Resource::Stations, Action::Write)?;

    if ChargingStationRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ChargingStation",
            id,
        }))
    }
}

pub(crate) async fn find_station(state: &AppState, id: DbId) -> AppResult<ChargingStation> {
    ChargingStationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ChargingStation",
            id,
        }))
}
