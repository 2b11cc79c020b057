//! Handlers for the `/partnerships` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use brandpanel_core::error::CoreError;
use brandpanel_core::permissions::{Action, Resource};
use brandpanel_core::types::DbId;
use brandpanel_db::models::partnership::{CreatePartnership, Partnership, UpdatePartnership};
use brandpanel_db::repositories::PartnershipRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::resolve_page;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /partnerships`.
#[derive(Debug, Deserialize)]
pub struct PartnershipListParams {
    pub brand_id: DbId,
    pub category: Option<String>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/partnerships?brand_id=&category=&is_active=&limit=&offset=
pub async fn list_partnerships(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PartnershipListParams>,
) -> AppResult<Json<DataResponse<Vec<Partnership>>>> {
    auth_user.require(params.brand_id, Resource::Partnerships, Action::Read)?;
    let (limit, offset) = resolve_page(params.limit, params.offset);

    let items = PartnershipRepo::list_by_brand(
        &state.pool,
        params.brand_id,
        params.category.as_deref(),
        params.is_active,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/partnerships/{id}
pub async fn get_partnership(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Partnership>>> {
    let item = find_partnership(&state, id).await?;
    auth_user.require(item.brand_id, Resource::Partnerships, Action::Read)?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/partnerships
pub async fn create_partnership(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreatePartnership>,
) -> AppResult<(StatusCode, Json<DataResponse<Partnership>>)> {
    input.validate()?;
    auth_user.require(input.brand_id, Resource::Partnerships, Action::Write)?;

    let item = PartnershipRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/partnerships/{id}
pub async fn update_partnership(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePartnership>,
) -> AppResult<Json<DataResponse<Partnership>>> {
    input.validate()?;
    let existing = find_partnership(&state, id).await?;
    auth_user.require(existing.brand_id, Resource::Partnerships, Action::Write)?;

    let item = PartnershipRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Partnership",
            id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/partnerships/{id}
pub async fn delete_partnership(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = find_partnership(&state, id).await?;
    auth_user.require(item.brand_id, Resource::Partnerships, Action::Write)?;

    if PartnershipRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Partnership",
            id,
        }))
    }
}

async fn find_partnership(state: &AppState, id: DbId) -> AppResult<Partnership> {
    PartnershipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Partnership",
            id,
        }))
}
