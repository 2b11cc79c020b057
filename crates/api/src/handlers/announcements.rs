//! Handlers for the `/announcements` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use brandpanel_core::announcements::validate_window;
use brandpanel_core::error::CoreError;
use brandpanel_core::permissions::{Action, Resource};
use brandpanel_core::types::DbId;
use brandpanel_db::models::announcement::{
    Announcement, CreateAnnouncement, UpdateAnnouncement,
};
use brandpanel_db::repositories::AnnouncementRepo;
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::resolve_page;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /announcements`.
#[derive(Debug, Deserialize)]
pub struct AnnouncementListParams {
    pub brand_id: DbId,
    /// Only announcements that are published and inside their window now.
    #[serde(default)]
    pub active_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/announcements?brand_id=&active_only=&limit=&offset=
///
/// Pinned first, then by sort order and newest.
pub async fn list_announcements(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<AnnouncementListParams>,
) -> AppResult<Json<DataResponse<Vec<Announcement>>>> {
    auth_user.require(params.brand_id, Resource::Announcements, Action::Read)?;
    let (limit, offset) = resolve_page(params.limit, params.offset);
    let live_at = params.active_only.then(Utc::now);

    let items =
        AnnouncementRepo::list_by_brand(&state.pool, params.brand_id, live_at, limit, offset)
            .await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/announcements/{id}
pub async fn get_announcement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Announcement>>> {
    let item = find_announcement(&state, id).await?;
    auth_user.require(item.brand_id, Resource::Announcements, Action::Read)?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateAnnouncement>,
) -> AppResult<(StatusCode, Json<DataResponse<Announcement>>)> {
    input.validate()?;
    auth_user.require(input.brand_id, Resource::Announcements, Action::Write)?;
    validate_window(input.starts_at, input.ends_at)?;

    let item = AnnouncementRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/announcements/{id}
///
/// The window is checked against the merged result, so moving only one
/// bound past the other is rejected. A `null` bound clears it.
pub async fn update_announcement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnouncement>,
) -> AppResult<Json<DataResponse<Announcement>>> {
    input.validate()?;

    let existing = find_announcement(&state, id).await?;
    auth_user.require(existing.brand_id, Resource::Announcements, Action::Write)?;
    let (starts_at, ends_at) = input.merged_window(&existing);
    validate_window(starts_at, ends_at)?;

    let item = AnnouncementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/announcements/{id}
pub async fn delete_announcement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = find_announcement(&state, id).await?;
    auth_user.require(item.brand_id, Resource::Announcements, Action::Write)?;

    if AnnouncementRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))
    }
}

async fn find_announcement(state: &AppState, id: DbId) -> AppResult<Announcement> {
    AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))
}
