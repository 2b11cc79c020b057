//! Handlers for the `/pages` resource: static pages and their revisions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use brandpanel_core::diff::{compute_field_diff, FieldDiff};
use brandpanel_core::error::CoreError;
use brandpanel_core::permissions::{Action, Resource};
use brandpanel_core::slug::{resolve_slug, validate_slug};
use brandpanel_core::types::DbId;
use brandpanel_db::models::page::{
    CreateStaticPage, PageRevision, PageRevisionSummary, StaticPage, UpdateStaticPage,
};
use brandpanel_db::repositories::{PageRevisionRepo, StaticPageRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{resolve_page, DiffParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /pages`.
#[derive(Debug, Deserialize)]
pub struct PageListParams {
    pub brand_id: DbId,
    pub published: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /pages/by-slug`.
#[derive(Debug, Deserialize)]
pub struct PageSlugParams {
    pub brand_id: DbId,
    pub slug: String,
}

/// Field-level comparison of a stored revision with the current page.
#[derive(Debug, Serialize)]
pub struct RevisionDiffResponse {
    pub page_id: DbId,
    pub revision: i32,
    pub current_revision: i32,
    pub changes: Vec<FieldDiff>,
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET /api/v1/pages?brand_id=&published=&limit=&offset=
pub async fn list_pages(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PageListParams>,
) -> AppResult<Json<DataResponse<Vec<StaticPage>>>> {
    auth_user.require(params.brand_id, Resource::Pages, Action::Read)?;
    let (limit, offset) = resolve_page(params.limit, params.offset);

    let pages =
        StaticPageRepo::list_by_brand(&state.pool, params.brand_id, params.published, limit, offset)
            .await?;
    Ok(Json(DataResponse { data: pages }))
}

/// GET /api/v1/pages/{id}
pub async fn get_page(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StaticPage>>> {
    let page = find_page(&state, id).await?;
    auth_user.require(page.brand_id, Resource::Pages, Action::Read)?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/pages/by-slug?brand_id=&slug=
pub async fn get_page_by_slug(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PageSlugParams>,
) -> AppResult<Json<DataResponse<StaticPage>>> {
    auth_user.require(params.brand_id, Resource::Pages, Action::Read)?;

    let page = StaticPageRepo::find_by_brand_and_slug(&state.pool, params.brand_id, &params.slug)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No page with slug '{}' in brand {}",
                params.slug, params.brand_id
            ))
        })?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/pages
///
/// The slug defaults to one generated from the title and must be unique
/// within the brand (409 otherwise). Returns 201 Created.
pub async fn create_page(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateStaticPage>,
) -> AppResult<(StatusCode, Json<DataResponse<StaticPage>>)> {
    input.validate()?;
    auth_user.require(input.brand_id, Resource::Pages, Action::Write)?;
    input.content.validate()?;
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;

    let page = StaticPageRepo::create(&state.pool, &input, &slug, Some(auth_user.user_id)).await?;

    tracing::info!(
        page_id = page.id,
        brand_id = page.brand_id,
        kind = page.content.0.kind(),
        "Static page created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// PUT /api/v1/pages/{id}
///
/// Partial update. Changing the title, content or meta fields records the
/// previous state as a revision.
pub async fn update_page(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStaticPage>,
) -> AppResult<Json<DataResponse<StaticPage>>> {
    input.validate()?;
    if let Some(content) = &input.content {
        content.validate()?;
    }
    if let Some(slug) = input.slug.as_deref() {
        validate_slug(slug)?;
    }

    let existing = find_page(&state, id).await?;
    auth_user.require(existing.brand_id, Resource::Pages, Action::Write)?;

    let page = StaticPageRepo::update(
        &state.pool,
        id,
        &input,
        input.slug.as_deref(),
        Some(auth_user.user_id),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "StaticPage",
        id,
    }))?;

    if page.revision != existing.revision {
        tracing::debug!(page_id = id, revision = page.revision, "Page revision recorded");
    }
    Ok(Json(DataResponse { data: page }))
}

/// DELETE /api/v1/pages/{id}
///
/// Deletes the page with all of its revisions. Returns 204 No Content.
pub async fn delete_page(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let page = find_page(&state, id).await?;
    auth_user.require(page.brand_id, Resource::Pages, Action::Write)?;

    if StaticPageRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "StaticPage",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Revisions
// ---------------------------------------------------------------------------

/// GET /api/v1/pages/{id}/revisions
///
/// Newest first.
pub async fn list_revisions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PageRevisionSummary>>>> {
    let page = find_page(&state, id).await?;
    auth_user.require(page.brand_id, Resource::Pages, Action::Read)?;

    let revisions = PageRevisionRepo::list_by_page(&state.pool, id).await?;
    Ok(Json(DataResponse { data: revisions }))
}

/// GET /api/v1/pages/{id}/revisions/{revision}
pub async fn get_revision(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, revision)): Path<(DbId, i32)>,
) -> AppResult<Json<DataResponse<PageRevision>>> {
    let page = find_page(&state, id).await?;
    auth_user.require(page.brand_id, Resource::Pages, Action::Read)?;

    let revision = find_revision(&state, id, revision).await?;
    Ok(Json(DataResponse { data: revision }))
}

/// GET /api/v1/pages/{id}/revisions/{revision}/diff?include_unchanged=
///
/// Compare a stored revision (old side) with the current page (new side).
pub async fn diff_revision(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, revision)): Path<(DbId, i32)>,
    Query(params): Query<DiffParams>,
) -> AppResult<Json<DataResponse<RevisionDiffResponse>>> {
    let page = find_page(&state, id).await?;
    auth_user.require(page.brand_id, Resource::Pages, Action::Read)?;

    let stored = find_revision(&state, id, revision).await?;
    let changes = compute_field_diff(&stored.snapshot(), &page.snapshot(), params.include_unchanged);

    Ok(Json(DataResponse {
        data: RevisionDiffResponse {
            page_id: id,
            revision: stored.revision,
            current_revision: page.revision,
            changes,
        },
    }))
}

/// POST /api/v1/pages/{id}/revisions/{revision}/restore
///
/// Bring back the title, content and meta fields of a stored revision. The
/// state being replaced is recorded as a new revision first.
pub async fn restore_revision(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, revision)): Path<(DbId, i32)>,
) -> AppResult<Json<DataResponse<StaticPage>>> {
    let page = find_page(&state, id).await?;
    auth_user.require(page.brand_id, Resource::Pages, Action::Write)?;

    let restored =
        StaticPageRepo::restore_revision(&state.pool, id, revision, Some(auth_user.user_id))
            .await?
            .ok_or_else(|| revision_not_found(id, revision))?;

    tracing::info!(
        page_id = id,
        restored_from = revision,
        revision = restored.revision,
        "Page revision restored"
    );
    Ok(Json(DataResponse { data: restored }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_page(state: &AppState, id: DbId) -> AppResult<StaticPage> {
    StaticPageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StaticPage",
            id,
        }))
}

async fn find_revision(state: &AppState, page_id: DbId, revision: i32) -> AppResult<PageRevision> {
    PageRevisionRepo::find(&state.pool, page_id, revision)
        .await?
        .ok_or_else(|| revision_not_found(page_id, revision))
}

fn revision_not_found(page_id: DbId, revision: i32) -> AppError {
    AppError::NotFound(format!("Page {page_id} has no revision {revision}"))
}
