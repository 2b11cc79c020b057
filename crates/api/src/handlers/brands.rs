//! Handlers for the `/brands` resource.
//!
//! Any authenticated user may list and read the brands in its scope; only a
//! super admin may create, modify or delete brands.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use brandpanel_core::error::CoreError;
use brandpanel_core::slug::{resolve_slug, validate_slug};
use brandpanel_core::types::DbId;
use brandpanel_db::models::brand::{Brand, CreateBrand, UpdateBrand};
use brandpanel_db::repositories::BrandRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireSuperAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/brands
///
/// Brands visible to the caller, ordered by name.
pub async fn list_brands(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Brand>>>> {
    let visible = auth_user.scope.visible_brands();
    let brands = BrandRepo::list(&state.pool, visible.as_deref()).await?;
    Ok(Json(DataResponse { data: brands }))
}

/// GET /api/v1/brands/{id}
pub async fn get_brand(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Brand>>> {
    if !auth_user.scope.has_brand(id) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "No access to brand {id}"
        ))));
    }
    let brand = BrandRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Brand", id }))?;
    Ok(Json(DataResponse { data: brand }))
}

/// POST /api/v1/brands
///
/// The slug defaults to one generated from the name. Returns 201 Created.
pub async fn create_brand(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Json(input): Json<CreateBrand>,
) -> AppResult<(StatusCode, Json<DataResponse<Brand>>)> {
    input.validate()?;
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;

    let brand = BrandRepo::create(&state.pool, &input, &slug).await?;
    tracing::info!(brand_id = brand.id, slug = %brand.slug, created_by = admin.user_id, "Brand created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: brand })))
}

/// PUT /api/v1/brands/{id}
pub async fn update_brand(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBrand>,
) -> AppResult<Json<DataResponse<Brand>>> {
    input.validate()?;
    if let Some(slug) = input.slug.as_deref() {
        validate_slug(slug)?;
    }

    let brand = BrandRepo::update(&state.pool, id, &input, input.slug.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Brand", id }))?;
    Ok(Json(DataResponse { data: brand }))
}

/// DELETE /api/v1/brands/{id}
///
/// Deletes the brand and, through cascading keys, all of its content.
/// Returns 204 No Content.
pub async fn delete_brand(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BrandRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::warn!(brand_id = id, deleted_by = admin.user_id, "Brand deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Brand", id }))
    }
}
