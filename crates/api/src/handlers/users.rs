//! Handlers for the `/admin/users` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`]. A plain admin
//! may not touch super admin accounts, only sees accounts sharing one of its
//! brands, and only manages or grants brands it holds.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use brandpanel_core::error::CoreError;
use brandpanel_core::permissions::{validate_permission_map, PermissionMap};
use brandpanel_core::roles::{Role, UserStatus};
use brandpanel_core::types::DbId;
use brandpanel_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use brandpanel_db::repositories::{BrandRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub brand_access: Vec<DbId>,
    #[serde(default)]
    pub permissions: PermissionMap,
}

/// Request body for `PUT /admin/users/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: UserStatus,
}

/// Request body for `PUT /admin/users/{id}/permissions`.
#[derive(Debug, Deserialize)]
pub struct SetPermissionsRequest {
    pub brand_access: Vec<DbId>,
    #[serde(default)]
    pub permissions: PermissionMap,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let (limit, offset) = params.resolve();
    let visible = admin.scope.visible_brands();
    let users = UserRepo::list(&state.pool, visible.as_deref(), limit, offset).await?;
    let data = users
        .iter()
        .map(User::to_response)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/users
///
/// Create a new user. Validates the password policy and the brand grants,
/// hashes the password, and returns 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    ensure_can_assign_role(&admin, input.role)?;
    validate_permission_map(&input.brand_access, &input.permissions)?;
    ensure_brands_grantable(&state, &admin, &input.brand_access).await?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let dto = CreateUser {
        name: input.name,
        email: input.email,
        password_hash: hashed,
        role: input.role,
        brand_access: input.brand_access,
        permissions: input.permissions,
    };
    let user = UserRepo::create(&state.pool, &dto).await?;

    tracing::info!(
        user_id = user.id,
        role = %dto.role,
        created_by = admin.user_id,
        "User created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: user.to_response()?,
        }),
    ))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = find_user(&state, id).await?;
    ensure_can_see(&admin, &user)?;
    Ok(Json(DataResponse {
        data: user.to_response()?,
    }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update name, email or role.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;

    let target = find_user(&state, id).await?;
    ensure_can_manage(&admin, &target)?;
    if let Some(role) = input.role {
        ensure_can_assign_role(&admin, role)?;
        if admin.user_id == id && role != admin.role() {
            return Err(AppError::Core(CoreError::Validation(
                "You cannot change your own role".into(),
            )));
        }
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse {
        data: user.to_response()?,
    }))
}

/// PUT /api/v1/admin/users/{id}/status
///
/// Activate or deactivate an account. Accounts are never deleted.
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if admin.user_id == id && input.status == UserStatus::Inactive {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot deactivate your own account".into(),
        )));
    }

    let target = find_user(&state, id).await?;
    ensure_can_manage(&admin, &target)?;

    let user = UserRepo::set_status(&state.pool, id, input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, status = %input.status, changed_by = admin.user_id, "User status changed");
    Ok(Json(DataResponse {
        data: user.to_response()?,
    }))
}

/// PUT /api/v1/admin/users/{id}/permissions
///
/// Replace the brand-access list and the permission map together.
/// Takes effect on the user's next login.
pub async fn set_permissions(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetPermissionsRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    validate_permission_map(&input.brand_access, &input.permissions)?;

    let target = find_user(&state, id).await?;
    ensure_can_manage(&admin, &target)?;
    ensure_brands_grantable(&state, &admin, &input.brand_access).await?;

    let user = UserRepo::set_permissions(&state.pool, id, &input.brand_access, &input.permissions)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse {
        data: user.to_response()?,
    }))
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Admin-initiated password reset. Returns 204 No Content.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let target = find_user(&state, id).await?;
    ensure_can_manage(&admin, &target)?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, id, &hashed).await?;
    if updated {
        tracing::info!(user_id = id, reset_by = admin.user_id, "Password reset");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

fn ensure_can_assign_role(admin: &AuthUser, role: Role) -> AppResult<()> {
    if admin.role().can_manage(role) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Cannot assign the '{role}' role"
        ))))
    }
}

/// Accounts outside every brand the admin holds are reported as missing.
fn ensure_can_see(admin: &AuthUser, target: &User) -> AppResult<()> {
    if admin.scope.can_see_account(&target.brand_access.0) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: target.id,
        }))
    }
}

fn ensure_can_manage(admin: &AuthUser, target: &User) -> AppResult<()> {
    ensure_can_see(admin, target)?;
    let target_role = target.role()?;
    if !admin.role().can_manage(target_role) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Cannot manage a '{target_role}' account"
        ))));
    }
    if !admin.scope.covers_brands(&target.brand_access.0) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Account {} holds brands outside your access",
            target.id
        ))));
    }
    Ok(())
}

/// Every brand must exist and, for a plain admin, be in its own access list.
async fn ensure_brands_grantable(
    state: &AppState,
    admin: &AuthUser,
    brand_ids: &[DbId],
) -> AppResult<()> {
    for &brand_id in brand_ids {
        if !admin.scope.has_brand(brand_id) {
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "Cannot grant access to brand {brand_id}"
            ))));
        }
        if BrandRepo::find_by_id(&state.pool, brand_id).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Brand {brand_id} does not exist"
            ))));
        }
    }
    Ok(())
}
