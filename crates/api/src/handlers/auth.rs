//! Handlers for the `/auth` resource (login, refresh, logout, own account).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use brandpanel_core::error::CoreError;
use brandpanel_db::models::user::{UpdateUser, UserResponse};
use brandpanel_db::repositories::UserRepo;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_dummy_password, verify_password,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// The one message every failed login gets, whatever the cause.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful authentication response returned by login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `"Bearer"`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Request body for `PUT /auth/me`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Unknown email, wrong password and an
/// inactive account all fail with the same 401 so callers cannot tell which
/// check failed.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    input.validate()?;

    let Some(mut user) = UserRepo::find_by_email(&state.pool, &input.email).await? else {
        verify_dummy_password(&input.password);
        tracing::info!("Login failed: unknown email");
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(&input.password, &user.password_hash).map_err(|e| {
        AppError::InternalError(format!(
            "Stored password hash for user {} is unusable: {e}",
            user.id
        ))
    })?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }
    if !user.is_active() {
        tracing::info!(user_id = user.id, "Login failed: account inactive");
        return Err(invalid_credentials());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    user.last_login_at = Some(Utc::now());

    let access_token = generate_access_token(&user, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        refresh_token: generate_refresh_token(),
        token_type: "Bearer",
        expires_in: state.config.jwt.access_token_expiry_secs(),
        user: user.to_response()?,
    }))
}

/// POST /api/v1/auth/refresh
///
/// Refresh tokens are issued but never stored, so none can be redeemed.
/// Always 401; clients must log in again when the access token expires.
pub async fn refresh() -> AppResult<Json<AuthResponse>> {
    tracing::debug!("Refresh attempted; refresh tokens are not redeemable");
    Err(AppError::Core(CoreError::Unauthorized(
        "Invalid refresh token".into(),
    )))
}

/// POST /api/v1/auth/logout
///
/// Tokens are stateless, so there is nothing to revoke. Returns 204 No Content.
pub async fn logout(auth_user: AuthUser) -> StatusCode {
    tracing::info!(user_id = auth_user.user_id, "User logged out");
    StatusCode::NO_CONTENT
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: user.to_response()?,
    }))
}

/// PUT /api/v1/auth/me
///
/// Update the caller's own display name.
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;

    let update = UpdateUser {
        name: Some(input.name),
        ..Default::default()
    };
    let user = UserRepo::update(&state.pool, auth_user.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: user.to_response()?,
    }))
}

/// POST /api/v1/auth/change-password
///
/// Requires the current password. Returns 204 No Content.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Validation(
            "Current password is incorrect".into(),
        )));
    }

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &hashed).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}
