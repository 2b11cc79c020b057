//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use brandpanel_core::error::CoreError;
use brandpanel_core::permissions::{AccessScope, Action, Resource};
use brandpanel_core::roles::Role;
use brandpanel_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     user.require(brand_id, Resource::Pages, Action::Write)?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// Role, brand access and permissions as of token issue time.
    pub scope: AccessScope,
}

impl AuthUser {
    pub fn role(&self) -> Role {
        self.scope.role
    }

    /// Fail with 403 unless the user may perform `action` on `resource` of `brand_id`.
    pub fn require(&self, brand_id: DbId, resource: Resource, action: Action) -> AppResult<()> {
        self.scope
            .require(brand_id, resource, action)
            .map_err(AppError::Core)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let scope = claims.access_scope().map_err(|e| {
            tracing::warn!(user_id = claims.sub, error = %e, "Token carries malformed claims");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            scope,
        })
    }
}
