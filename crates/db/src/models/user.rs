//! User entity model and DTOs.

use brandpanel_core::error::CoreError;
use brandpanel_core::permissions::{AccessScope, PermissionMap};
use brandpanel_core::roles::{Role, UserStatus};
use brandpanel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub brand_access: Json<Vec<DbId>>,
    pub permissions: Json<PermissionMap>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn role(&self) -> Result<Role, CoreError> {
        self.role.parse().map_err(|_| {
            CoreError::Internal(format!("User {} has unknown role '{}'", self.id, self.role))
        })
    }

    pub fn status(&self) -> Result<UserStatus, CoreError> {
        self.status.parse().map_err(|_| {
            CoreError::Internal(format!("User {} has unknown status '{}'", self.id, self.status))
        })
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status(), Ok(UserStatus::Active))
    }

    /// Authorization scope derived from the stored role and brand grants.
    pub fn access_scope(&self) -> Result<AccessScope, CoreError> {
        Ok(AccessScope {
            role: self.role()?,
            brand_access: self.brand_access.0.iter().copied().collect(),
            permissions: self.permissions.0.clone(),
        })
    }

    /// Build the safe API representation.
    pub fn to_response(&self) -> Result<UserResponse, CoreError> {
        Ok(UserResponse {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role()?,
            status: self.status()?,
            brand_access: self.brand_access.0.clone(),
            permissions: self.permissions.0.clone(),
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub brand_access: Vec<DbId>,
    pub permissions: PermissionMap,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub brand_access: Vec<DbId>,
    pub permissions: PermissionMap,
}

/// DTO for updating profile fields. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    pub role: Option<Role>,
}
