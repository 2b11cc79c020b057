//! User roles and account status.
//!
//! Both are stored as short strings in the `users` table and carried as the
//! same strings in access-token claims.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VIEWER: &str = "viewer";

/// All valid role names, most privileged first.
pub const VALID_ROLES: &[&str] = &[ROLE_SUPER_ADMIN, ROLE_ADMIN, ROLE_EDITOR, ROLE_VIEWER];

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// A user's role.
///
/// - `SuperAdmin` -- unrestricted, including brand management.
/// - `Admin`      -- full access to the brands in its access list, manages users.
/// - `Editor`     -- reads its brands, writes only where a permission grants it.
/// - `Viewer`     -- read-only access to its brands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => ROLE_SUPER_ADMIN,
            Self::Admin => ROLE_ADMIN,
            Self::Editor => ROLE_EDITOR,
            Self::Viewer => ROLE_VIEWER,
        }
    }

    /// Whether this role may use the user administration endpoints.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }

    /// Whether an actor with this role may create or modify an account
    /// holding `target`.
    ///
    /// Only a super admin may touch super admin accounts.
    pub fn can_manage(&self, target: Role) -> bool {
        match self {
            Self::SuperAdmin => true,
            Self::Admin => target != Self::SuperAdmin,
            Self::Editor | Self::Viewer => false,
        }
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_SUPER_ADMIN => Ok(Self::SuperAdmin),
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_EDITOR => Ok(Self::Editor),
            ROLE_VIEWER => Ok(Self::Viewer),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Valid roles: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status. Accounts are never hard-deleted, only toggled inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => STATUS_ACTIVE,
            Self::Inactive => STATUS_INACTIVE,
        }
    }
}

impl FromStr for UserStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_ACTIVE => Ok(Self::Active),
            STATUS_INACTIVE => Ok(Self::Inactive),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Expected '{STATUS_ACTIVE}' or '{STATUS_INACTIVE}'"
            ))),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
