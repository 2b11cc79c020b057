//! Repository for the `users` table.

use brandpanel_core::permissions::PermissionMap;
use brandpanel_core::roles::UserStatus;
use brandpanel_core::types::DbId;
use sqlx::types::Json;
use sqlx::MySqlPool;

use super::inserted_id;
use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, role, status, brand_access, \
                        permissions, last_login_at, created_at, updated_at";

/// Provides CRUD operations for users. Users are never hard-deleted.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &MySqlPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash, role, brand_access, permissions)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.role.as_str())
        .bind(Json(&input.brand_access))
        .bind(Json(&input.permissions))
        .execute(pool)
        .await?;

        Self::find_by_id(pool, inserted_id(&result))
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Comparison follows the column collation
    /// (case-insensitive).
    pub async fn find_by_email(pool: &MySqlPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List users ordered by most recently created first.
    ///
    /// With `brands` set, only users sharing at least one of those brands or
    /// holding no brands at all are returned.
    pub async fn list(
        pool: &MySqlPool,
        brands: Option<&[DbId]>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        match brands {
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM users
                     ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
                );
                sqlx::query_as::<_, User>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            Some(brands) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM users
                     WHERE JSON_OVERLAPS(brand_access, CAST(? AS JSON))
                        OR JSON_LENGTH(brand_access) = 0
                     ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
                );
                sqlx::query_as::<_, User>(&query)
                    .bind(Json(brands))
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Total number of user rows, active or not.
    pub async fn count(pool: &MySqlPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                role = COALESCE(?, role)
             WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.role.map(|r| r.as_str()))
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    /// Set the account status. Returns `None` if the user does not exist.
    pub async fn set_status(
        pool: &MySqlPool,
        id: DbId,
        status: UserStatus,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query("UPDATE users SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(pool)
            .await?;
        Self::find_by_id(pool, id).await
    }

    /// Replace the brand-access list and permission map.
    pub async fn set_permissions(
        pool: &MySqlPool,
        id: DbId,
        brand_access: &[DbId],
        permissions: &PermissionMap,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query("UPDATE users SET brand_access = ?, permissions = ? WHERE id = ?")
            .bind(Json(brand_access))
            .bind(Json(permissions))
            .bind(id)
            .execute(pool)
            .await?;
        Self::find_by_id(pool, id).await
    }

    /// Set `last_login_at` to now.
    pub async fn record_successful_login(pool: &MySqlPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = UTC_TIMESTAMP(6) WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    ///
    /// Every hash carries a fresh salt, so a matching row always changes.
    pub async fn update_password(
        pool: &MySqlPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
