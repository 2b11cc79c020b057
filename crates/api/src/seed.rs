//! First-run seeding of the super admin account.

use brandpanel_core::permissions::PermissionMap;
use brandpanel_core::roles::Role;
use brandpanel_db::models::user::{CreateUser, User};
use brandpanel_db::repositories::UserRepo;
use brandpanel_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::config::SeedConfig;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("SEED_ADMIN_PASSWORD rejected: {0}")]
    WeakPassword(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a super admin from `config` when the `users` table is empty.
///
/// Does nothing (and returns `None`) when users already exist or when no
/// seed email/password is configured.
pub async fn seed_super_admin(pool: &DbPool, config: &SeedConfig) -> Result<Option<User>, SeedError> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        tracing::debug!("No seed credentials configured");
        return Ok(None);
    };

    if UserRepo::count(pool).await? > 0 {
        tracing::debug!("Users exist, skipping super admin seed");
        return Ok(None);
    }

    validate_password_strength(password).map_err(SeedError::WeakPassword)?;
    let password_hash = hash_password(password).map_err(|e| SeedError::Hash(e.to_string()))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: config.admin_name.clone(),
            email: email.clone(),
            password_hash,
            role: Role::SuperAdmin,
            brand_access: Vec::new(),
            permissions: PermissionMap::new(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Seeded super admin account");
    Ok(Some(user))
}
