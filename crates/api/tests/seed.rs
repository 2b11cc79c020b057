//! First-run super admin seeding.

mod common;

use assert_matches::assert_matches;
use brandpanel_api::config::SeedConfig;
use brandpanel_api::seed::{seed_super_admin, SeedError};
use brandpanel_core::roles::Role;
use sqlx::MySqlPool;

fn seed_config(password: &str) -> SeedConfig {
    SeedConfig {
        admin_email: Some("owner@example.com".to_string()),
        admin_password: Some(password.to_string()),
        admin_name: "Owner".to_string(),
    }
}

#[tokio::test]
async fn missing_credentials_skip_seeding_without_a_query() {
    let config = SeedConfig {
        admin_email: None,
        admin_password: None,
        admin_name: "Owner".to_string(),
    };
    let seeded = seed_super_admin(&common::unreachable_pool(), &config).await;
    assert_matches!(seeded, Ok(None));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seeds_once_into_an_empty_table(pool: MySqlPool) {
    let config = seed_config("first-run-password");

    let user = seed_super_admin(&pool, &config).await.unwrap().unwrap();
    assert_eq!(user.role().unwrap(), Role::SuperAdmin);
    assert_eq!(user.email, "owner@example.com");

    assert_matches!(seed_super_admin(&pool, &config).await, Ok(None));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn weak_seed_password_is_rejected(pool: MySqlPool) {
    let result = seed_super_admin(&pool, &seed_config("short")).await;
    assert_matches!(result, Err(SeedError::WeakPassword(_)));
}
