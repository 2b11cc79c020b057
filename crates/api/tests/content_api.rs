//! Database-backed tests for the brand content endpoints.
//!
//! Each test gets a fresh database on the server named by `DATABASE_URL`.

mod common;

use axum::http::StatusCode;
use brandpanel_api::auth::password::hash_password;
use brandpanel_core::permissions::PermissionMap;
use brandpanel_core::roles::Role;
use brandpanel_core::types::DbId;
use brandpanel_db::models::user::{CreateUser, User};
use brandpanel_db::repositories::{BrandRepo, UserRepo};
use common::{
    body_json, delete_auth, get_auth, post_json_auth, post_multipart_auth, put_json_auth,
};
use serde_json::json;
use sqlx::MySqlPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn stored_user(
    pool: &MySqlPool,
    email: &str,
    role: Role,
    brands: Vec<DbId>,
    permissions: PermissionMap,
) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Content Editor".to_string(),
            email: email.to_string(),
            password_hash: hash_password("correct-horse-battery").unwrap(),
            role,
            brand_access: brands,
            permissions,
        },
    )
    .await
    .expect("user creation should succeed")
}

async fn brand_id(pool: &MySqlPool, slug: &str) -> DbId {
    BrandRepo::find_by_slug(pool, slug)
        .await
        .unwrap()
        .expect("brand should be seeded by migrations")
        .id
}

async fn super_admin_token(pool: &MySqlPool) -> String {
    let user = stored_user(pool, "root@example.com", Role::SuperAdmin, vec![], PermissionMap::new()).await;
    common::token_for_user(&user)
}

// ---------------------------------------------------------------------------
// Test: static pages and revisions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn created_page_is_readable_by_brand_and_slug(pool: MySqlPool) {
    let ovolt = brand_id(&pool, "ovolt").await;
    let mut permissions = PermissionMap::new();
    permissions
        .entry(ovolt)
        .or_default()
        .insert("pages.write".to_string());
    let editor = stored_user(&pool, "editor@example.com", Role::Editor, vec![ovolt], permissions).await;
    let token = common::token_for_user(&editor);
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/pages",
        &token,
        json!({
            "brand_id": ovolt,
            "title": "Frequently Asked Questions",
            "content": {
                "type": "faq",
                "items": [{ "question": "How do I pay?", "answer": "With the app." }]
            },
            "is_published": true
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["slug"], "frequently-asked-questions");
    assert_eq!(created["revision"], 1);
    assert_eq!(created["created_by"], editor.id);
    assert!(!created["published_at"].is_null());

    let uri = format!("/api/v1/pages/by-slug?brand_id={ovolt}&slug=frequently-asked-questions");
    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await["data"].clone();
    assert_eq!(fetched, created);

    let response = get_auth(
        app,
        &format!("/api/v1/pages/by-slug?brand_id={ovolt}&slug=missing"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_slug_in_same_brand_conflicts(pool: MySqlPool) {
    let ovolt = brand_id(&pool, "ovolt").await;
    let sharz = brand_id(&pool, "sharz-net").await;
    let token = super_admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = |brand: DbId| {
        json!({
            "brand_id": brand,
            "slug": "terms",
            "title": "Terms",
            "content": { "type": "rich_text", "html": "<p>Terms</p>" }
        })
    };

    let first = post_json_auth(app.clone(), "/api/v1/pages", &token, body(ovolt)).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let other_brand = post_json_auth(app.clone(), "/api/v1/pages", &token, body(sharz)).await;
    assert_eq!(other_brand.status(), StatusCode::CREATED);
    let duplicate = post_json_auth(app, "/api/v1/pages", &token, body(ovolt)).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn page_edits_are_revisioned_diffable_and_restorable(pool: MySqlPool) {
    let ovolt = brand_id(&pool, "ovolt").await;
    let token = super_admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/pages",
        &token,
        json!({
            "brand_id": ovolt,
            "title": "About",
            "content": { "type": "rich_text", "html": "<p>Version one</p>" }
        }),
    )
    .await;
    let page_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // A publish toggle alone does not create a revision.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/pages/{page_id}"),
        &token,
        json!({ "is_published": true }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["revision"], 1);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/pages/{page_id}"),
        &token,
        json!({ "title": "About Us", "content": { "type": "rich_text", "html": "<p>Version two</p>" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["revision"], 2);

    let response = get_auth(app.clone(), &format!("/api/v1/pages/{page_id}/revisions"), &token).await;
    let revisions = body_json(response).await["data"].clone();
    assert_eq!(revisions.as_array().unwrap().len(), 1);
    assert_eq!(revisions[0]["revision"], 1);
    assert_eq!(revisions[0]["title"], "About");

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/pages/{page_id}/revisions/1/diff"),
        &token,
    )
    .await;
    let diff = body_json(response).await["data"].clone();
    assert_eq!(diff["current_revision"], 2);
    let changed: Vec<&str> = diff["changes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["path"].as_str().unwrap())
        .collect();
    assert_eq!(changed, vec!["content.html", "title"]);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/pages/{page_id}/revisions/1/restore"),
        &token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let restored = body_json(response).await["data"].clone();
    assert_eq!(restored["title"], "About");
    assert_eq!(restored["revision"], 3);
    assert_eq!(restored["content"]["html"], "<p>Version one</p>");

    let response = get_auth(app, &format!("/api/v1/pages/{page_id}/revisions/9"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: announcements
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn active_only_filters_drafts_and_closed_windows(pool: MySqlPool) {
    let ovolt = brand_id(&pool, "ovolt").await;
    let token = super_admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let now = chrono::Utc::now();
    let day = chrono::Duration::days(1);
    for (title, published, starts_at, ends_at) in [
        ("live", true, Some(now - day), Some(now + day)),
        ("open-ended", true, None, None),
        ("draft", false, None, None),
        ("expired", true, Some(now - day * 3), Some(now - day)),
        ("upcoming", true, Some(now + day), None),
    ] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/announcements",
            &token,
            json!({
                "brand_id": ovolt,
                "title": title,
                "body": "Details",
                "is_published": published,
                "starts_at": starts_at,
                "ends_at": ends_at
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED, "{title}");
    }

    let all = body_json(
        get_auth(app.clone(), &format!("/api/v1/announcements?brand_id={ovolt}"), &token).await,
    )
    .await;
    assert_eq!(all["data"].as_array().unwrap().len(), 5);

    let live = body_json(
        get_auth(
            app,
            &format!("/api/v1/announcements?brand_id={ovolt}&active_only=true"),
            &token,
        )
        .await,
    )
    .await;
    let mut titles: Vec<&str> = live["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["live", "open-ended"]);
}

// ---------------------------------------------------------------------------
// Test: partnerships
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn partnerships_filter_by_category(pool: MySqlPool) {
    let sharz = brand_id(&pool, "sharz-net").await;
    let token = super_admin_token(&pool).await;
    let app = common::build_test_app(pool);

    for (name, category) in [("Mall Co", "retail"), ("Fleet Inc", "fleet"), ("Shop", "retail")] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/partnerships",
            &token,
            json!({ "brand_id": sharz, "name": name, "category": category }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(
        get_auth(
            app,
            &format!("/api/v1/partnerships?brand_id={sharz}&category=retail"),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Test: media library
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn uploaded_media_is_stored_and_removed_on_delete(pool: MySqlPool) {
    let ovolt = brand_id(&pool, "ovolt").await;
    let token = super_admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let brand_field = ovolt.to_string();
    let response = post_multipart_auth(
        app.clone(),
        "/api/v1/media/upload",
        &token,
        &[
            ("brand_id", None, None, brand_field.as_bytes()),
            ("alt_text", None, None, &b"Station at night"[..]),
            ("folder", None, None, &b"stations"[..]),
            ("file", Some("night shot.png"), Some("image/png"), &b"\x89PNG fake"[..]),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let item = body_json(response).await["data"].clone();
    assert_eq!(item["kind"], "image");
    assert_eq!(item["size_bytes"], 9);
    assert_eq!(item["folder"], "stations");

    let key = item["storage_key"].as_str().unwrap().to_string();
    assert!(key.starts_with(&format!("{ovolt}/")));
    assert!(key.ends_with(".png"));
    assert_eq!(item["url"], format!("/media-files/{key}"));
    let stored = common::test_media_root().join(&key);
    assert!(stored.exists());

    let listed = body_json(
        get_auth(
            app.clone(),
            &format!("/api/v1/media?brand_id={ovolt}&kind=image"),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let id = item["id"].as_i64().unwrap();
    let response = delete_auth(app.clone(), &format!("/api/v1/media/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!stored.exists());

    let response = get_auth(app, &format!("/api/v1/media/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: stations and chargers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn station_and_charger_lifecycle(pool: MySqlPool) {
    let ovolt = brand_id(&pool, "ovolt").await;
    let sharz = brand_id(&pool, "sharz-net").await;
    let token = super_admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/stations",
        &token,
        json!({
            "brand_id": ovolt,
            "name": "Kadikoy Hub",
            "city": "Istanbul",
            "latitude": 40.99,
            "longitude": 29.02
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let station_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/stations/{station_id}/chargers"),
        &token,
        json!({ "connector_type": "ccs2", "power_kw": 180.0, "price_per_kwh": 8.5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let charger = body_json(response).await["data"].clone();
    assert_eq!(charger["status"], "available");
    let charger_id = charger["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/stations/{station_id}/chargers/{charger_id}"),
        &token,
        json!({ "status": "out_of_service" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "out_of_service");

    // A charger is only reachable through its own station.
    let other = post_json_auth(
        app.clone(),
        "/api/v1/stations",
        &token,
        json!({ "brand_id": sharz, "name": "Elsewhere", "latitude": 39.9, "longitude": 32.8 }),
    )
    .await;
    let other_id = body_json(other).await["data"]["id"].as_i64().unwrap();
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/stations/{other_id}/chargers/{charger_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/stations/{station_id}"),
        &token,
        json!({ "latitude": -95.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete_auth(app.clone(), &format!("/api/v1/stations/{station_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(
        app,
        &format!("/api/v1/stations/{station_id}/chargers"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: user administration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_creates_users_within_its_brands(pool: MySqlPool) {
    let ovolt = brand_id(&pool, "ovolt").await;
    let admin = stored_user(&pool, "admin@example.com", Role::Admin, vec![ovolt], PermissionMap::new()).await;
    let token = common::token_for_user(&admin);
    let app = common::build_test_app(pool);

    let body = json!({
        "name": "New Editor",
        "email": "new.editor@example.com",
        "password": "long-enough-password",
        "role": "editor",
        "brand_access": [ovolt],
        "permissions": { (ovolt.to_string()): ["pages.read", "pages.write"] }
    });

    let response = post_json_auth(app.clone(), "/api/v1/admin/users", &token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["role"], "editor");
    assert_eq!(created["brand_access"], json!([ovolt]));
    assert!(created.get("password_hash").is_none());

    let response = post_json_auth(app.clone(), "/api/v1/admin/users", &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let id = created["id"].as_i64().unwrap();
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{id}/status"),
        &token,
        json!({ "status": "inactive" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "inactive");

    let response = get_auth(app, "/api/v1/admin/users", &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_cannot_reach_accounts_of_other_brands(pool: MySqlPool) {
    let ovolt = brand_id(&pool, "ovolt").await;
    let sharz = brand_id(&pool, "sharz-net").await;
    let admin = stored_user(&pool, "ovolt.admin@example.com", Role::Admin, vec![ovolt], PermissionMap::new()).await;
    let foreign = stored_user(&pool, "sharz.admin@example.com", Role::Admin, vec![sharz], PermissionMap::new()).await;
    let shared = stored_user(&pool, "both@example.com", Role::Editor, vec![ovolt, sharz], PermissionMap::new()).await;
    let token = common::token_for_user(&admin);
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<i64> = body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert!(listed.contains(&admin.id));
    assert!(listed.contains(&shared.id));
    assert!(!listed.contains(&foreign.id));

    let response = get_auth(app.clone(), &format!("/api/v1/admin/users/{}", foreign.id), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let reset = json!({ "new_password": "taken-over-account" });
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}/reset-password", foreign.id),
        &token,
        reset.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app.clone(), &format!("/api/v1/admin/users/{}", shared.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/users/{}/reset-password", shared.id),
        &token,
        reset,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
