//! Authorization and request-validation tests that need no database.
//!
//! Every request here is rejected before the handler reaches a repository,
//! so the app runs against a pool that never connects.

mod common;

use axum::http::StatusCode;
use brandpanel_core::roles::Role;
use common::{body_json, get_auth, post_json_auth, post_multipart_auth, put_json_auth};
use serde_json::json;

fn page_body(brand_id: i64) -> serde_json::Value {
    json!({
        "brand_id": brand_id,
        "title": "About us",
        "content": { "type": "rich_text", "html": "<p>Hello</p>" }
    })
}

async fn assert_forbidden(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

async fn assert_validation_error(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: brand-scoped content writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn viewer_cannot_create_pages() {
    let token = common::token_for(Role::Viewer, &[1], &[(1, "pages.write")]);
    let response =
        post_json_auth(common::build_offline_app(), "/api/v1/pages", &token, page_body(1)).await;
    assert_forbidden(response).await;
}

#[tokio::test]
async fn editor_without_write_permission_is_forbidden() {
    let token = common::token_for(Role::Editor, &[1], &[(1, "media.write")]);
    let response =
        post_json_auth(common::build_offline_app(), "/api/v1/pages", &token, page_body(1)).await;
    assert_forbidden(response).await;
}

#[tokio::test]
async fn admin_cannot_write_outside_its_brands() {
    let token = common::token_for(Role::Admin, &[1], &[]);
    let response =
        post_json_auth(common::build_offline_app(), "/api/v1/pages", &token, page_body(2)).await;
    assert_forbidden(response).await;
}

#[tokio::test]
async fn listing_another_brand_is_forbidden() {
    let token = common::token_for(Role::Editor, &[1], &[]);
    for uri in [
        "/api/v1/pages?brand_id=2",
        "/api/v1/announcements?brand_id=2&active_only=true",
        "/api/v1/partnerships?brand_id=2",
        "/api/v1/media?brand_id=2&kind=image",
        "/api/v1/stations?brand_id=2",
        "/api/v1/pages/by-slug?brand_id=2&slug=faq",
    ] {
        let response = get_auth(common::build_offline_app(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[tokio::test]
async fn upload_without_write_permission_is_forbidden() {
    let token = common::token_for(Role::Viewer, &[1], &[]);
    let response = post_multipart_auth(
        common::build_offline_app(),
        "/api/v1/media/upload",
        &token,
        &[
            ("brand_id", None, None, &b"1"[..]),
            ("file", Some("logo.png"), Some("image/png"), &b"\x89PNG"[..]),
        ],
    )
    .await;
    assert_forbidden(response).await;
}

// ---------------------------------------------------------------------------
// Test: role-gated administration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn editor_cannot_list_users() {
    let token = common::token_for(Role::Editor, &[1], &[]);
    let response = get_auth(common::build_offline_app(), "/api/v1/admin/users", &token).await;
    assert_forbidden(response).await;
}

#[tokio::test]
async fn admin_cannot_create_brands() {
    let token = common::token_for(Role::Admin, &[1], &[]);
    let response = post_json_auth(
        common::build_offline_app(),
        "/api/v1/brands",
        &token,
        json!({ "name": "New Brand" }),
    )
    .await;
    assert_forbidden(response).await;
}

#[tokio::test]
async fn admin_cannot_grant_super_admin() {
    let token = common::token_for(Role::Admin, &[1], &[]);
    let response = post_json_auth(
        common::build_offline_app(),
        "/api/v1/admin/users",
        &token,
        json!({
            "name": "Root",
            "email": "root@example.com",
            "password": "long-enough-password",
            "role": "super_admin"
        }),
    )
    .await;
    assert_forbidden(response).await;
}

#[tokio::test]
async fn admin_cannot_grant_brands_it_does_not_hold() {
    let token = common::token_for(Role::Admin, &[1], &[]);
    let response = post_json_auth(
        common::build_offline_app(),
        "/api/v1/admin/users",
        &token,
        json!({
            "name": "Editor",
            "email": "editor@example.com",
            "password": "long-enough-password",
            "role": "editor",
            "brand_access": [2]
        }),
    )
    .await;
    assert_forbidden(response).await;
}

#[tokio::test]
async fn permissions_outside_brand_access_are_rejected() {
    let token = common::token_for(Role::SuperAdmin, &[], &[]);
    let response = put_json_auth(
        common::build_offline_app(),
        "/api/v1/admin/users/5/permissions",
        &token,
        json!({ "brand_access": [1], "permissions": { "2": ["pages.write"] } }),
    )
    .await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn unknown_permission_strings_are_rejected() {
    let token = common::token_for(Role::SuperAdmin, &[], &[]);
    let response = put_json_auth(
        common::build_offline_app(),
        "/api/v1/admin/users/5/permissions",
        &token,
        json!({ "brand_access": [1], "permissions": { "1": ["pages.delete"] } }),
    )
    .await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn admin_cannot_deactivate_itself() {
    // `token_for` issues tokens for user 900.
    let token = common::token_for(Role::Admin, &[1], &[]);
    let response = put_json_auth(
        common::build_offline_app(),
        "/api/v1/admin/users/900/status",
        &token,
        json!({ "status": "inactive" }),
    )
    .await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn new_user_password_policy_is_enforced() {
    let token = common::token_for(Role::SuperAdmin, &[], &[]);
    let response = post_json_auth(
        common::build_offline_app(),
        "/api/v1/admin/users",
        &token,
        json!({
            "name": "Short",
            "email": "short@example.com",
            "password": "short",
            "role": "viewer"
        }),
    )
    .await;
    assert_validation_error(response).await;
}

// ---------------------------------------------------------------------------
// Test: domain validation on writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_rich_text_page_is_rejected() {
    let token = common::token_for(Role::SuperAdmin, &[], &[]);
    let mut body = page_body(1);
    body["content"]["html"] = json!("   ");
    let response = post_json_auth(common::build_offline_app(), "/api/v1/pages", &token, body).await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn invalid_explicit_slug_is_rejected() {
    let token = common::token_for(Role::SuperAdmin, &[], &[]);
    let mut body = page_body(1);
    body["slug"] = json!("Not A Slug");
    let response = post_json_auth(common::build_offline_app(), "/api/v1/pages", &token, body).await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn announcement_window_must_be_ordered() {
    let token = common::token_for(Role::Admin, &[1], &[]);
    let response = post_json_auth(
        common::build_offline_app(),
        "/api/v1/announcements",
        &token,
        json!({
            "brand_id": 1,
            "title": "Maintenance",
            "body": "Stations offline tonight.",
            "starts_at": "2026-05-02T00:00:00Z",
            "ends_at": "2026-05-01T00:00:00Z"
        }),
    )
    .await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn station_coordinates_are_range_checked() {
    let token = common::token_for(Role::Admin, &[1], &[]);
    let response = post_json_auth(
        common::build_offline_app(),
        "/api/v1/stations",
        &token,
        json!({ "brand_id": 1, "name": "Nowhere", "latitude": 91.0, "longitude": 29.0 }),
    )
    .await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn charger_power_must_be_positive() {
    let token = common::token_for(Role::Admin, &[1], &[]);
    let response = post_json_auth(
        common::build_offline_app(),
        "/api/v1/stations/1/chargers",
        &token,
        json!({ "connector_type": "ccs2", "power_kw": 0.0 }),
    )
    .await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn registering_an_unsupported_mime_type_is_rejected() {
    let token = common::token_for(Role::Admin, &[1], &[]);
    let response = post_json_auth(
        common::build_offline_app(),
        "/api/v1/media",
        &token,
        json!({
            "brand_id": 1,
            "file_name": "setup.exe",
            "url": "https://cdn.example.com/setup.exe",
            "mime_type": "application/x-msdownload"
        }),
    )
    .await;
    assert_validation_error(response).await;
}

#[tokio::test]
async fn oversized_upload_returns_413() {
    let token = common::token_for(Role::Admin, &[1], &[]);
    let big = vec![b'x'; 4096];
    let response = post_multipart_auth(
        common::build_offline_app(),
        "/api/v1/media/upload",
        &token,
        &[
            ("brand_id", None, None, &b"1"[..]),
            ("file", Some("big.png"), Some("image/png"), big.as_slice()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn upload_with_disallowed_type_is_rejected() {
    let token = common::token_for(Role::Admin, &[1], &[]);
    let response = post_multipart_auth(
        common::build_offline_app(),
        "/api/v1/media/upload",
        &token,
        &[
            ("brand_id", None, None, &b"1"[..]),
            ("file", Some("run.sh"), Some("text/x-shellscript"), &b"echo hi"[..]),
        ],
    )
    .await;
    assert_validation_error(response).await;
}
