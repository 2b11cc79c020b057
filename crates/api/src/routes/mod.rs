pub mod admin;
pub mod announcements;
pub mod auth;
pub mod brands;
pub mod health;
pub mod media;
pub mod pages;
pub mod partnerships;
pub mod stations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                   login (public)
/// /auth/refresh                                 refresh (public, always 401)
/// /auth/logout                                  logout (requires auth)
/// /auth/me                                      own profile (GET, PUT)
/// /auth/change-password                         change own password (POST)
///
/// /admin/users                                  list, create (admin only)
/// /admin/users/{id}                             get, update
/// /admin/users/{id}/status                      activate / deactivate (PUT)
/// /admin/users/{id}/permissions                 brand access + permissions (PUT)
/// /admin/users/{id}/reset-password              reset password (POST)
///
/// /brands                                       list, create (create: super admin)
/// /brands/{id}                                  get, update, delete
///
/// /pages                                        list (?brand_id=), create
/// /pages/by-slug                                get by brand + slug
/// /pages/{id}                                   get, update, delete
/// /pages/{id}/revisions                         list revisions
/// /pages/{id}/revisions/{revision}              get revision
/// /pages/{id}/revisions/{revision}/diff         diff against current
/// /pages/{id}/revisions/{revision}/restore      restore (POST)
///
/// /announcements                                list (?brand_id=&active_only=), create
/// /announcements/{id}                           get, update, delete
///
/// /partnerships                                 list (?brand_id=), create
/// /partnerships/{id}                            get, update, delete
///
/// /media                                        list (?brand_id=), register URL
/// /media/upload                                 multipart upload (POST)
/// /media/{id}                                   get, update, delete
///
/// /stations                                     list (?brand_id=), create
/// /stations/{id}                                get, update, delete
/// /stations/{id}/chargers                       list, create
/// /stations/{id}/chargers/{charger_id}          get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/brands", brands::router())
        .nest("/pages", pages::router())
        .nest("/announcements", announcements::router())
        .nest("/partnerships", partnerships::router())
        .nest("/media", media::router())
        .nest("/stations", stations::router())
}
