//! Route definitions for the `/pages` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Routes mounted at `/pages`.
///
/// ```text
/// GET    /                                  -> list_pages (?brand_id=)
/// POST   /                                  -> create_page
/// GET    /by-slug                           -> get_page_by_slug (?brand_id=&slug=)
/// GET    /{id}                              -> get_page
/// PUT    /{id}                              -> update_page
/// DELETE /{id}                              -> delete_page
/// GET    /{id}/revisions                    -> list_revisions
/// GET    /{id}/revisions/{revision}         -> get_revision
/// GET    /{id}/revisions/{revision}/diff    -> diff_revision
/// POST   /{id}/revisions/{revision}/restore -> restore_revision
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::list_pages).post(pages::create_page))
        .route("/by-slug", get(pages::get_page_by_slug))
        .route(
            "/{id}",
            get(pages::get_page)
                .put(pages::update_page)
                .delete(pages::delete_page),
        )
        .route("/{id}/revisions", get(pages::list_revisions))
        .route("/{id}/revisions/{revision}", get(pages::get_revision))
        .route("/{id}/revisions/{revision}/diff", get(pages::diff_revision))
        .route(
            "/{id}/revisions/{revision}/restore",
            post(pages::restore_revision),
        )
}
