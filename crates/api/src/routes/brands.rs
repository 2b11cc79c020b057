//! Route definitions for the `/brands` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::brands;
use crate::state::AppState;

/// Routes mounted at `/brands`.
///
/// ```text
/// GET    /        -> list_brands
/// POST   /        -> create_brand (super admin)
/// GET    /{id}    -> get_brand
/// PUT    /{id}    -> update_brand (super admin)
/// DELETE /{id}    -> delete_brand (super admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(brands::list_brands).post(brands::create_brand))
        .route(
            "/{id}",
            get(brands::get_brand)
                .put(brands::update_brand)
                .delete(brands::delete_brand),
        )
}
