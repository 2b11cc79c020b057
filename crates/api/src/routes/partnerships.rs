//! Route definitions for the `/partnerships` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::partnerships;
use crate::state::AppState;

/// Routes mounted at `/partnerships`.
///
/// ```text
/// GET    /        -> list_partnerships (?brand_id=&category=&is_active=)
/// POST   /        -> create_partnership
/// GET    /{id}    -> get_partnership
/// PUT    /{id}    -> update_partnership
/// DELETE /{id}    -> delete_partnership
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(partnerships::list_partnerships).post(partnerships::create_partnership),
        )
        .route(
            "/{id}",
            get(partnerships::get_partnership)
                .put(partnerships::update_partnership)
                .delete(partnerships::delete_partnership),
        )
}
