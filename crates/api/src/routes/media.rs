//! Route definitions for the `/media` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// The upload route lifts axum's default body limit; the handler enforces
/// the configured upload limit itself while streaming the file.
///
/// ```text
/// GET    /         -> list_media (?brand_id=&kind=&folder=)
/// POST   /         -> register_media (external URL)
/// POST   /upload   -> upload_media (multipart)
/// GET    /{id}     -> get_media
/// PUT    /{id}     -> update_media
/// DELETE /{id}     -> delete_media
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list_media).post(media::register_media))
        .route(
            "/upload",
            post(media::upload_media).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/{id}",
            get(media::get_media)
                .put(media::update_media)
                .delete(media::delete_media),
        )
}
