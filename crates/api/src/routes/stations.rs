//! Route definitions for the `/stations` resource and its nested chargers.

use axum::routing::get;
use axum::Router;

use crate::handlers::{chargers, stations};
use crate::state::AppState;

/// Routes mounted at `/stations`.
///
/// ```text
/// GET    /                              -> list_stations (?brand_id=&city=&is_active=)
/// POST   /                              -> create_station
/// GET    /{id}                          -> get_station
/// PUT    /{id}                          -> update_station
/// DELETE /{id}                          -> delete_station
/// GET    /{id}/chargers                 -> list_chargers
/// POST   /{id}/chargers                 -> create_charger
/// GET    /{id}/chargers/{charger_id}    -> get_charger
/// PUT    /{id}/chargers/{charger_id}    -> update_charger
/// DELETE /{id}/chargers/{charger_id}    -> delete_charger
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stations::list_stations).post(stations::create_station))
        .route(
            "/{id}",
            get(stations::get_station)
                .put(stations::update_station)
                .delete(stations::delete_station),
        )
        .route(
            "/{id}/chargers",
            get(chargers::list_chargers).post(chargers::create_charger),
        )
        .route(
            "/{id}/chargers/{charger_id}",
            get(chargers::get_charger)
                .put(chargers::update_charger)
                .delete(chargers::delete_charger),
        )
}
