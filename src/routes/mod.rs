use axum::{
    routing::{get, post, put},
    Router,
};

use crate::types::app_state::AppState;

mod create_direction;
mod create_route;
mod create_stops;
mod delete_direction;
mod delete_route;
mod delete_stop;
mod get_route;
mod get_routes;
mod get_stops;
mod update_direction;
mod update_stop;

pub fn apply_routes(app: Router<AppState>) -> Router<AppState> {
    app.route(
        "/routes",
        post(create_route::create_route).get(get_routes::get_routes),
    )
    .route(
        "/routes/:route_id",
        get(get_route::get_route).delete(delete_route::delete_route),
    )
    .route(
        "/stops",
        get(get_stops::get_stops).post(create_stops::create_stops),
    )
    .route(
        "/stops/:stop_id",
        put(update_stop::update_stop).delete(delete_stop::delete_stop),
    )
    .route("/route", post(create_direction::create_direction))
    .route(
        "/route/:route_id/:direction_id",
        put(update_direction::update_direction).delete(delete_direction::delete_direction),
    )
}
