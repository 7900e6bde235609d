use crate::{routes::apply_routes, types::app_state::AppState};
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub fn gen_app(state: AppState) -> Router {
    let cors_middleware = CorsLayer::new();

    apply_routes(Router::new())
        .route("/", get(root))
        .layer(cors_middleware)
        .with_state(state)
}

// basic handler that responds with a static string
async fn root() -> &'static str {
    "Hello, World!"
}
