use crate::{
    types::app_state::AppState,
    utils::{app_error::AppError, validated_json::ValidatedJson},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use super::create_route::RoutePayload;

/// Explicit-intent creation of one direction under a (found-or-created)
/// route. Unlike the legacy upsert, a duplicate (direction, sub_name) key
/// is a conflict, and the submitted bus_type overwrites the route's.
pub async fn create_direction(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RoutePayload>,
) -> Result<Response, AppError> {
    let route = state.catalog.create_direction(payload.into_input()).await?;

    if let Some(replica) = &state.replica {
        if let Err(e) = replica.sync_route_upsert(&route).await {
            warn!("Replica sync failed for route '{}': {}", route.name, e);
        }
    }

    Ok((StatusCode::OK, Json(route)).into_response())
}
