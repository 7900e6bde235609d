use crate::{
    services::catalog::types::models::{DirectionInput, RouteUpsertInput},
    types::app_state::AppState,
    utils::{app_error::AppError, validated_json::ValidatedJson},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
#[cfg(test)]
use axum_macros::debug_handler;
use serde::Deserialize;
use tracing::warn;
use validator::Validate;

#[derive(Validate, Deserialize)]
pub struct DirectionPayload {
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub direction: String,
    pub sub_name: Option<String>,
    pub gpx: Option<String>,
    pub tik_price: Option<String>,
    pub distance: Option<String>,
    #[serde(default)]
    pub stops: Vec<i64>,
}

impl DirectionPayload {
    pub fn into_input(self) -> DirectionInput {
        DirectionInput {
            direction: self.direction,
            sub_name: self.sub_name,
            gpx: self.gpx,
            tik_price: self.tik_price,
            distance: self.distance,
            stops: self.stops,
        }
    }
}

#[derive(Validate, Deserialize)]
pub struct RoutePayload {
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub name: String,
    pub bus_type: String,
    #[validate(nested)]
    pub directions: DirectionPayload,
}

impl RoutePayload {
    pub fn into_input(self) -> RouteUpsertInput {
        RouteUpsertInput {
            name: self.name,
            bus_type: self.bus_type,
            direction: self.directions.into_input(),
        }
    }
}

/// Legacy flattened upsert: find-or-create the route by name and upsert
/// its single submitted direction.
#[cfg_attr(test, debug_handler)]
pub async fn create_route(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RoutePayload>,
) -> Result<Response, AppError> {
    let route = state.catalog.upsert_route(payload.into_input()).await?;

    if let Some(replica) = &state.replica {
        if let Err(e) = replica.sync_route_upsert(&route).await {
            warn!("Replica sync failed for route '{}': {}", route.name, e);
        }
    }

    Ok((StatusCode::OK, Json(route)).into_response())
}
