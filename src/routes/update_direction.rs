use crate::{
    services::catalog::types::models::DirectionUpdateInput,
    types::app_state::AppState,
    utils::{app_error::AppError, validated_json::ValidatedJson},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;
use validator::Validate;

use super::create_route::DirectionPayload;

#[derive(Validate, Deserialize)]
pub struct UpdateDirectionPayload {
    pub bus_type: String,
    #[validate(nested)]
    #[serde(flatten)]
    pub direction: DirectionPayload,
}

pub async fn update_direction(
    State(state): State<AppState>,
    Path((route_id, direction_id)): Path<(i64, i64)>,
    ValidatedJson(payload): ValidatedJson<UpdateDirectionPayload>,
) -> Result<Response, AppError> {
    let route = state
        .catalog
        .update_direction(
            route_id,
            direction_id,
            DirectionUpdateInput {
                bus_type: payload.bus_type,
                direction: payload.direction.into_input(),
            },
        )
        .await?;

    if let Some(replica) = &state.replica {
        if let Err(e) = replica.sync_route_upsert(&route).await {
            warn!("Replica sync failed for route '{}': {}", route.name, e);
        }
    }

    Ok((StatusCode::OK, Json(route)).into_response())
}
