use crate::{
    services::catalog::types::models::DirectionDeleteOutcome, types::app_state::AppState,
    utils::app_error::AppError,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Serialize, Deserialize)]
pub struct DeleteDirectionResponse {
    pub message: String,
}

pub async fn delete_direction(
    State(state): State<AppState>,
    Path((route_id, direction_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let outcome = state
        .catalog
        .delete_direction(route_id, direction_id)
        .await?;

    if let Some(replica) = &state.replica {
        let result = match outcome {
            DirectionDeleteOutcome::DirectionDeleted => {
                replica.sync_direction_delete(direction_id).await
            }
            DirectionDeleteOutcome::DirectionAndRouteDeleted => {
                replica.sync_route_delete(route_id, &[direction_id]).await
            }
        };
        if let Err(e) = result {
            warn!("Replica delete failed for direction {}: {}", direction_id, e);
        }
    }

    let message = match outcome {
        DirectionDeleteOutcome::DirectionDeleted => "direction deleted",
        DirectionDeleteOutcome::DirectionAndRouteDeleted => "direction and route deleted",
    };

    Ok((
        StatusCode::OK,
        Json(DeleteDirectionResponse {
            message: message.to_string(),
        }),
    )
        .into_response())
}
