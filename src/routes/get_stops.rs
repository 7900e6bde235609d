use crate::{types::app_state::AppState, utils::app_error::AppError};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// The registry treats "no stops yet" as a reportable condition, so an
/// empty registry comes back as a 404 rather than an empty list.
pub async fn get_stops(State(state): State<AppState>) -> Result<Response, AppError> {
    let stops = state.stops.list().await?;

    Ok((StatusCode::OK, Json(stops)).into_response())
}
