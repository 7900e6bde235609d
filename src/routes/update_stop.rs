use crate::{
    services::catalog::types::models::NewStop,
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

#[derive(Validate, Deserialize)]
pub struct UpdateStopPayload {
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

pub async fn update_stop(
    State(state): State<AppState>,
    Path(stop_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateStopPayload>,
) -> Result<Response, AppError> {
    let stop = state
        .stops
        .update(
            stop_id,
            NewStop {
                name: payload.name,
                lat: payload.lat,
                lng: payload.lng,
            },
        )
        .await?;

    if let Some(replica) = &state.replica {
        if let Err(e) = replica.sync_stop_upsert(&stop).await {
            warn!("Replica sync failed for stop {}: {}", stop.id, e);
        }
    }

    Ok((StatusCode::OK, Json(stop)).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use crate::app::test_app::test_app;

    #[tokio::test]
    async fn missing_stop_is_not_found() {
        let app = test_app(None).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/stops/42")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_string(
                            &json!({"name": "Main St", "lat": 31.95, "lng": 35.91}),
                        )
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
