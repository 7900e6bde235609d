use crate::{types::app_state::AppState, utils::app_error::AppError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Serialize, Deserialize)]
pub struct DeleteStopResponse {
    pub message: String,
}

/// Deletion is refused while any direction still references the stop.
pub async fn delete_stop(
    State(state): State<AppState>,
    Path(stop_id): Path<i64>,
) -> Result<Response, AppError> {
    state.stops.delete(stop_id).await?;

    if let Some(replica) = &state.replica {
        if let Err(e) = replica.sync_stop_delete(stop_id).await {
            warn!("Replica delete failed for stop {}: {}", stop_id, e);
        }
    }

    Ok((
        StatusCode::OK,
        Json(DeleteStopResponse {
            message: format!("Stop {} deleted", stop_id),
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use crate::app::test_app::test_app;
    use crate::services::catalog::types::models::Stop;

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn referenced_stop_cannot_be_deleted_until_released() {
        let app = test_app(None).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/stops",
                json!([{"name": "Main St", "lat": 31.95, "lng": 35.91}]),
            ))
            .await
            .unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let stops: Vec<Stop> = serde_json::from_slice(&body).unwrap();
        let stop_id = stops[0].id;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/routes",
                json!({
                    "name": "Line 5",
                    "bus_type": "standard",
                    "directions": {"direction": "North", "stops": [stop_id]},
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/stops/{}", stop_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        // Re-submitting the direction with an empty itinerary releases the
        // reference and the delete goes through.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/routes",
                json!({
                    "name": "Line 5",
                    "bus_type": "standard",
                    "directions": {"direction": "North", "stops": []},
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/stops/{}", stop_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_stop_is_not_found() {
        let app = test_app(None).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/stops/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
