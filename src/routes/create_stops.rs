use crate::{
    services::catalog::types::models::NewStop,
    types::app_state::AppState,
    utils::app_error::AppError,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;

#[derive(Deserialize)]
pub struct CreateStopPayload {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Batch create. Each entry becomes a fresh stop identity; repeated names
/// are distinct stops.
pub async fn create_stops(
    State(state): State<AppState>,
    Json(payload): Json<Vec<CreateStopPayload>>,
) -> Result<Response, AppError> {
    let stops = state
        .stops
        .create(
            payload
                .into_iter()
                .map(|s| NewStop {
                    name: s.name,
                    lat: s.lat,
                    lng: s.lng,
                })
                .collect(),
        )
        .await?;

    if let Some(replica) = &state.replica {
        for stop in &stops {
            if let Err(e) = replica.sync_stop_upsert(stop).await {
                warn!("Replica sync failed for stop {}: {}", stop.id, e);
            }
        }
    }

    Ok((StatusCode::OK, Json(stops)).into_response())
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

    #[tokio::test]
    async fn batch_create_assigns_ids() {
        let app = test_app(None).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/stops")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_string(&json!([
                            {"name": "Main St", "lat": 31.95, "lng": 35.91},
                            {"name": "Main St", "lat": 31.96, "lng": 35.92},
                        ]))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let stops: Vec<Stop> = serde_json::from_slice(&body).unwrap();
        assert_eq!(stops.len(), 2);
        assert_ne!(stops[0].id, stops[1].id);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stops")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
