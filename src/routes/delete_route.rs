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
pub struct DeleteRouteResponse {
    pub message: String,
}

pub async fn delete_route(
    State(state): State<AppState>,
    Path(route_id): Path<i64>,
) -> Result<Response, AppError> {
    let deleted = state.catalog.delete_route(route_id).await?;

    if let Some(replica) = &state.replica {
        if let Err(e) = replica
            .sync_route_delete(route_id, &deleted.direction_ids)
            .await
        {
            warn!("Replica delete failed for route '{}': {}", deleted.name, e);
        }
    }

    Ok((
        StatusCode::OK,
        Json(DeleteRouteResponse {
            message: format!("Route '{}' deleted successfully", deleted.name),
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
    use crate::services::catalog::types::models::RouteOut;

    use super::*;

    #[tokio::test]
    async fn delete_cascades_and_reports_route_name() {
        let app = test_app(None).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/routes")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_string(&json!({
                            "name": "Line 5",
                            "bus_type": "standard",
                            "directions": {"direction": "North", "stops": []},
                        }))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let route: RouteOut = serde_json::from_slice(&body).unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/routes/{}", route.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: DeleteRouteResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.message, "Route 'Line 5' deleted successfully");

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/routes/{}", route.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_route_is_not_found() {
        let app = test_app(None).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/routes/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
