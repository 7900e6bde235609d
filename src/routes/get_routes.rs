use crate::{types::app_state::AppState, utils::app_error::AppError};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub async fn get_routes(State(state): State<AppState>) -> Result<Response, AppError> {
    let routes = state.catalog.get_routes().await?;

    Ok((StatusCode::OK, Json(routes)).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::app::test_app::test_app;
    use crate::services::catalog::types::models::RouteOut;

    #[tokio::test]
    async fn empty_catalog_is_an_empty_list() {
        let app = test_app(None).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/routes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let routes: Vec<RouteOut> = serde_json::from_slice(&body).unwrap();
        assert!(routes.is_empty());
    }
}
