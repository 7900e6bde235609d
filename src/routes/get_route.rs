use crate::{types::app_state::AppState, utils::app_error::AppError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub async fn get_route(
    State(state): State<AppState>,
    Path(route_id): Path<i64>,
) -> Result<Response, AppError> {
    let route = state.catalog.get_route(route_id).await?;

    Ok((StatusCode::OK, Json(route)).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::app::test_app::test_app;

    #[tokio::test]
    async fn missing_route_is_not_found() {
        let app = test_app(None).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/routes/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
