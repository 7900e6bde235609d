use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::services::catalog::types::catalog_error::CatalogError;

#[derive(Debug)]
pub struct AppError {
    pub code: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(code: StatusCode, message: &str) -> Self {
        AppError {
            code,
            message: message.to_string(),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(m) => AppError::new(StatusCode::NOT_FOUND, &m),
            CatalogError::Conflict(m) => AppError::new(StatusCode::CONFLICT, &m),
            CatalogError::Database(e) => {
                error!("Database error: {}", e);
                AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            CatalogError::Io(e) => {
                error!("Attachment IO error: {}", e);
                AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

#[derive(Serialize)]
struct ResponseJson {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response<Body> {
        (
            self.code,
            Json(ResponseJson {
                message: self.message,
            }),
        )
            .into_response()
    }
}
