use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::app_error::AppError;

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = match Json::<T>::from_request(req, state).await {
            Ok(data) => data,
            Err(e) => {
                return Err(AppError::new(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid body: {}", e.body_text()).as_str(),
                ));
            }
        };

        if let Err(e) = data.validate() {
            return Err(AppError::new(
                StatusCode::BAD_REQUEST,
                format!("Invalid body: {}", e).as_str(),
            ));
        }

        Ok(ValidatedJson(data))
    }
}
