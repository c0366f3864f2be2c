//! Request body extractors whose rejections render as [`AppError`].

use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;

/// JSON body extractor.
///
/// Same as `axum::Json` but a missing content type or a malformed body
/// becomes `400 {"error": "Invalid JSON body", "details": ...}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> axum::extract::FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => {
                Err(AppError::bad_request("Invalid JSON body").with_details(rejection.body_text()))
            }
        }
    }
}
