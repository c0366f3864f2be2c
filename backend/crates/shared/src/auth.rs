//! Authenticated caller
//!
//! The token-resolution middleware (auth crate) inserts a [`CurrentUser`] into
//! the request extensions. Handlers of protected routes take it as an
//! extractor; anonymous requests are rejected with 401.

use crate::id::UserId;

/// Message returned when a protected route is called without a valid token.
pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub user_name: String,
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = crate::error::app_error::AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| crate::error::app_error::AppError::unauthorized(NOT_AUTHENTICATED))
    }
}
