//! Logout Use Case
//!
//! Deletes the caller's token. Never fails.

use std::sync::Arc;

use crate::domain::repository::TokenRepository;
use crate::domain::value_object::token_key::TokenKey;

pub struct LogoutUseCase<T>
where
    T: TokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> LogoutUseCase<T>
where
    T: TokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    /// Returns whether a token was actually deleted. Storage errors are
    /// logged and reported as `false`.
    pub async fn execute(&self, raw_token: Option<&str>) -> bool {
        let Some(key) = raw_token.and_then(TokenKey::parse) else {
            return false;
        };

        match self.token_repo.delete_if_exists(&key).await {
            Ok(deleted) => {
                if deleted {
                    tracing::info!(token = ?key, "User logged out");
                }
                deleted
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to delete token on logout");
                false
            }
        }
    }
}
