//! Authenticate Use Case
//!
//! Resolves an `Authorization` token to the calling user.

use std::sync::Arc;

use kernel::auth::CurrentUser;

use crate::domain::repository::TokenRepository;
use crate::domain::value_object::token_key::TokenKey;
use crate::error::AuthResult;

pub struct AuthenticateUseCase<T>
where
    T: TokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> AuthenticateUseCase<T>
where
    T: TokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    /// `Ok(None)` for malformed or unknown tokens
    pub async fn execute(&self, raw_token: &str) -> AuthResult<Option<CurrentUser>> {
        let Some(key) = TokenKey::parse(raw_token) else {
            return Ok(None);
        };

        let user = self.token_repo.find_user_by_token(&key).await?;

        Ok(user.map(|user| CurrentUser {
            user_id: user.user_id,
            user_name: user.user_name.original().to_string(),
        }))
    }
}
