//! Login Use Case
//!
//! Verifies a user name and password and hands out the user's token.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entity::auth_token::AuthToken;
use crate::domain::repository::{CredentialRepository, TokenRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

pub struct LoginOutput {
    pub token: String,
    pub user_name: String,
}

pub struct LoginUseCase<U, C, T>
where
    U: UserRepository,
    C: CredentialRepository,
    T: TokenRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    token_repo: Arc<T>,
}

impl<U, C, T> LoginUseCase<U, C, T>
where
    U: UserRepository,
    C: CredentialRepository,
    T: TokenRepository,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>, token_repo: Arc<T>) -> Self {
        Self {
            user_repo,
            credential_repo,
            token_repo,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        if input.user_name.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        // Malformed names and passwords cannot match any account
        let user_name =
            UserName::new(&input.user_name).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let credential = self
            .credential_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credential not found".to_string()))?;

        if !credential.password_hash.verify(&raw_password) {
            return Err(AuthError::InvalidCredentials);
        }

        self.user_repo.record_login(&user.user_id, Utc::now()).await?;

        let token = self
            .token_repo
            .get_or_create(&AuthToken::issue(user.user_id))
            .await?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput {
            token: token.key.into_inner(),
            user_name: user.user_name.original().to_string(),
        })
    }
}
