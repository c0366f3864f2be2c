//! Register Use Case
//!
//! Creates a new user account and its API token.

use std::sync::Arc;

use crate::domain::entity::{auth_token::AuthToken, credential::Credential, user::User};
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub user_name: String,
    pub email: Option<String>,
    pub password: String,
}

/// Token plus the user name as stored
pub struct RegisterOutput {
    pub token: String,
    pub user_name: String,
}

pub struct RegisterUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
}

impl<U, T> RegisterUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>) -> Self {
        Self {
            user_repo,
            token_repo,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        if input.user_name.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::InvalidUserName(e.to_string()))?;

        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let email = Email::parse_optional(input.email.as_deref()).map_err(AuthError::InvalidEmail)?;

        let raw_password =
            RawPassword::new(input.password).map_err(|e| AuthError::InvalidPassword(e.to_string()))?;
        let password_hash =
            UserPassword::from_raw(&raw_password).map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(user_name, email);
        let credential = Credential::new(user.user_id, password_hash);

        // A concurrent registration can still win the race; storage reports
        // that as UserNameTaken.
        self.user_repo.create(&user, &credential).await?;

        let token = self
            .token_repo
            .get_or_create(&AuthToken::issue(user.user_id))
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(RegisterOutput {
            token: token.key.into_inner(),
            user_name: user.user_name.original().to_string(),
        })
    }
}
