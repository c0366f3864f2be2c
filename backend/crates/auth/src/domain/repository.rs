//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::{auth_token::AuthToken, credential::Credential, user::User};
use crate::domain::value_object::{token_key::TokenKey, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a user together with its credential, atomically.
    /// A taken user name fails with `AuthError::UserNameTaken`.
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()>;

    /// Find user by canonical user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    async fn record_login(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()>;
}

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credential>>;
}

/// Token repository trait
#[trait_variant::make(TokenRepository: Send)]
pub trait LocalTokenRepository {
    /// Store `candidate` unless the user already has a token; return the
    /// token that is now on record.
    async fn get_or_create(&self, candidate: &AuthToken) -> AuthResult<AuthToken>;

    /// Resolve a token key to its owner
    async fn find_user_by_token(&self, key: &TokenKey) -> AuthResult<Option<User>>;

    /// Delete a token. `false` when nothing matched.
    async fn delete_if_exists(&self, key: &TokenKey) -> AuthResult<bool>;
}
