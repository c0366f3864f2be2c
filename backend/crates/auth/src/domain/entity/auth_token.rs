//! Auth Token Entity
//!
//! At most one token per user. Register creates it, login reuses it,
//! logout deletes it.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::token_key::TokenKey;

#[derive(Debug, Clone)]
pub struct AuthToken {
    pub key: TokenKey,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl AuthToken {
    /// New token with a random key. Storage may hand back an older token
    /// for the same user instead.
    pub fn issue(user_id: UserId) -> Self {
        Self {
            key: TokenKey::generate(),
            user_id,
            created_at: Utc::now(),
        }
    }
}
