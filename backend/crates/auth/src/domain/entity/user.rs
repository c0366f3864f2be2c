//! User Entity
//!
//! Registered account. Credentials live in [`super::credential::Credential`].

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_name::UserName};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique on its canonical form
    pub user_name: UserName,
    pub email: Option<Email>,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_name: UserName, email: Option<Email>) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            last_login_at: None,
            created_at: Utc::now(),
        }
    }
}
