//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every domain crate agrees on:
//! - The unified error type and its HTTP rendering
//! - Typed entity IDs
//! - The authenticated caller ([`auth::CurrentUser`])
//!
//! Only things whose meaning is the same in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;

    pub use app_error::{AppError, AppResult};
    pub use kind::ErrorKind;
}
pub mod auth;
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
