//! Entities

pub mod auth_token;
pub mod credential;
pub mod user;
