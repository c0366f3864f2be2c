//! Infrastructure Layer
//!
//! PostgreSQL store and the Daraja HTTP client.

pub mod daraja;
pub mod postgres;
