//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Register / login with user name + password, answered with an opaque token
//! - Logout that deletes the token and never fails
//! - A request middleware that turns `Authorization: Token <key>` into a
//!   [`kernel::auth::CurrentUser`]
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - One token per user, 160 bits from the OS RNG
//! - Unknown user and wrong password produce the same error

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;
