//! Auth Router

use axum::{Router, routing::post};

use crate::domain::repository::{CredentialRepository, TokenRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository) -> Router {
    auth_router_generic(repo)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R) -> Router
where
    R: UserRepository + CredentialRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register/", post(handlers::register::<R>))
        .route("/login/", post(handlers::login::<R>))
        .route("/logout/", post(handlers::logout::<R>))
        .with_state(AuthAppState::new(repo))
}
