//! Auth Middleware
//!
//! Resolves the `Authorization` token on every request and, when it
//! belongs to a user, stores a [`CurrentUser`] in the request extensions.
//! Routes decide for themselves whether a user is required. A failed lookup
//! leaves the request anonymous; protected routes then answer 401.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use kernel::auth::CurrentUser;

use crate::application::AuthenticateUseCase;
use crate::domain::repository::{CredentialRepository, TokenRepository, UserRepository};
use crate::presentation::handlers::AuthAppState;

pub async fn resolve_current_user<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + CredentialRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    // Never trust a CurrentUser that did not come from this middleware
    req.extensions_mut().remove::<CurrentUser>();

    if let Some(token) = platform::bearer::extract_token(req.headers()) {
        let use_case = AuthenticateUseCase::new(state.repo.clone());
        match use_case.execute(&token).await {
            Ok(Some(user)) => {
                tracing::debug!(user_id = %user.user_id, "Request authenticated");
                req.extensions_mut().insert(user);
            }
            Ok(None) => {
                tracing::debug!("Unknown token, continuing anonymously");
            }
            Err(e) => {
                tracing::error!(error = %e, "Token lookup failed, continuing anonymously");
            }
        }
    }

    next.run(req).await
}
