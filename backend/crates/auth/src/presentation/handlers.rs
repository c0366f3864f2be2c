//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use kernel::extract::Json as JsonBody;
use std::sync::Arc;

use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::{CredentialRepository, TokenRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{LoginRequest, LogoutResponse, RegisterRequest, TokenResponse};

/// Shared state for auth handlers and the token middleware
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + CredentialRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + CredentialRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register/
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<TokenResponse>)>
where
    R: UserRepository + CredentialRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.repo.clone());

    let output = use_case
        .execute(RegisterInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token: output.token,
            username: output.user_name,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login/
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + CredentialRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());

    let output = use_case
        .execute(LoginInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: output.token,
        username: output.user_name,
    }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout/
///
/// Always succeeds, with or without a valid token.
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Json<LogoutResponse>
where
    R: UserRepository + CredentialRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let token = platform::bearer::extract_token(&headers);

    let use_case = LogoutUseCase::new(state.repo.clone());
    use_case.execute(token.as_deref()).await;

    Json(LogoutResponse { success: true })
}
