//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use kernel::auth::CurrentUser;
use kernel::extract::Json as JsonBody;

use crate::application::config::PaymentsConfig;
use crate::application::{
    GetWalletUseCase, HandleCallbackUseCase, InitiatePaymentInput, InitiatePaymentUseCase,
};
use crate::domain::repository::{PaymentGateway, PaymentRepository, WalletRepository};
use crate::error::PaymentsResult;
use crate::presentation::dto::{CallbackResponse, InitiateRequest, InitiateResponse, WalletResponse};

const CALLBACK_PATH: &str = "/api/payments/callback/";

/// Shared state for payments handlers
#[derive(Clone)]
pub struct PaymentsAppState<R, G>
where
    R: PaymentRepository + WalletRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub gateway: Arc<G>,
    pub config: Arc<PaymentsConfig>,
}

impl<R, G> PaymentsAppState<R, G>
where
    R: PaymentRepository + WalletRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, gateway: G, config: PaymentsConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            gateway: Arc::new(gateway),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Initiate
// ============================================================================

/// POST /api/payments/initiate/
pub async fn initiate<R, G>(
    State(state): State<PaymentsAppState<R, G>>,
    user: CurrentUser,
    headers: HeaderMap,
    JsonBody(req): JsonBody<InitiateRequest>,
) -> PaymentsResult<Json<InitiateResponse>>
where
    R: PaymentRepository + WalletRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let callback_url = state
        .config
        .callback_url
        .clone()
        .unwrap_or_else(|| callback_url_from_headers(&headers));

    let use_case =
        InitiatePaymentUseCase::new(state.repo.clone(), state.gateway.clone(), state.config.clone());

    let output = use_case
        .execute(
            user.user_id,
            InitiatePaymentInput {
                credits: req.credits,
                phone: req.phone,
                callback_url,
            },
        )
        .await?;

    Ok(Json(InitiateResponse {
        success: true,
        checkout_request_id: output.checkout_request_id,
    }))
}

/// `<scheme>://<host>/api/payments/callback/` as seen by the client
fn callback_url_from_headers(headers: &HeaderMap) -> String {
    let scheme = first_header_value(headers, "x-forwarded-proto").unwrap_or("http");
    let host = first_header_value(headers, "x-forwarded-host")
        .or_else(|| first_header_value(headers, header::HOST.as_str()))
        .unwrap_or("localhost");

    format!("{scheme}://{host}{CALLBACK_PATH}")
}

/// First entry of a possibly comma-separated proxy header
fn first_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Callback
// ============================================================================

/// POST /api/payments/callback/
///
/// Public; called by the gateway. The raw body is parsed here so malformed
/// payloads are acknowledged instead of rejected.
pub async fn callback<R, G>(
    State(state): State<PaymentsAppState<R, G>>,
    body: Bytes,
) -> PaymentsResult<Json<CallbackResponse>>
where
    R: PaymentRepository + WalletRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let ack = HandleCallbackUseCase::new(state.repo.clone())
        .execute(&body)
        .await?;

    Ok(Json(CallbackResponse {
        status: ack.as_str(),
    }))
}

// ============================================================================
// Wallet
// ============================================================================

/// GET /api/wallet/
pub async fn wallet<R, G>(
    State(state): State<PaymentsAppState<R, G>>,
    user: CurrentUser,
) -> PaymentsResult<Json<WalletResponse>>
where
    R: PaymentRepository + WalletRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let wallet = GetWalletUseCase::new(state.repo.clone())
        .execute(user.user_id)
        .await?;

    Ok(Json(WalletResponse {
        balance: wallet.balance,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_callback_url_from_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("api.example.test:8000"));
        assert_eq!(
            callback_url_from_headers(&headers),
            "http://api.example.test:8000/api/payments/callback/"
        );
    }

    #[test]
    fn test_callback_url_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.0.5:8000"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("pay.example.test, edge"));
        assert_eq!(
            callback_url_from_headers(&headers),
            "https://pay.example.test/api/payments/callback/"
        );
    }
}
