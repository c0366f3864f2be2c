//! Payments Router

use axum::Router;
use axum::routing::{get, post};

use crate::application::config::PaymentsConfig;
use crate::domain::repository::{PaymentGateway, PaymentRepository, WalletRepository};
use crate::infra::daraja::DarajaClient;
use crate::infra::postgres::PgPaymentsRepository;
use crate::presentation::handlers::{self, PaymentsAppState};

/// Create the Payments router with PostgreSQL storage and the Daraja client
pub fn payments_router(
    repo: PgPaymentsRepository,
    gateway: DarajaClient,
    config: PaymentsConfig,
) -> Router {
    payments_router_generic(repo, gateway, config)
}

/// Create a generic Payments router for any repository and gateway
pub fn payments_router_generic<R, G>(repo: R, gateway: G, config: PaymentsConfig) -> Router
where
    R: PaymentRepository + WalletRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/payments/initiate/", post(handlers::initiate::<R, G>))
        .route("/payments/callback/", post(handlers::callback::<R, G>))
        .route("/wallet/", get(handlers::wallet::<R, G>))
        .with_state(PaymentsAppState::new(repo, gateway, config))
}
