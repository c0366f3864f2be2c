//! Payments Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Payment transaction state machine, wallet, ports
//! - `application/` - Use cases (initiate, callback, wallet, expiry sweep)
//! - `infra/` - PostgreSQL store, Daraja (M-Pesa) client
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Flow
//! 1. `initiate` records a PENDING transaction and asks the gateway to push a
//!    PIN prompt to the payer's phone
//! 2. The gateway later calls `callback`; under a row lock the transaction
//!    becomes SUCCESS or FAILED and a success credits the wallet once
//! 3. PENDING rows that never got a callback are failed by the expiry sweep

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::{GatewayCredentials, PaymentsConfig};
pub use application::expire_pending::ExpirePendingUseCase;
pub use error::{PaymentsError, PaymentsResult};
pub use infra::{daraja::DarajaClient, postgres::PgPaymentsRepository};
pub use presentation::router::payments_router;
