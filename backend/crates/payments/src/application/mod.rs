//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod config;
pub mod expire_pending;
pub mod get_wallet;
pub mod handle_callback;
pub mod initiate_payment;

pub use expire_pending::ExpirePendingUseCase;
pub use get_wallet::GetWalletUseCase;
pub use handle_callback::{CallbackAck, HandleCallbackUseCase};
pub use initiate_payment::{InitiatePaymentInput, InitiatePaymentOutput, InitiatePaymentUseCase};
