//! Handle Callback Use Case
//!
//! Reconciles the gateway's asynchronous STK result with the stored
//! transaction. Malformed and unknown callbacks are acknowledged so the
//! gateway stops retrying.

use std::sync::Arc;

use crate::domain::repository::{PaymentRepository, SettleOutcome};
use crate::domain::value_objects::CallbackResult;
use crate::error::PaymentsResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAck {
    Ok,
    Ignored,
}

impl CallbackAck {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Ignored => "ignored",
        }
    }
}

pub struct HandleCallbackUseCase<R>
where
    R: PaymentRepository,
{
    repo: Arc<R>,
}

impl<R> HandleCallbackUseCase<R>
where
    R: PaymentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Only storage failures are errors
    pub async fn execute(&self, body: &[u8]) -> PaymentsResult<CallbackAck> {
        let Some(result) = CallbackResult::parse(body) else {
            tracing::warn!(bytes = body.len(), "Ignoring malformed payment callback");
            return Ok(CallbackAck::Ignored);
        };

        match self.repo.settle(&result).await? {
            SettleOutcome::Unknown => {
                tracing::warn!(
                    checkout_request_id = %result.checkout_request_id,
                    "Callback for unknown transaction"
                );
                Ok(CallbackAck::Ignored)
            }
            SettleOutcome::AlreadySettled => {
                tracing::info!(
                    checkout_request_id = %result.checkout_request_id,
                    "Duplicate callback for settled transaction"
                );
                Ok(CallbackAck::Ok)
            }
            SettleOutcome::Settled { status, credited } => {
                tracing::info!(
                    checkout_request_id = %result.checkout_request_id,
                    status = %status,
                    result_code = ?result.result_code,
                    credited,
                    "Payment settled"
                );
                Ok(CallbackAck::Ok)
            }
        }
    }
}
