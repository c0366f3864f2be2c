//! Payments Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Payments-specific result type alias
pub type PaymentsResult<T> = Result<T, PaymentsError>;

/// Payments-specific error variants
#[derive(Debug, Error)]
pub enum PaymentsError {
    #[error("Invalid credits package. Allowed: 10,20,50,100")]
    InvalidCreditPackage,

    #[error("Phone must be in international format starting with 254")]
    InvalidPhone,

    /// Gateway credentials or settings missing
    #[error("MPESA is not configured")]
    Config(String),

    /// The gateway answered but refused the STK push
    #[error("MPESA initiation failed")]
    GatewayRejected(String),

    /// Transport error, timeout or failed token exchange
    #[error("Failed to contact MPESA")]
    GatewayUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentsError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentsError::InvalidCreditPackage
            | PaymentsError::InvalidPhone
            | PaymentsError::GatewayRejected(_) => ErrorKind::BadRequest,
            PaymentsError::GatewayUnavailable(_) => ErrorKind::BadGateway,
            PaymentsError::Config(_) | PaymentsError::Database(_) | PaymentsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Text stored as `result_desc` when this error fails a transaction
    pub fn detail(&self) -> String {
        match self {
            PaymentsError::Config(d)
            | PaymentsError::GatewayRejected(d)
            | PaymentsError::GatewayUnavailable(d)
            | PaymentsError::Internal(d) => d.clone(),
            other => other.to_string(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let app_error = AppError::new(self.kind(), self.to_string());
        match self {
            PaymentsError::Config(d)
            | PaymentsError::GatewayRejected(d)
            | PaymentsError::GatewayUnavailable(d) => app_error.with_details(d.clone()),
            PaymentsError::Database(_) | PaymentsError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => app_error,
        }
    }

    fn log(&self) {
        match self {
            PaymentsError::Config(d) => {
                tracing::error!(details = %d, "Payment gateway misconfigured");
            }
            PaymentsError::GatewayRejected(d) => {
                tracing::warn!(details = %d, "STK push rejected by gateway");
            }
            PaymentsError::GatewayUnavailable(d) => {
                tracing::warn!(details = %d, "Payment gateway unreachable");
            }
            PaymentsError::Database(e) => {
                tracing::error!(error = %e, "Payments database error");
            }
            PaymentsError::Internal(msg) => {
                tracing::error!(message = %msg, "Payments internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Payment request rejected");
            }
        }
    }
}

impl IntoResponse for PaymentsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
