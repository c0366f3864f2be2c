//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// POST /payments/initiate/
///
/// Both fields are validated by the domain so numbers and strings are
/// accepted here.
#[derive(Debug, Clone, Deserialize)]
pub struct InitiateRequest {
    #[serde(default)]
    pub credits: Value,
    #[serde(default)]
    pub phone: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitiateResponse {
    pub success: bool,
    pub checkout_request_id: String,
}

/// POST /payments/callback/
#[derive(Debug, Clone, Serialize)]
pub struct CallbackResponse {
    pub status: &'static str,
}

/// GET /wallet/
#[derive(Debug, Clone, Serialize)]
pub struct WalletResponse {
    pub balance: i64,
}
