//! Domain Services
//!
//! Daraja STK-push credential helpers.

use chrono::{DateTime, Utc};

/// `AccountReference` shown on the payer's prompt
pub const ACCOUNT_REFERENCE: &str = "AIAnalyzer";

/// `result_desc` written by the expiry sweep
pub const EXPIRED_RESULT_DESC: &str = "Expired without gateway callback";

/// `YYYYMMDDHHMMSS`
pub fn stk_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d%H%M%S").to_string()
}

/// base64(short code + passkey + timestamp)
pub fn stk_password(short_code: &str, passkey: &str, timestamp: &str) -> String {
    platform::crypto::to_base64(format!("{short_code}{passkey}{timestamp}").as_bytes())
}

pub fn transaction_description(credits: i32) -> String {
    format!("Purchase {credits} credits")
}
