//! Domain Value Objects

use std::fmt;

use serde_json::Value;

use crate::error::{PaymentsError, PaymentsResult};

// ============================================================================
// CreditPackage
// ============================================================================

/// One of the purchasable credit bundles. Priced 1 KES per credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditPackage {
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl CreditPackage {
    pub fn from_credits(credits: i64) -> PaymentsResult<Self> {
        match credits {
            10 => Ok(Self::Ten),
            20 => Ok(Self::Twenty),
            50 => Ok(Self::Fifty),
            100 => Ok(Self::Hundred),
            _ => Err(PaymentsError::InvalidCreditPackage),
        }
    }

    /// Accepts a JSON number or a numeric string
    pub fn from_json(value: &Value) -> PaymentsResult<Self> {
        let credits = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        credits
            .ok_or(PaymentsError::InvalidCreditPackage)
            .and_then(Self::from_credits)
    }

    pub fn credits(self) -> i32 {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }

    /// Charge in KES
    pub fn amount(self) -> i32 {
        self.credits()
    }
}

// ============================================================================
// PhoneNumber
// ============================================================================

/// Kenyan MSISDN in international form, digits only (`2547XXXXXXXX`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

const COUNTRY_CODE: &str = "254";
/// `254` plus a nine-digit subscriber number
const MIN_PHONE_DIGITS: usize = 12;
const MAX_PHONE_DIGITS: usize = 15;

impl PhoneNumber {
    pub fn new(raw: &str) -> PaymentsResult<Self> {
        let phone = raw.trim();
        let valid = phone.starts_with(COUNTRY_CODE)
            && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&phone.len())
            && phone.bytes().all(|b| b.is_ascii_digit());
        if !valid {
            return Err(PaymentsError::InvalidPhone);
        }
        Ok(Self(phone.to_string()))
    }

    /// Accepts a JSON string or an unsigned integer
    pub fn from_json(value: &Value) -> PaymentsResult<Self> {
        match value {
            Value::String(s) => Self::new(s),
            Value::Number(n) => n
                .as_u64()
                .map(|n| n.to_string())
                .ok_or(PaymentsError::InvalidPhone)
                .and_then(|s| Self::new(&s)),
            _ => Err(PaymentsError::InvalidPhone),
        }
    }

    pub fn from_db(phone: String) -> Self {
        Self(phone)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// PaymentStatus
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "SUCCESS" => Some(Self::Success),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CallbackResult
// ============================================================================

/// The parts of a Daraja `stkCallback` the reconciler needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackResult {
    pub checkout_request_id: String,
    pub result_code: Option<i32>,
    pub result_desc: Option<String>,
}

impl CallbackResult {
    /// `None` for anything that is not `{"Body":{"stkCallback":{...CheckoutRequestID...}}}`
    pub fn parse(body: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(body).ok()?;
        let callback = value.get("Body")?.get("stkCallback")?;

        let checkout_request_id = callback
            .get("CheckoutRequestID")?
            .as_str()
            .map(str::trim)
            .filter(|id| !id.is_empty())?
            .to_string();

        let result_code = match callback.get("ResultCode") {
            Some(Value::Number(n)) => n.as_i64().and_then(|c| i32::try_from(c).ok()),
            Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
            _ => None,
        };

        let result_desc = callback
            .get("ResultDesc")
            .and_then(Value::as_str)
            .map(str::to_string);

        Some(Self {
            checkout_request_id,
            result_code,
            result_desc,
        })
    }

    /// Result code 0 is the only success
    pub fn is_success(&self) -> bool {
        self.result_code == Some(0)
    }
}
