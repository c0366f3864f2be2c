//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{PaymentTransactionId, UserId};

use crate::domain::value_objects::{CallbackResult, CreditPackage, PaymentStatus, PhoneNumber};

/// Outcome of applying a gateway callback to a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Already terminal, nothing changed
    Unchanged,
    /// Now SUCCESS; the wallet must be credited with `credits`
    Succeeded { credits: i32 },
    /// Now FAILED
    Failed,
}

/// One STK-push purchase attempt
///
/// PENDING -> SUCCESS | FAILED. Terminal states never change again.
#[derive(Debug, Clone)]
pub struct PaymentTransaction {
    pub transaction_id: PaymentTransactionId,
    pub user_id: UserId,
    pub amount: i32,
    pub credits: i32,
    pub phone: PhoneNumber,
    pub checkout_request_id: Option<String>,
    pub merchant_request_id: Option<String>,
    pub status: PaymentStatus,
    pub result_code: Option<i32>,
    pub result_desc: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentTransaction {
    pub fn pending(user_id: UserId, package: CreditPackage, phone: PhoneNumber) -> Self {
        let now = Utc::now();
        Self {
            transaction_id: PaymentTransactionId::new(),
            user_id,
            amount: package.amount(),
            credits: package.credits(),
            phone,
            checkout_request_id: None,
            merchant_request_id: None,
            status: PaymentStatus::Pending,
            result_code: None,
            result_desc: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Gateway accepted the push; status stays PENDING until the callback
    pub fn mark_submitted(
        &mut self,
        checkout_request_id: String,
        merchant_request_id: Option<String>,
        response_description: Option<String>,
    ) {
        self.checkout_request_id = Some(checkout_request_id);
        self.merchant_request_id = merchant_request_id;
        self.result_desc = response_description;
        self.updated_at = Utc::now();
    }

    /// Initiation failed before the gateway took the request
    pub fn mark_failed(&mut self, result_code: Option<i32>, result_desc: String) {
        if self.is_terminal() {
            return;
        }
        self.status = PaymentStatus::Failed;
        if result_code.is_some() {
            self.result_code = result_code;
        }
        self.result_desc = Some(result_desc);
        self.updated_at = Utc::now();
    }

    pub fn apply_callback(&mut self, result: &CallbackResult) -> Settlement {
        if self.is_terminal() {
            return Settlement::Unchanged;
        }

        self.result_code = result.result_code;
        self.result_desc = result.result_desc.clone();
        self.updated_at = Utc::now();

        if result.is_success() {
            self.status = PaymentStatus::Success;
            Settlement::Succeeded {
                credits: self.credits,
            }
        } else {
            self.status = PaymentStatus::Failed;
            Settlement::Failed
        }
    }
}

/// Credit balance, one per user, created on first access
#[derive(Debug, Clone)]
pub struct Wallet {
    pub user_id: UserId,
    pub balance: i64,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            balance: 0,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PaymentTransaction {
        PaymentTransaction::pending(
            UserId::new(),
            CreditPackage::Fifty,
            PhoneNumber::new("254712345678").unwrap(),
        )
    }

    fn callback(code: Option<i32>) -> CallbackResult {
        CallbackResult {
            checkout_request_id: "ws_CO_1".to_string(),
            result_code: code,
            result_desc: Some("desc".to_string()),
        }
    }

    #[test]
    fn test_pending_amount_matches_credits() {
        let txn = pending();
        assert_eq!(txn.amount, 50);
        assert_eq!(txn.credits, 50);
        assert_eq!(txn.status, PaymentStatus::Pending);
    }

    #[test]
    fn test_success_callback() {
        let mut txn = pending();
        assert_eq!(
            txn.apply_callback(&callback(Some(0))),
            Settlement::Succeeded { credits: 50 }
        );
        assert_eq!(txn.status, PaymentStatus::Success);
        assert_eq!(txn.result_code, Some(0));
        assert_eq!(txn.result_desc.as_deref(), Some("desc"));
    }

    #[test]
    fn test_failure_callback() {
        let mut txn = pending();
        assert_eq!(txn.apply_callback(&callback(Some(1032))), Settlement::Failed);
        assert_eq!(txn.status, PaymentStatus::Failed);

        let mut txn = pending();
        assert_eq!(txn.apply_callback(&callback(None)), Settlement::Failed);
    }

    #[test]
    fn test_terminal_state_never_changes() {
        let mut txn = pending();
        txn.apply_callback(&callback(Some(1)));
        assert_eq!(txn.apply_callback(&callback(Some(0))), Settlement::Unchanged);
        assert_eq!(txn.status, PaymentStatus::Failed);
        assert_eq!(txn.result_code, Some(1));

        let mut txn = pending();
        txn.apply_callback(&callback(Some(0)));
        txn.mark_failed(None, "late failure".to_string());
        assert_eq!(txn.status, PaymentStatus::Success);
    }

    #[test]
    fn test_mark_submitted_stays_pending() {
        let mut txn = pending();
        txn.mark_submitted(
            "ws_CO_1".to_string(),
            Some("29115-34620561-1".to_string()),
            Some("Success. Request accepted for processing".to_string()),
        );
        assert_eq!(txn.status, PaymentStatus::Pending);
        assert_eq!(txn.checkout_request_id.as_deref(), Some("ws_CO_1"));
    }
}
