//! Repository and Gateway Traits
//!
//! Interfaces for persistence and the payment gateway. Implementations are
//! in the infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entities::{PaymentTransaction, Wallet};
use crate::domain::value_objects::{CallbackResult, PaymentStatus, PhoneNumber};
use crate::error::PaymentsResult;

/// What a callback did to the stored transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// No transaction with that checkout request id
    Unknown,
    /// Transaction was already SUCCESS or FAILED
    AlreadySettled,
    /// Transaction moved to `status`; `credited` credits were added to the wallet
    Settled { status: PaymentStatus, credited: i32 },
}

/// Payment transaction repository trait
#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    /// Insert a new transaction
    async fn create(&self, transaction: &PaymentTransaction) -> PaymentsResult<()>;

    /// Persist gateway ids, status and result fields
    async fn update(&self, transaction: &PaymentTransaction) -> PaymentsResult<()>;

    /// Apply a callback under a row lock; the status change and the wallet
    /// credit commit together
    async fn settle(&self, result: &CallbackResult) -> PaymentsResult<SettleOutcome>;

    /// Fail every PENDING transaction created before `older_than`
    async fn expire_pending(
        &self,
        older_than: DateTime<Utc>,
        result_desc: &str,
    ) -> PaymentsResult<u64>;
}

/// Wallet repository trait
#[trait_variant::make(WalletRepository: Send)]
pub trait LocalWalletRepository {
    /// Existing wallet, or a new empty one
    async fn get_or_create(&self, user_id: &UserId) -> PaymentsResult<Wallet>;
}

/// STK-push request as the gateway needs it
#[derive(Debug, Clone)]
pub struct StkPushRequest {
    pub business_short_code: String,
    pub password: String,
    pub timestamp: String,
    pub amount: i32,
    pub phone: PhoneNumber,
    pub callback_url: String,
    pub account_reference: String,
    pub description: String,
}

/// Gateway answer to an STK push
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StkPushOutcome {
    Accepted {
        checkout_request_id: String,
        merchant_request_id: Option<String>,
        response_description: Option<String>,
    },
    Rejected {
        status_code: u16,
        detail: String,
    },
}

/// Mobile-money gateway port
#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    /// OAuth bearer token for the next call
    async fn access_token(&self) -> PaymentsResult<String>;

    async fn stk_push(
        &self,
        access_token: &str,
        request: &StkPushRequest,
    ) -> PaymentsResult<StkPushOutcome>;
}
