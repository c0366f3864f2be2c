//! Initiate Payment Use Case
//!
//! Records a PENDING transaction, then asks the gateway for an STK push.
//! Any failure after the record exists marks it FAILED.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use serde_json::Value;

use crate::application::config::PaymentsConfig;
use crate::domain::entities::PaymentTransaction;
use crate::domain::repository::{PaymentGateway, PaymentRepository, StkPushOutcome, StkPushRequest};
use crate::domain::services::{
    ACCOUNT_REFERENCE, stk_password, stk_timestamp, transaction_description,
};
use crate::domain::value_objects::{CreditPackage, PhoneNumber};
use crate::error::{PaymentsError, PaymentsResult};

pub struct InitiatePaymentInput {
    pub credits: Value,
    pub phone: Value,
    /// Where the gateway should deliver the result
    pub callback_url: String,
}

pub struct InitiatePaymentOutput {
    pub checkout_request_id: String,
    pub merchant_request_id: Option<String>,
}

pub struct InitiatePaymentUseCase<R, G>
where
    R: PaymentRepository,
    G: PaymentGateway,
{
    repo: Arc<R>,
    gateway: Arc<G>,
    config: Arc<PaymentsConfig>,
}

impl<R, G> InitiatePaymentUseCase<R, G>
where
    R: PaymentRepository,
    G: PaymentGateway,
{
    pub fn new(repo: Arc<R>, gateway: Arc<G>, config: Arc<PaymentsConfig>) -> Self {
        Self {
            repo,
            gateway,
            config,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        input: InitiatePaymentInput,
    ) -> PaymentsResult<InitiatePaymentOutput> {
        let package = CreditPackage::from_json(&input.credits)?;
        let phone = PhoneNumber::from_json(&input.phone)?;

        let mut transaction = PaymentTransaction::pending(user_id, package, phone);
        self.repo.create(&transaction).await?;

        tracing::info!(
            transaction_id = %transaction.transaction_id,
            user_id = %user_id,
            credits = transaction.credits,
            "Payment initiated"
        );

        match self.submit(&transaction, &input.callback_url).await {
            Ok(StkPushOutcome::Accepted {
                checkout_request_id,
                merchant_request_id,
                response_description,
            }) => {
                transaction.mark_submitted(
                    checkout_request_id.clone(),
                    merchant_request_id.clone(),
                    response_description,
                );
                self.repo.update(&transaction).await?;

                tracing::info!(
                    transaction_id = %transaction.transaction_id,
                    checkout_request_id = %checkout_request_id,
                    "STK push accepted"
                );

                Ok(InitiatePaymentOutput {
                    checkout_request_id,
                    merchant_request_id,
                })
            }
            Ok(StkPushOutcome::Rejected {
                status_code,
                detail,
            }) => {
                transaction.mark_failed(Some(i32::from(status_code)), detail.clone());
                self.record_failure(&transaction).await;
                Err(PaymentsError::GatewayRejected(detail))
            }
            Err(e) => {
                transaction.mark_failed(None, e.detail());
                self.record_failure(&transaction).await;
                Err(e)
            }
        }
    }

    async fn submit(
        &self,
        transaction: &PaymentTransaction,
        callback_url: &str,
    ) -> PaymentsResult<StkPushOutcome> {
        let access_token = self.gateway.access_token().await?;

        let timestamp = stk_timestamp(Utc::now());
        let password = match &self.config.password_override {
            Some(password) => password.clone(),
            None => stk_password(&self.config.short_code, &self.config.passkey, &timestamp),
        };

        let request = StkPushRequest {
            business_short_code: self.config.short_code.clone(),
            password,
            timestamp,
            amount: transaction.amount,
            phone: transaction.phone.clone(),
            callback_url: callback_url.to_string(),
            account_reference: ACCOUNT_REFERENCE.to_string(),
            description: transaction_description(transaction.credits),
        };

        self.gateway.stk_push(&access_token, &request).await
    }

    // Logged only; the gateway error is what the caller gets.
    async fn record_failure(&self, transaction: &PaymentTransaction) {
        if let Err(e) = self.repo.update(transaction).await {
            tracing::error!(
                transaction_id = %transaction.transaction_id,
                error = %e,
                "Failed to record payment failure"
            );
        }
    }
}
