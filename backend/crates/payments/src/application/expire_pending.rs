//! Expire Pending Use Case
//!
//! Fails PENDING transactions whose callback never arrived, so no row stays
//! PENDING forever.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};

use crate::domain::repository::PaymentRepository;
use crate::domain::services::EXPIRED_RESULT_DESC;
use crate::error::{PaymentsError, PaymentsResult};

pub struct ExpirePendingUseCase<R>
where
    R: PaymentRepository,
{
    repo: Arc<R>,
    ttl: Duration,
}

impl<R> ExpirePendingUseCase<R>
where
    R: PaymentRepository,
{
    pub fn new(repo: Arc<R>, ttl: Duration) -> Self {
        Self { repo, ttl }
    }

    /// Number of transactions moved to FAILED
    pub async fn execute(&self) -> PaymentsResult<u64> {
        let ttl = TimeDelta::from_std(self.ttl)
            .map_err(|e| PaymentsError::Internal(format!("Invalid pending TTL: {e}")))?;
        let cutoff = Utc::now() - ttl;

        let expired = self.repo.expire_pending(cutoff, EXPIRED_RESULT_DESC).await?;
        if expired > 0 {
            tracing::info!(expired, cutoff = %cutoff, "Expired stale pending payments");
        }
        Ok(expired)
    }
}
