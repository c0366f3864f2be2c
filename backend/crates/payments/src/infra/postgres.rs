//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{PaymentTransactionId, UserId};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::{PaymentTransaction, Settlement, Wallet};
use crate::domain::repository::{PaymentRepository, SettleOutcome, WalletRepository};
use crate::domain::value_objects::{CallbackResult, PaymentStatus, PhoneNumber};
use crate::error::{PaymentsError, PaymentsResult};

/// PostgreSQL-backed payments repository
#[derive(Clone)]
pub struct PgPaymentsRepository {
    pool: PgPool,
}

impl PgPaymentsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TRANSACTION_COLUMNS: &str = "transaction_id, user_id, amount, credits, phone, \
     checkout_request_id, merchant_request_id, status, result_code, result_desc, \
     created_at, updated_at";

// ============================================================================
// Payment Repository Implementation
// ============================================================================

impl PaymentRepository for PgPaymentsRepository {
    async fn create(&self, transaction: &PaymentTransaction) -> PaymentsResult<()> {
        sqlx::query(&format!(
            "INSERT INTO payment_transactions ({TRANSACTION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"
        ))
        .bind(transaction.transaction_id.as_uuid())
        .bind(transaction.user_id.as_uuid())
        .bind(transaction.amount)
        .bind(transaction.credits)
        .bind(transaction.phone.as_str())
        .bind(transaction.checkout_request_id.as_deref())
        .bind(transaction.merchant_request_id.as_deref())
        .bind(transaction.status.as_str())
        .bind(transaction.result_code)
        .bind(transaction.result_desc.as_deref())
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, transaction: &PaymentTransaction) -> PaymentsResult<()> {
        write_transaction(&self.pool, transaction).await
    }

    async fn settle(&self, result: &CallbackResult) -> PaymentsResult<SettleOutcome> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM payment_transactions \
             WHERE checkout_request_id = $1 FOR UPDATE"
        ))
        .bind(&result.checkout_request_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(SettleOutcome::Unknown);
        };
        let mut transaction = row.into_transaction()?;

        let credited = match transaction.apply_callback(result) {
            Settlement::Unchanged => return Ok(SettleOutcome::AlreadySettled),
            Settlement::Failed => 0,
            Settlement::Succeeded { credits } => {
                credit_wallet(&mut tx, &transaction.user_id, credits).await?;
                credits
            }
        };

        write_transaction(&mut *tx, &transaction).await?;
        tx.commit().await?;

        Ok(SettleOutcome::Settled {
            status: transaction.status,
            credited,
        })
    }

    async fn expire_pending(
        &self,
        older_than: DateTime<Utc>,
        result_desc: &str,
    ) -> PaymentsResult<u64> {
        let expired = sqlx::query(
            r#"
            UPDATE payment_transactions
            SET status = 'FAILED', result_desc = $2, updated_at = NOW()
            WHERE status = 'PENDING' AND created_at < $1
            "#,
        )
        .bind(older_than)
        .bind(result_desc)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(expired)
    }
}

async fn write_transaction<'e, E>(executor: E, transaction: &PaymentTransaction) -> PaymentsResult<()>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        UPDATE payment_transactions
        SET checkout_request_id = $2,
            merchant_request_id = $3,
            status = $4,
            result_code = $5,
            result_desc = $6,
            updated_at = $7
        WHERE transaction_id = $1
        "#,
    )
    .bind(transaction.transaction_id.as_uuid())
    .bind(transaction.checkout_request_id.as_deref())
    .bind(transaction.merchant_request_id.as_deref())
    .bind(transaction.status.as_str())
    .bind(transaction.result_code)
    .bind(transaction.result_desc.as_deref())
    .bind(transaction.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

async fn credit_wallet(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &UserId,
    credits: i32,
) -> PaymentsResult<()> {
    sqlx::query(
        r#"
        INSERT INTO wallets (user_id, balance, updated_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (user_id)
        DO UPDATE SET balance = wallets.balance + EXCLUDED.balance, updated_at = NOW()
        "#,
    )
    .bind(user_id.as_uuid())
    .bind(i64::from(credits))
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// ============================================================================
// Wallet Repository Implementation
// ============================================================================

impl WalletRepository for PgPaymentsRepository {
    async fn get_or_create(&self, user_id: &UserId) -> PaymentsResult<Wallet> {
        // The no-op update makes RETURNING yield the existing row on conflict
        let row = sqlx::query_as::<_, WalletRow>(
            r#"
            INSERT INTO wallets (user_id, balance, updated_at)
            VALUES ($1, 0, NOW())
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING user_id, balance, updated_at
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_wallet())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TransactionRow {
    transaction_id: Uuid,
    user_id: Uuid,
    amount: i32,
    credits: i32,
    phone: String,
    checkout_request_id: Option<String>,
    merchant_request_id: Option<String>,
    status: String,
    result_code: Option<i32>,
    result_desc: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_transaction(self) -> PaymentsResult<PaymentTransaction> {
        let status = PaymentStatus::parse(&self.status)
            .ok_or_else(|| PaymentsError::Internal(format!("Unknown payment status: {}", self.status)))?;

        Ok(PaymentTransaction {
            transaction_id: PaymentTransactionId::from_uuid(self.transaction_id),
            user_id: UserId::from_uuid(self.user_id),
            amount: self.amount,
            credits: self.credits,
            phone: PhoneNumber::from_db(self.phone),
            checkout_request_id: self.checkout_request_id,
            merchant_request_id: self.merchant_request_id,
            status,
            result_code: self.result_code,
            result_desc: self.result_desc,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WalletRow {
    user_id: Uuid,
    balance: i64,
    updated_at: DateTime<Utc>,
}

impl WalletRow {
    fn into_wallet(self) -> Wallet {
        Wallet {
            user_id: UserId::from_uuid(self.user_id),
            balance: self.balance,
            updated_at: self.updated_at,
        }
    }
}
