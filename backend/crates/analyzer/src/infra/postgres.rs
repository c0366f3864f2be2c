//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{HistoryId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::History;
use crate::domain::repository::HistoryRepository;
use crate::error::AnalyzerResult;

/// PostgreSQL-backed history repository
#[derive(Clone)]
pub struct PgHistoryRepository {
    pool: PgPool,
}

impl PgHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl HistoryRepository for PgHistoryRepository {
    async fn create(&self, history: &History) -> AnalyzerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO analysis_history (
                history_id,
                user_id,
                essay_text,
                ai_probability,
                reasoning,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(history.history_id.as_uuid())
        .bind(history.user_id.as_uuid())
        .bind(&history.essay_text)
        .bind(history.ai_probability)
        .bind(&history.reasoning)
        .bind(history.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> AnalyzerResult<Vec<History>> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT
                history_id,
                user_id,
                essay_text,
                ai_probability,
                reasoning,
                created_at
            FROM analysis_history
            WHERE user_id = $1
            ORDER BY created_at DESC, history_id DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HistoryRow::into_history).collect())
    }
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    history_id: Uuid,
    user_id: Uuid,
    essay_text: String,
    ai_probability: f64,
    reasoning: String,
    created_at: DateTime<Utc>,
}

impl HistoryRow {
    fn into_history(self) -> History {
        History {
            history_id: HistoryId::from_uuid(self.history_id),
            user_id: UserId::from_uuid(self.user_id),
            essay_text: self.essay_text,
            ai_probability: self.ai_probability,
            reasoning: self.reasoning,
            created_at: self.created_at,
        }
    }
}
