//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{HistoryId, UserId};

use crate::domain::value_objects::{Classification, Essay};

/// One stored classification result. Never updated after insert.
#[derive(Debug, Clone)]
pub struct History {
    pub history_id: HistoryId,
    pub user_id: UserId,
    pub essay_text: String,
    pub ai_probability: f64,
    pub reasoning: String,
    pub created_at: DateTime<Utc>,
}

impl History {
    pub fn record(user_id: UserId, essay: &Essay, classification: &Classification) -> Self {
        Self {
            history_id: HistoryId::new(),
            user_id,
            essay_text: essay.as_str().to_string(),
            ai_probability: classification.ai_probability,
            reasoning: classification.reasoning.clone(),
            created_at: Utc::now(),
        }
    }
}
