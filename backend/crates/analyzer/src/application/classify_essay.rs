//! Classify Essay Use Case
//!
//! Sends the essay to the text generator and records the result for the user.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::History;
use crate::domain::repository::{HistoryRepository, TextGenerator};
use crate::domain::services::{build_prompt, parse_classification};
use crate::domain::value_objects::{Classification, Essay};
use crate::error::AnalyzerResult;

pub struct ClassifyEssayUseCase<H, G>
where
    H: HistoryRepository,
    G: TextGenerator,
{
    history_repo: Arc<H>,
    generator: Arc<G>,
}

impl<H, G> ClassifyEssayUseCase<H, G>
where
    H: HistoryRepository,
    G: TextGenerator,
{
    pub fn new(history_repo: Arc<H>, generator: Arc<G>) -> Self {
        Self {
            history_repo,
            generator,
        }
    }

    /// Blank essays are refused before any outbound call is made.
    pub async fn execute(&self, user_id: UserId, essay_text: &str) -> AnalyzerResult<Classification> {
        let essay = Essay::new(essay_text)?;

        let raw = self.generator.generate(&build_prompt(&essay)).await?;
        let classification = parse_classification(&raw)?;

        let history = History::record(user_id, &essay, &classification);
        self.history_repo.create(&history).await?;

        tracing::info!(
            user_id = %user_id,
            history_id = %history.history_id,
            ai_probability = classification.ai_probability,
            "Essay classified"
        );

        Ok(classification)
    }
}
