//! List History Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::History;
use crate::domain::repository::HistoryRepository;
use crate::error::AnalyzerResult;

pub struct ListHistoryUseCase<H>
where
    H: HistoryRepository,
{
    history_repo: Arc<H>,
}

impl<H> ListHistoryUseCase<H>
where
    H: HistoryRepository,
{
    pub fn new(history_repo: Arc<H>) -> Self {
        Self { history_repo }
    }

    /// The caller's own rows, newest first
    pub async fn execute(&self, user_id: UserId) -> AnalyzerResult<Vec<History>> {
        self.history_repo.list_for_user(&user_id).await
    }
}
