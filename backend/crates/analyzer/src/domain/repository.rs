//! Repository and Port Traits
//!
//! Interfaces for persistence and outbound calls. Implementations are in the
//! infrastructure layer.

use kernel::id::UserId;

use crate::domain::entities::History;
use crate::error::AnalyzerResult;

/// History repository trait
#[trait_variant::make(HistoryRepository: Send)]
pub trait LocalHistoryRepository {
    /// Insert a new history row
    async fn create(&self, history: &History) -> AnalyzerResult<()>;

    /// All rows owned by the user, newest first
    async fn list_for_user(&self, user_id: &UserId) -> AnalyzerResult<Vec<History>>;
}

/// Text generation port (the external classifier)
#[trait_variant::make(TextGenerator: Send)]
pub trait LocalTextGenerator {
    /// Send a prompt and return the model's raw text answer
    async fn generate(&self, prompt: &str) -> AnalyzerResult<String>;
}

/// Plain-text extraction from an uploaded document
pub trait DocumentTextExtractor {
    fn extract(&self, bytes: &[u8]) -> AnalyzerResult<String>;
}
