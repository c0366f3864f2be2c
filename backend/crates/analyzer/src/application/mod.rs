//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod classify_essay;
pub mod config;
pub mod extract_document;
pub mod list_history;

pub use classify_essay::ClassifyEssayUseCase;
pub use extract_document::ExtractDocumentUseCase;
pub use list_history::ListHistoryUseCase;
