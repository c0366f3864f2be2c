//! Analyzer Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - History entity, essay value objects, classifier response parsing, ports
//! - `application/` - Use cases (classify, list history, extract document text)
//! - `infra/` - PostgreSQL history store, Gemini client, `.docx` reader
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Essay classification through one outbound generation call, recorded per user
//! - History listing that omits essay text unless asked for
//! - Plain-text extraction from uploaded `.docx` files

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::AnalyzerConfig;
pub use error::{AnalyzerError, AnalyzerResult};
pub use infra::{docx::DocxExtractor, gemini::GeminiClient, postgres::PgHistoryRepository};
pub use presentation::router::analyzer_router;

#[cfg(test)]
mod tests;
