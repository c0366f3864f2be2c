//! Analyzer Router

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::application::config::AnalyzerConfig;
use crate::domain::repository::{HistoryRepository, TextGenerator};
use crate::infra::gemini::GeminiClient;
use crate::infra::postgres::PgHistoryRepository;
use crate::presentation::handlers::{self, AnalyzerAppState};

/// Create the Analyzer router with PostgreSQL history and the Gemini client
pub fn analyzer_router(
    repo: PgHistoryRepository,
    generator: GeminiClient,
    config: AnalyzerConfig,
) -> Router {
    analyzer_router_generic(repo, generator, config)
}

/// Create a generic Analyzer router for any repository and generator
pub fn analyzer_router_generic<R, G>(repo: R, generator: G, config: AnalyzerConfig) -> Router
where
    R: HistoryRepository + Clone + Send + Sync + 'static,
    G: TextGenerator + Clone + Send + Sync + 'static,
{
    let upload_limit = config.upload_max_bytes;

    Router::new()
        .route("/analyze/", post(handlers::analyze::<R, G>))
        .route("/history/", get(handlers::history::<R, G>))
        .route(
            "/upload-docx",
            post(handlers::upload_docx::<R, G>).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(AnalyzerAppState::new(repo, generator, config))
}
