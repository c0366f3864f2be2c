//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use kernel::auth::CurrentUser;
use kernel::extract::Json as JsonBody;

use crate::application::config::AnalyzerConfig;
use crate::application::{ClassifyEssayUseCase, ExtractDocumentUseCase, ListHistoryUseCase};
use crate::domain::repository::{HistoryRepository, TextGenerator};
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::infra::docx::DocxExtractor;
use crate::presentation::dto::{
    AnalyzeRequest, AnalyzeResponse, HistoryItem, HistoryQuery, HistoryResponse, UploadResponse,
};

/// Shared state for analyzer handlers
#[derive(Clone)]
pub struct AnalyzerAppState<R, G>
where
    R: HistoryRepository + Clone + Send + Sync + 'static,
    G: TextGenerator + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub generator: Arc<G>,
    pub config: Arc<AnalyzerConfig>,
}

impl<R, G> AnalyzerAppState<R, G>
where
    R: HistoryRepository + Clone + Send + Sync + 'static,
    G: TextGenerator + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, generator: G, config: AnalyzerConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            generator: Arc::new(generator),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Analyze
// ============================================================================

/// POST /api/analyze/
pub async fn analyze<R, G>(
    State(state): State<AnalyzerAppState<R, G>>,
    user: CurrentUser,
    JsonBody(req): JsonBody<AnalyzeRequest>,
) -> AnalyzerResult<Json<AnalyzeResponse>>
where
    R: HistoryRepository + Clone + Send + Sync + 'static,
    G: TextGenerator + Clone + Send + Sync + 'static,
{
    let use_case = ClassifyEssayUseCase::new(state.repo.clone(), state.generator.clone());
    let classification = use_case.execute(user.user_id, &req.essay).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        results: classification.payload,
    }))
}

// ============================================================================
// History
// ============================================================================

/// GET /api/history/
///
/// Essay text is only included with `?include_text=1`.
pub async fn history<R, G>(
    State(state): State<AnalyzerAppState<R, G>>,
    user: CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> AnalyzerResult<Json<HistoryResponse>>
where
    R: HistoryRepository + Clone + Send + Sync + 'static,
    G: TextGenerator + Clone + Send + Sync + 'static,
{
    let include_text = query.wants_text();
    let rows = ListHistoryUseCase::new(state.repo.clone())
        .execute(user.user_id)
        .await?;

    Ok(Json(HistoryResponse {
        results: rows
            .into_iter()
            .map(|row| HistoryItem::from_history(row, include_text))
            .collect(),
    }))
}

// ============================================================================
// Upload
// ============================================================================

/// POST /api/upload-docx
pub async fn upload_docx<R, G>(
    State(state): State<AnalyzerAppState<R, G>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AnalyzerResult<Json<UploadResponse>>
where
    R: HistoryRepository + Clone + Send + Sync + 'static,
    G: TextGenerator + Clone + Send + Sync + 'static,
{
    let mut multipart = multipart.map_err(|e| AnalyzerError::InvalidUpload(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(map_multipart_error)?;

        let text = ExtractDocumentUseCase::new(DocxExtractor::new(&state.config))
            .execute(&file_name, &bytes)?;
        return Ok(Json(UploadResponse {
            success: true,
            text,
        }));
    }

    Err(AnalyzerError::MissingFile)
}

fn map_multipart_error(e: MultipartError) -> AnalyzerError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AnalyzerError::UploadTooLarge
    } else {
        AnalyzerError::InvalidUpload(e.body_text())
    }
}
