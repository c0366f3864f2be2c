//! Unit tests for the analyzer crate

#[cfg(test)]
mod support {
    use std::io::{Cursor, Write};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use kernel::id::UserId;

    use crate::domain::entities::History;
    use crate::domain::repository::{HistoryRepository, TextGenerator};
    use crate::error::{AnalyzerError, AnalyzerResult};

    /// In-memory stand-in for `PgHistoryRepository`
    #[derive(Clone, Default)]
    pub struct MemoryHistoryRepository {
        pub rows: Arc<Mutex<Vec<History>>>,
    }

    impl MemoryHistoryRepository {
        pub fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    impl HistoryRepository for MemoryHistoryRepository {
        async fn create(&self, history: &History) -> AnalyzerResult<()> {
            self.rows.lock().unwrap().push(history.clone());
            Ok(())
        }

        async fn list_for_user(&self, user_id: &UserId) -> AnalyzerResult<Vec<History>> {
            let mut rows: Vec<History> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|h| h.user_id == *user_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }
    }

    /// Generator that answers with a canned reply and counts calls
    #[derive(Clone)]
    pub struct ScriptedGenerator {
        reply: Result<String, String>,
        pub calls: Arc<AtomicUsize>,
    }

    impl ScriptedGenerator {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn failing(details: &str) -> Self {
            Self {
                reply: Err(details.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, _prompt: &str) -> AnalyzerResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(AnalyzerError::Upstream)
        }
    }

    /// Minimal `.docx` container holding only `word/document.xml`
    pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );

        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use kernel::id::UserId;

    use super::support::{MemoryHistoryRepository, ScriptedGenerator, docx_with_paragraphs};
    use crate::application::{ClassifyEssayUseCase, ExtractDocumentUseCase, ListHistoryUseCase};
    use crate::error::AnalyzerError;
    use crate::infra::docx::DocxExtractor;

    #[tokio::test]
    async fn test_empty_essay_makes_no_outbound_call() {
        let repo = MemoryHistoryRepository::default();
        let generator = ScriptedGenerator::replying("{}");
        let use_case = ClassifyEssayUseCase::new(Arc::new(repo.clone()), Arc::new(generator.clone()));

        for essay in ["", "   ", "\n\t"] {
            let result = use_case.execute(UserId::new(), essay).await;
            assert!(matches!(result, Err(AnalyzerError::EmptyEssay)));
        }

        assert_eq!(generator.call_count(), 0);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_fenced_reply_is_recorded() {
        let repo = MemoryHistoryRepository::default();
        let generator = ScriptedGenerator::replying(
            "```json\n{\"ai_probability\": 0.9, \"reasoning\": \"Low burstiness\"}\n```",
        );
        let use_case = ClassifyEssayUseCase::new(Arc::new(repo.clone()), Arc::new(generator));
        let user_id = UserId::new();

        let classification = use_case.execute(user_id, "An essay.").await.unwrap();
        assert_eq!(classification.ai_probability, 0.9);

        let rows = repo.rows.lock().unwrap().clone();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, user_id);
        assert_eq!(rows[0].essay_text, "An essay.");
        assert_eq!(rows[0].reasoning, "Low burstiness");
    }

    #[tokio::test]
    async fn test_upstream_failure_records_nothing() {
        let repo = MemoryHistoryRepository::default();
        let use_case = ClassifyEssayUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(ScriptedGenerator::failing("HTTP 503")),
        );

        let result = use_case.execute(UserId::new(), "An essay.").await;
        assert!(matches!(result, Err(AnalyzerError::Upstream(_))));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_unparsable_reply_records_nothing() {
        let repo = MemoryHistoryRepository::default();
        let use_case = ClassifyEssayUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(ScriptedGenerator::replying("I think it is human.")),
        );

        let result = use_case.execute(UserId::new(), "An essay.").await;
        assert!(matches!(result, Err(AnalyzerError::Upstream(_))));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_history_only_lists_own_rows() {
        let repo = MemoryHistoryRepository::default();
        let classify = ClassifyEssayUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(ScriptedGenerator::replying(r#"{"ai_probability": 0.1}"#)),
        );
        let alice = UserId::new();
        let bob = UserId::new();

        classify.execute(alice, "first").await.unwrap();
        classify.execute(bob, "other").await.unwrap();
        classify.execute(alice, "second").await.unwrap();

        let rows = ListHistoryUseCase::new(Arc::new(repo)).execute(alice).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|h| h.user_id == alice));
        assert!(rows[0].created_at >= rows[1].created_at);
    }

    #[test]
    fn test_docx_paragraphs_separated_by_blank_line() {
        let bytes = docx_with_paragraphs(&["P1", "P2"]);
        let text = ExtractDocumentUseCase::new(DocxExtractor::default())
            .execute("essay.docx", &bytes)
            .unwrap();
        assert_eq!(text, "P1\n\nP2");
    }

    #[test]
    fn test_docx_surrounding_whitespace_trimmed() {
        let bytes = docx_with_paragraphs(&["", "  Body  ", ""]);
        let text = ExtractDocumentUseCase::new(DocxExtractor::default())
            .execute("essay.docx", &bytes)
            .unwrap();
        assert_eq!(text, "Body");
    }

    #[test]
    fn test_wrong_extension_rejected_before_parsing() {
        let bytes = docx_with_paragraphs(&["P1"]);
        let result = ExtractDocumentUseCase::new(DocxExtractor::default()).execute("essay.pdf", &bytes);
        assert!(matches!(result, Err(AnalyzerError::UnsupportedFile)));
    }

    #[test]
    fn test_zip_without_document_part() {
        use std::io::{Cursor, Write};

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("readme.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hello").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let result = ExtractDocumentUseCase::new(DocxExtractor::default()).execute("essay.docx", &bytes);
        assert!(matches!(result, Err(AnalyzerError::MalformedDocument(_))));
    }
}

#[cfg(test)]
mod http_tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::{Extension, Router};
    use kernel::auth::CurrentUser;
    use kernel::id::UserId;
    use tower::ServiceExt;

    use super::support::{MemoryHistoryRepository, ScriptedGenerator, docx_with_paragraphs};
    use crate::application::config::AnalyzerConfig;
    use crate::presentation::analyzer_router_generic;

    const BOUNDARY: &str = "essayboundary";

    fn app(repo: MemoryHistoryRepository, generator: ScriptedGenerator) -> Router {
        analyzer_router_generic(repo, generator, AnalyzerConfig::default())
    }

    fn signed_in(router: Router, user_id: UserId) -> Router {
        router.layer(Extension(CurrentUser {
            user_id,
            user_name: "achieng".to_string(),
        }))
    }

    fn post_json(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn upload(file_name: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload-docx")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_requires_authentication() {
        let generator = ScriptedGenerator::replying("{}");
        let response = app(MemoryHistoryRepository::default(), generator.clone())
            .oneshot(post_json("/analyze/", r#"{"essay":"text"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_returns_parsed_payload() {
        let generator =
            ScriptedGenerator::replying("```json\n{\"ai_probability\": 0.42, \"reasoning\": \"mixed\"}\n```");
        let app = signed_in(app(MemoryHistoryRepository::default(), generator), UserId::new());

        let response = app
            .oneshot(post_json("/analyze/", r#"{"essay":"Some essay"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["results"]["ai_probability"], 0.42);
        assert_eq!(body["results"]["reasoning"], "mixed");
    }

    #[tokio::test]
    async fn test_analyze_empty_essay() {
        let generator = ScriptedGenerator::replying("{}");
        let app = signed_in(
            app(MemoryHistoryRepository::default(), generator.clone()),
            UserId::new(),
        );

        let response = app.oneshot(post_json("/analyze/", "{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Essay text is required.");
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_upstream_failure_has_details() {
        let app = signed_in(
            app(
                MemoryHistoryRepository::default(),
                ScriptedGenerator::failing("HTTP 500 from Gemini"),
            ),
            UserId::new(),
        );

        let response = app
            .oneshot(post_json("/analyze/", r#"{"essay":"Some essay"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "An error occurred during analysis.");
        assert_eq!(body["details"], "HTTP 500 from Gemini");
    }

    #[tokio::test]
    async fn test_history_hides_essay_text_by_default() {
        let repo = MemoryHistoryRepository::default();
        let user_id = UserId::new();
        let app = signed_in(
            app(repo, ScriptedGenerator::replying(r#"{"ai_probability": 0.3, "reasoning": "r"}"#)),
            user_id,
        );

        let response = app
            .clone()
            .oneshot(post_json("/analyze/", r#"{"essay":"private words"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/history/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        let item = &body["results"][0];
        assert_eq!(item["ai_probability"], 0.3);
        assert_eq!(item["reasoning"], "r");
        assert!(item.get("essay_text").is_none());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/history/?include_text=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["results"][0]["essay_text"], "private words");
    }

    #[tokio::test]
    async fn test_upload_docx_extracts_text() {
        let bytes = docx_with_paragraphs(&["P1", "P2"]);
        let response = app(MemoryHistoryRepository::default(), ScriptedGenerator::replying("{}"))
            .oneshot(upload("Essay.DOCX", &bytes))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["text"], "P1\n\nP2");
    }

    #[tokio::test]
    async fn test_upload_rejects_other_extensions() {
        let response = app(MemoryHistoryRepository::default(), ScriptedGenerator::replying("{}"))
            .oneshot(upload("essay.txt", b"hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Only .docx files are supported");
    }

    #[tokio::test]
    async fn test_upload_malformed_archive() {
        let response = app(MemoryHistoryRepository::default(), ScriptedGenerator::replying("{}"))
            .oneshot(upload("essay.docx", b"definitely not a zip"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_inflating_past_document_cap() {
        let run = "a".repeat(2 * 1024 * 1024);
        let bytes = docx_with_paragraphs(&[run.as_str()]);
        assert!(bytes.len() < 64 * 1024);

        let config = AnalyzerConfig {
            max_document_bytes: 256 * 1024,
            ..Default::default()
        };
        let response = analyzer_router_generic(
            MemoryHistoryRepository::default(),
            ScriptedGenerator::replying("{}"),
            config,
        )
        .oneshot(upload("essay.docx", &bytes))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"], "File too large");
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhi\r\n--{BOUNDARY}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/upload-docx")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app(MemoryHistoryRepository::default(), ScriptedGenerator::replying("{}"))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "No file uploaded");
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::AnalyzerError;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AnalyzerError::EmptyEssay.kind(), ErrorKind::BadRequest);
        assert_eq!(AnalyzerError::UploadTooLarge.kind(), ErrorKind::PayloadTooLarge);
        assert_eq!(
            AnalyzerError::Upstream("x".into()).kind(),
            ErrorKind::InternalServerError
        );
        assert_eq!(
            AnalyzerError::MalformedDocument("x".into()).kind(),
            ErrorKind::BadRequest
        );
    }

    #[test]
    fn test_internal_details_hidden() {
        let app_error = AnalyzerError::Internal("pool exhausted".into()).to_app_error();
        assert_eq!(app_error.message(), "Internal server error");
        assert!(app_error.details().is_none());
    }

    #[test]
    fn test_config_error_message() {
        let app_error = AnalyzerError::Config("GEMINI_API_KEY is not set".into()).to_app_error();
        assert_eq!(app_error.message(), "An error occurred during analysis.");
        assert_eq!(app_error.details(), Some("GEMINI_API_KEY is not set"));
    }
}
