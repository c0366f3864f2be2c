//! Gemini Text Generation Client
//!
//! One `generateContent` call per prompt. No retries.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::application::config::AnalyzerConfig;
use crate::domain::repository::TextGenerator;
use crate::error::{AnalyzerError, AnalyzerResult};

#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &AnalyzerConfig) -> AnalyzerResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AnalyzerError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            api_key: config.gemini_api_key.trim().to_string(),
            endpoint: generate_content_url(&config.gemini_base_url, &config.gemini_model),
        })
    }
}

/// `{base}/v1beta/{model}:generateContent`
fn generate_content_url(base_url: &str, model: &str) -> String {
    let model = model.trim_start_matches('/');
    let model = if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    };
    format!("{}/v1beta/{}:generateContent", base_url.trim_end_matches('/'), model)
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> AnalyzerResult<String> {
        if self.api_key.is_empty() {
            return Err(AnalyzerError::Config("GEMINI_API_KEY is not set".to_string()));
        }

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![json!({ "text": prompt })],
            }],
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalyzerError::Upstream(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::Upstream(format!("HTTP {status} from Gemini: {text}")));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::Upstream(format!("Invalid Gemini response: {e}")))?;

        parsed.into_text()
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> AnalyzerResult<String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AnalyzerError::Upstream("Gemini returned no candidates".to_string()))?;

        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.is_empty() {
            return Err(AnalyzerError::Upstream("Gemini returned no text".to_string()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_content_url() {
        assert_eq!(
            generate_content_url("https://example.test/", "models/gemini-flash-latest"),
            "https://example.test/v1beta/models/gemini-flash-latest:generateContent"
        );
        assert_eq!(
            generate_content_url("https://example.test", "gemini-pro"),
            "https://example.test/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_response_text_concatenated() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"```json\n{"},{"text":"}\n```"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "```json\n{}\n```");
    }

    #[test]
    fn test_no_candidates_is_upstream_error() {
        let response: GenerateResponse = serde_json::from_str(r#"{"promptFeedback":{}}"#).unwrap();
        assert!(matches!(response.into_text(), Err(AnalyzerError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let client = GeminiClient::new(&AnalyzerConfig::default()).unwrap();
        let result = client.generate("prompt").await;
        assert!(matches!(result, Err(AnalyzerError::Config(_))));
    }
}
