//! Application Configuration
//!
//! Configuration for the analyzer application layer.

use std::env;
use std::fmt;
use std::time::Duration;

/// Analyzer configuration
#[derive(Clone)]
pub struct AnalyzerConfig {
    /// Gemini API key. Empty means classification fails at call time.
    pub gemini_api_key: String,
    /// Model resource name, e.g. `models/gemini-flash-latest`
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Timeout for one generation call
    pub request_timeout: Duration,
    /// Maximum accepted `.docx` upload body
    pub upload_max_bytes: usize,
    /// Maximum uncompressed size of the document part inside a `.docx`
    pub max_document_bytes: u64,
}

/// Inflated document part may be this many times the upload limit
const DOCUMENT_EXPANSION_FACTOR: u64 = 4;

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_model: "models/gemini-flash-latest".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            request_timeout: Duration::from_secs(30),
            upload_max_bytes: 10 * 1024 * 1024,
            max_document_bytes: 10 * 1024 * 1024 * DOCUMENT_EXPANSION_FACTOR,
        }
    }
}

impl AnalyzerConfig {
    /// Read `GEMINI_*`, `UPLOAD_MAX_BYTES` and `DOCX_MAX_DOCUMENT_BYTES`,
    /// falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let upload_max_bytes = env::var("UPLOAD_MAX_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.upload_max_bytes);
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            request_timeout: env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            upload_max_bytes,
            max_document_bytes: env::var("DOCX_MAX_DOCUMENT_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or((upload_max_bytes as u64).saturating_mul(DOCUMENT_EXPANSION_FACTOR)),
        }
    }

    /// Create config for development (short timeout, no key)
    pub fn development() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            ..Default::default()
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.gemini_api_key.trim().is_empty()
    }
}

impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("gemini_api_key", &"[REDACTED]")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("upload_max_bytes", &self.upload_max_bytes)
            .field("max_document_bytes", &self.max_document_bytes)
            .finish()
    }
}
