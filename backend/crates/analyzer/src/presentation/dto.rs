//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::HistoryId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::History;

/// POST /analyze/
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub essay: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub results: Map<String, Value>,
}

/// GET /history/ query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub include_text: Option<String>,
}

impl HistoryQuery {
    pub fn wants_text(&self) -> bool {
        matches!(
            self.include_text.as_deref().map(str::trim),
            Some("1") | Some("true") | Some("yes")
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryItem {
    pub id: HistoryId,
    pub ai_probability: f64,
    pub reasoning: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essay_text: Option<String>,
}

impl HistoryItem {
    pub fn from_history(history: History, include_text: bool) -> Self {
        Self {
            id: history.history_id,
            ai_probability: history.ai_probability,
            reasoning: history.reasoning,
            created_at: history.created_at,
            essay_text: include_text.then_some(history.essay_text),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub results: Vec<HistoryItem>,
}

/// POST /upload-docx
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(flag: Option<&str>) -> HistoryQuery {
        HistoryQuery {
            include_text: flag.map(str::to_string),
        }
    }

    #[test]
    fn test_include_text_flag() {
        assert!(query(Some("1")).wants_text());
        assert!(query(Some("true")).wants_text());
        assert!(query(Some("yes")).wants_text());
        assert!(!query(None).wants_text());
        assert!(!query(Some("0")).wants_text());
        assert!(!query(Some("")).wants_text());
    }
}
