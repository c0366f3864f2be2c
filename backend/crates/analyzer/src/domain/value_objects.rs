//! Domain Value Objects

use serde_json::{Map, Value};

use crate::error::{AnalyzerError, AnalyzerResult};

/// Essay text submitted for classification
///
/// Stored exactly as given; only blank input is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Essay(String);

impl Essay {
    pub fn new(text: impl Into<String>) -> AnalyzerResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AnalyzerError::EmptyEssay);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parsed classifier answer
///
/// `payload` is the object exactly as the model returned it and is what the
/// client sees. `ai_probability` and `reasoning` are the coerced values kept
/// in history.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub payload: Map<String, Value>,
    pub ai_probability: f64,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_essay_rejects_blank() {
        assert!(matches!(Essay::new(""), Err(AnalyzerError::EmptyEssay)));
        assert!(matches!(Essay::new(" \n\t "), Err(AnalyzerError::EmptyEssay)));
    }

    #[test]
    fn test_essay_keeps_text_verbatim() {
        let essay = Essay::new("  Hello world \n").unwrap();
        assert_eq!(essay.as_str(), "  Hello world \n");
    }
}
