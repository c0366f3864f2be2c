//! Domain Services
//!
//! Prompt construction and classifier response parsing. Pure functions, no I/O.

use serde_json::{Map, Value};

use crate::domain::value_objects::{Classification, Essay};
use crate::error::{AnalyzerError, AnalyzerResult};

/// Instruction sent ahead of every essay
const PROMPT_HEADER: &str = "\
Analyze the following essay to determine the likelihood that it was written by an AI.
Provide your response as a JSON object with two keys: 'ai_probability' and 'reasoning'.
- 'ai_probability': A float value between 0.0 (definitely human) and 1.0 (definitely AI).
- 'reasoning': A brief explanation for your score, considering factors like perplexity (predictability of text), burstiness (variation in sentence structure), and linguistic patterns.

Essay to analyze:
---
";

/// Build the classification prompt with the essay between `---` lines
pub fn build_prompt(essay: &Essay) -> String {
    let mut prompt = String::with_capacity(PROMPT_HEADER.len() + essay.as_str().len() + 5);
    prompt.push_str(PROMPT_HEADER);
    prompt.push_str(essay.as_str());
    prompt.push_str("\n---\n");
    prompt
}

/// Remove markdown code fences the model tends to wrap JSON in
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse raw model output into a [`Classification`]
pub fn parse_classification(raw: &str) -> AnalyzerResult<Classification> {
    let cleaned = strip_code_fences(raw);

    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| AnalyzerError::Upstream(format!("Model returned invalid JSON: {e}")))?;

    let Value::Object(payload) = value else {
        return Err(AnalyzerError::Upstream(
            "Model response is not a JSON object".to_string(),
        ));
    };

    let ai_probability = coerce_probability(&payload)?;
    let reasoning = coerce_reasoning(&payload);

    Ok(Classification {
        payload,
        ai_probability,
        reasoning,
    })
}

fn coerce_probability(payload: &Map<String, Value>) -> AnalyzerResult<f64> {
    let parsed = match payload.get("ai_probability") {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(p) if p.is_finite() => Ok(p.clamp(0.0, 1.0)),
        _ => Err(AnalyzerError::Upstream(
            "ai_probability is not a number".to_string(),
        )),
    }
}

fn coerce_reasoning(payload: &Map<String, Value>) -> String {
    match payload.get("reasoning") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_wraps_essay() {
        let essay = Essay::new("My summer holiday").unwrap();
        let prompt = build_prompt(&essay);
        assert!(prompt.starts_with("Analyze the following essay"));
        assert!(prompt.contains("perplexity"));
        assert!(prompt.ends_with("---\nMy summer holiday\n---\n"));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_fenced_and_plain_parse_equal() {
        let plain = r#"{"ai_probability": 0.8, "reasoning": "uniform sentences"}"#;
        let fenced = format!("```json\n{plain}\n```");
        assert_eq!(
            parse_classification(plain).unwrap(),
            parse_classification(&fenced).unwrap()
        );
    }

    #[test]
    fn test_parse_keeps_payload_unchanged() {
        let parsed =
            parse_classification(r#"{"ai_probability": 1.7, "reasoning": "x", "extra": true}"#)
                .unwrap();
        assert_eq!(parsed.payload.get("ai_probability"), Some(&json!(1.7)));
        assert_eq!(parsed.payload.get("extra"), Some(&json!(true)));
        assert_eq!(parsed.ai_probability, 1.0);
    }

    #[test]
    fn test_probability_coercion() {
        assert_eq!(
            parse_classification(r#"{"ai_probability": "0.25"}"#)
                .unwrap()
                .ai_probability,
            0.25
        );
        assert_eq!(
            parse_classification(r#"{"ai_probability": -3}"#)
                .unwrap()
                .ai_probability,
            0.0
        );
        assert_eq!(parse_classification("{}").unwrap().ai_probability, 0.0);
        assert_eq!(
            parse_classification(r#"{"ai_probability": null}"#)
                .unwrap()
                .ai_probability,
            0.0
        );
        assert!(matches!(
            parse_classification(r#"{"ai_probability": "high"}"#),
            Err(AnalyzerError::Upstream(_))
        ));
        assert!(matches!(
            parse_classification(r#"{"ai_probability": [0.5]}"#),
            Err(AnalyzerError::Upstream(_))
        ));
    }

    #[test]
    fn test_reasoning_coercion() {
        assert_eq!(parse_classification("{}").unwrap().reasoning, "");
        assert_eq!(
            parse_classification(r#"{"reasoning": ["a", "b"]}"#)
                .unwrap()
                .reasoning,
            r#"["a","b"]"#
        );
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            parse_classification("[1, 2]"),
            Err(AnalyzerError::Upstream(_))
        ));
        assert!(matches!(
            parse_classification("not json"),
            Err(AnalyzerError::Upstream(_))
        ));
    }
}
