//! `Authorization` header parsing
//!
//! Accepts `Token <key>` and `Bearer <key>` (scheme is case-insensitive).

use axum::http::{HeaderMap, header};

const SCHEMES: &[&str] = &["token", "bearer"];

/// Extract the API token from the `Authorization` header
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, key) = value.trim().split_once(' ')?;

    if !SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s)) {
        return None;
    }

    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_token_scheme() {
        assert_eq!(extract_token(&headers("Token abc123")), Some("abc123".to_string()));
    }

    #[test]
    fn test_bearer_scheme_case_insensitive() {
        assert_eq!(extract_token(&headers("bearer abc123")), Some("abc123".to_string()));
        assert_eq!(extract_token(&headers("BEARER  abc123 ")), Some("abc123".to_string()));
    }

    #[test]
    fn test_rejected_values() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        assert_eq!(extract_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_token(&headers("Token")), None);
        assert_eq!(extract_token(&headers("Token a b")), None);
    }
}
