//! Application Configuration
//!
//! M-Pesa (Daraja) settings, read once at startup.

use std::env;
use std::fmt;
use std::time::Duration;

/// How to obtain an OAuth access token, in priority order
#[derive(Clone, PartialEq, Eq)]
pub enum GatewayCredentials {
    /// Pre-issued token, used as is
    BearerToken(String),
    /// Ready-made `Basic` credential exchanged for a token
    BasicAuth(String),
    /// Consumer key and secret exchanged for a token
    ConsumerKey { key: String, secret: String },
    None,
}

impl GatewayCredentials {
    fn from_env() -> Self {
        if let Some(token) = non_empty_var("MPESA_BEARER_TOKEN") {
            return Self::BearerToken(token);
        }
        if let Some(basic) = non_empty_var("MPESA_BASIC_AUTH") {
            return Self::BasicAuth(basic);
        }
        match (
            non_empty_var("MPESA_CONSUMER_KEY"),
            non_empty_var("MPESA_CONSUMER_SECRET"),
        ) {
            (Some(key), Some(secret)) => Self::ConsumerKey { key, secret },
            _ => Self::None,
        }
    }

    fn strategy(&self) -> &'static str {
        match self {
            Self::BearerToken(_) => "bearer_token",
            Self::BasicAuth(_) => "basic_auth",
            Self::ConsumerKey { .. } => "consumer_key",
            Self::None => "none",
        }
    }
}

impl fmt::Debug for GatewayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GatewayCredentials({})", self.strategy())
    }
}

/// Payments configuration
#[derive(Clone)]
pub struct PaymentsConfig {
    pub base_url: String,
    pub short_code: String,
    pub passkey: String,
    /// Replaces the generated STK password when set
    pub password_override: Option<String>,
    pub credentials: GatewayCredentials,
    /// Fixed callback URL; derived from the request host when unset
    pub callback_url: Option<String>,
    pub oauth_timeout: Duration,
    pub stk_timeout: Duration,
    /// Age after which a PENDING transaction is failed by the sweep
    pub pending_ttl: Duration,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sandbox.safaricom.co.ke".to_string(),
            short_code: "174379".to_string(),
            passkey: String::new(),
            password_override: None,
            credentials: GatewayCredentials::None,
            callback_url: None,
            oauth_timeout: Duration::from_secs(15),
            stk_timeout: Duration::from_secs(30),
            pending_ttl: Duration::from_secs(24 * 3600),
        }
    }
}

impl PaymentsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: non_empty_var("MPESA_BASE_URL").unwrap_or(defaults.base_url),
            short_code: non_empty_var("MPESA_SHORT_CODE").unwrap_or(defaults.short_code),
            passkey: non_empty_var("MPESA_PASSKEY")
                .or_else(|| non_empty_var("passkey"))
                .unwrap_or_default(),
            password_override: non_empty_var("MPESA_PASSWORD"),
            credentials: GatewayCredentials::from_env(),
            callback_url: non_empty_var("MPESA_CALLBACK_URL"),
            oauth_timeout: secs_var("MPESA_OAUTH_TIMEOUT_SECS").unwrap_or(defaults.oauth_timeout),
            stk_timeout: secs_var("MPESA_STK_TIMEOUT_SECS").unwrap_or(defaults.stk_timeout),
            pending_ttl: non_empty_var("PAYMENT_PENDING_TTL_HOURS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(|hours| Duration::from_secs(hours * 3600))
                .unwrap_or(defaults.pending_ttl),
        }
    }

    /// Create config for development (sandbox with a dummy token)
    pub fn development() -> Self {
        Self {
            credentials: GatewayCredentials::BearerToken("dev-token".to_string()),
            callback_url: Some("http://localhost:8000/api/payments/callback/".to_string()),
            ..Default::default()
        }
    }
}

impl fmt::Debug for PaymentsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentsConfig")
            .field("base_url", &self.base_url)
            .field("short_code", &self.short_code)
            .field("passkey", &"[REDACTED]")
            .field("password_override", &self.password_override.as_ref().map(|_| "[REDACTED]"))
            .field("credentials", &self.credentials)
            .field("callback_url", &self.callback_url)
            .field("oauth_timeout", &self.oauth_timeout)
            .field("stk_timeout", &self.stk_timeout)
            .field("pending_ttl", &self.pending_ttl)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn secs_var(name: &str) -> Option<Duration> {
    non_empty_var(name)
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PaymentsConfig::default();
        assert_eq!(config.short_code, "174379");
        assert_eq!(config.oauth_timeout, Duration::from_secs(15));
        assert_eq!(config.stk_timeout, Duration::from_secs(30));
        assert_eq!(config.pending_ttl, Duration::from_secs(86_400));
        assert_eq!(config.credentials, GatewayCredentials::None);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = PaymentsConfig {
            passkey: "bfb279f9aa9bdbcf".to_string(),
            password_override: Some("c2VjcmV0".to_string()),
            credentials: GatewayCredentials::ConsumerKey {
                key: "ck_live".to_string(),
                secret: "cs_live".to_string(),
            },
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("bfb279f9aa9bdbcf"));
        assert!(!debug.contains("c2VjcmV0"));
        assert!(!debug.contains("cs_live"));
        assert!(debug.contains("consumer_key"));
    }
}
