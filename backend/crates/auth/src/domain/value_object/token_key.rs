//! API token key
//!
//! Opaque 40-character lowercase hex string sent as
//! `Authorization: Token <key>`.

use std::fmt;

pub const TOKEN_KEY_LENGTH: usize = 40;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TokenKey(String);

impl TokenKey {
    /// Fresh random key
    pub fn generate() -> Self {
        Self(platform::crypto::random_token())
    }

    /// Accept a client-supplied key. Anything not shaped like a key is
    /// rejected before it reaches storage.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == TOKEN_KEY_LENGTH
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn from_db(key: String) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// Keys are credentials; only a prefix is ever printed.
impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "TokenKey({prefix}...)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_parseable() {
        let key = TokenKey::generate();
        assert_eq!(key.as_str().len(), TOKEN_KEY_LENGTH);
        assert_eq!(TokenKey::parse(key.as_str()), Some(key));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(TokenKey::parse("").is_none());
        assert!(TokenKey::parse("abc").is_none());
        assert!(TokenKey::parse(&"A".repeat(40)).is_none());
        assert!(TokenKey::parse(&"g".repeat(40)).is_none());
    }

    #[test]
    fn test_debug_shows_prefix_only() {
        let key = TokenKey::parse(&"a1".repeat(20)).unwrap();
        assert_eq!(format!("{:?}", key), "TokenKey(a1a1a1...)");
    }
}
