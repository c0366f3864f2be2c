//! User Name Value Object
//!
//! ログインと表示に使う公開識別子。
//!
//! ## 設計方針
//! - 入力は NFKC 正規化 + trim してから検証する
//! - 表示用には入力時の大文字小文字を保持し、一意性の比較は小文字の canonical で行う
//!
//! ## 不変条件
//! - 長さ: 1〜150文字（正規化後）
//! - 使用可能文字: 文字、数字、`@ . + - _`

use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 150;

/// Allowed non-alphanumeric characters
const ALLOWED_SPECIAL_CHARS: &[char] = &['@', '.', '+', '-', '_'];

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    Empty,
    TooLong { length: usize, max: usize },
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => write!(
                f,
                "Invalid character '{char}' at position {position}. Only letters, digits and @/./+/-/_ are allowed"
            ),
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated, normalized user name
///
/// # Storage
/// - `original`: trimmed, NFKC normalized, case preserved
/// - `canonical`: lowercase form used for uniqueness and lookup
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Normalize and validate raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = input.as_ref().nfkc().collect::<String>().trim().to_string();
        Self::validate(&original)?;
        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Rebuild from a stored value (assumed already validated)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    fn validate(name: &str) -> Result<(), UserNameError> {
        if name.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = name.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        for (position, ch) in name.chars().enumerate() {
            if !(ch.is_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&ch)) {
                return Err(UserNameError::InvalidCharacter { char: ch, position });
            }
        }

        Ok(())
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserName")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_preserve_case() {
        let name = UserName::new("  Achieng_W  ").unwrap();
        assert_eq!(name.original(), "Achieng_W");
        assert_eq!(name.canonical(), "achieng_w");
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth letters normalize to ASCII
        let name = UserName::new("ＡＢＣ").unwrap();
        assert_eq!(name.original(), "ABC");
        assert_eq!(name.canonical(), "abc");
    }

    #[test]
    fn test_allowed_special_characters() {
        assert!(UserName::new("jane.doe+essays@school-ke_1").is_ok());
    }

    #[test]
    fn test_unicode_letters_allowed() {
        assert!(UserName::new("José").is_ok());
    }

    #[test]
    fn test_empty_fails() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_length_bounds() {
        assert!(UserName::new("a").is_ok());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        assert!(matches!(
            UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
            Err(UserNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            UserName::new("john doe"),
            Err(UserNameError::InvalidCharacter {
                char: ' ',
                position: 4
            })
        );
        assert!(UserName::new("semi;colon").is_err());
        assert!(UserName::new("emoji🎉").is_err());
    }

    #[test]
    fn test_from_db_canonical() {
        let name = UserName::from_db("Otieno");
        assert_eq!(name.canonical(), "otieno");
        assert_eq!(name.to_string(), "Otieno");
    }
}
