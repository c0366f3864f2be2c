//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Bytes of entropy in an API token (40 hex characters)
pub const TOKEN_BYTES: usize = 20;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate an opaque API token: [`TOKEN_BYTES`] random bytes, lowercase hex
pub fn random_token() -> String {
    hex::encode(random_bytes(TOKEN_BYTES))
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}
