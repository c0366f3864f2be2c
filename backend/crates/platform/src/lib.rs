//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, opaque tokens, Base64)
//! - Password hashing (Argon2id)
//! - `Authorization` header parsing

pub mod bearer;
pub mod crypto;
pub mod password;
