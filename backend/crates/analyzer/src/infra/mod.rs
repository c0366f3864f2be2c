//! Infrastructure Layer
//!
//! PostgreSQL history store, Gemini HTTP client and `.docx` reader.

pub mod docx;
pub mod gemini;
pub mod postgres;
