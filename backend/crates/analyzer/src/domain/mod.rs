//! Domain Layer
//!
//! This layer contains:
//! - Domain entities (History)
//! - Domain value objects (Essay, Classification)
//! - Domain services (prompt building and response parsing)
//! - Repository and port traits

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
