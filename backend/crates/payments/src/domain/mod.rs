//! Domain Layer
//!
//! This layer contains:
//! - Domain entities (PaymentTransaction, Wallet)
//! - Domain value objects (CreditPackage, PhoneNumber, PaymentStatus, CallbackResult)
//! - Domain services (STK password and timestamp)
//! - Repository and gateway traits

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
