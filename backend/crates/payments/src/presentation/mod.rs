//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::PaymentsAppState;
pub use router::{payments_router, payments_router_generic};
