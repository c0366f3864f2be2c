//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::AnalyzerAppState;
pub use router::{analyzer_router, analyzer_router_generic};
