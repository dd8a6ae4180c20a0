//! Presentation Layer
//!
//! HTTP surface: request/response DTOs, handlers, the router, and the
//! session-token middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use router::{AuthAppState, auth_router};
