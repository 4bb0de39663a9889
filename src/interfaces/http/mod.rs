//! HTTP REST API
//!
//! - `common`: envelopes, error mapping, validated JSON
//! - `middleware`: JWT authentication and role checks
//! - `modules`: handlers and DTOs per resource
//! - `router`: route table, OpenAPI document and layers

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiSettings, AppState};
