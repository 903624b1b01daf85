//! Custom Axum extractors.

pub mod identity;
pub mod json;

pub use identity::Identity;
pub use json::AppJson;
