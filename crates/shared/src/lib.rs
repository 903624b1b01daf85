//! Shared utilities and common types for the clubs workflow backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Bearer token issuance and validation (HS256)
//! - Common validation logic

pub mod jwt;
pub mod validation;
