//! HTTP route handlers.

pub mod activity;
pub mod events;
pub mod health;
pub mod news;
pub mod notifications;
