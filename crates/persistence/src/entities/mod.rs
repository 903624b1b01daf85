//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod activity_log;
pub mod event;
pub mod news;
pub mod notification;
pub mod registration;

pub use activity_log::ActivityLogEntity;
pub use event::{EventEntity, EventStatusDb};
pub use news::{NewsPostEntity, NewsStatusDb};
pub use notification::NotificationEntity;
pub use registration::{
    FeedbackEntity, RegistrationCountsEntity, RegistrationEntity, RegistrationStatusDb,
};
