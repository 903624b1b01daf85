//! Repository implementations for database operations.

pub mod activity_log;
pub mod event;
pub mod news;
pub mod notification;
pub mod registration;

pub use activity_log::ActivityLogRepository;
pub use event::EventRepository;
pub use news::NewsRepository;
pub use notification::NotificationRepository;
pub use registration::RegistrationRepository;
