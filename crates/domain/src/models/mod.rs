//! Domain models for the club workflow service.

pub mod activity_log;
pub mod event;
pub mod feedback;
pub mod identity;
pub mod news;
pub mod notification;
pub mod registration;

pub use activity_log::{ActivityAction, ActivityLogEntry, CreateActivityLogInput, EntityType};
pub use event::{CreateEventRequest, Event, EventDetails, EventStatus, NewEvent};
pub use feedback::{Feedback, SubmitFeedbackRequest};
pub use identity::{Actor, Command, RequestContext, Role};
pub use news::{CreateNewsRequest, NewNewsPost, NewsPost, NewsStatus};
pub use notification::{CreateNotificationInput, Notification, NotificationType, UnreadCount};
pub use registration::{Registration, RegistrationCounts, RegistrationStatus};
