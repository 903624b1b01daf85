//! Domain services for the club workflow engine.
//!
//! Services contain the workflow rules; storage is reached only through the
//! traits in [`store`].

pub mod activity;
pub mod coordinator;
pub mod memory;
pub mod moderation;
pub mod notification;
pub mod pipeline;
pub mod registration;
pub mod store;
pub mod transition;

pub use activity::{activity_helpers, ActivityLogBuilder};
pub use coordinator::{CoordinatorSettings, WorkflowCoordinator};
pub use memory::InMemoryStore;
pub use moderation::ModerationEngine;
pub use pipeline::{
    ActivityLogHook, DispatchMode, NotificationHook, PostCommitHook, SideEffectPipeline,
};
pub use registration::RegistrationEngine;
pub use store::{
    ActivityLogStore, EventStore, NewsStore, NotificationStore, RegistrationStore, StoreResult,
    WorkflowStores,
};
pub use transition::WorkflowTransition;
