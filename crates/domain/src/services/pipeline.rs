//! Post-commit side-effect pipeline.
//!
//! After a workflow command commits, its transition is handed to every
//! registered hook. Hook failures are logged and counted but never reach the
//! caller; the command has already succeeded.

use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use super::activity::activity_helpers;
use super::notification::{needs_registrants, notifications_for};
use super::store::{ActivityLogStore, NotificationStore, RegistrationStore, WorkflowStores};
use super::transition::WorkflowTransition;
use crate::error::StoreError;

/// A callback run after a command's mutation has committed.
#[async_trait]
pub trait PostCommitHook: Send + Sync {
    fn name(&self) -> &'static str;

    async fn on_commit(&self, transition: &WorkflowTransition) -> Result<(), StoreError>;
}

/// Appends an activity log entry for every transition.
pub struct ActivityLogHook {
    store: Arc<dyn ActivityLogStore>,
}

impl ActivityLogHook {
    pub fn new(store: Arc<dyn ActivityLogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostCommitHook for ActivityLogHook {
    fn name(&self) -> &'static str {
        "activity_log"
    }

    async fn on_commit(&self, transition: &WorkflowTransition) -> Result<(), StoreError> {
        self.store
            .append(activity_helpers::for_transition(transition))
            .await?;
        Ok(())
    }
}

/// Creates the notifications a transition calls for.
pub struct NotificationHook {
    notifications: Arc<dyn NotificationStore>,
    registrations: Arc<dyn RegistrationStore>,
}

impl NotificationHook {
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        registrations: Arc<dyn RegistrationStore>,
    ) -> Self {
        Self {
            notifications,
            registrations,
        }
    }
}

#[async_trait]
impl PostCommitHook for NotificationHook {
    fn name(&self) -> &'static str {
        "notification"
    }

    async fn on_commit(&self, transition: &WorkflowTransition) -> Result<(), StoreError> {
        let registrants = if needs_registrants(transition) {
            self.registrations
                .list_registrations(transition.entity_id())
                .await?
        } else {
            Vec::new()
        };

        // Every notice is attempted; the last failure is reported.
        let mut result = Ok(());
        for input in notifications_for(transition, &registrants) {
            if let Err(e) = self.notifications.create(input).await {
                result = Err(e);
            }
        }
        result
    }
}

/// How the pipeline runs hooks relative to the command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Spawned on the runtime and not awaited.
    #[default]
    Background,
    /// Awaited before the command returns. Errors are still swallowed.
    Inline,
}

impl FromStr for DispatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "background" => Ok(DispatchMode::Background),
            "inline" => Ok(DispatchMode::Inline),
            _ => Err(format!("Invalid side effect dispatch mode: {}", s)),
        }
    }
}

/// Ordered list of post-commit hooks.
#[derive(Clone)]
pub struct SideEffectPipeline {
    hooks: Arc<Vec<Arc<dyn PostCommitHook>>>,
    mode: DispatchMode,
}

impl SideEffectPipeline {
    pub fn new(hooks: Vec<Arc<dyn PostCommitHook>>, mode: DispatchMode) -> Self {
        Self {
            hooks: Arc::new(hooks),
            mode,
        }
    }

    /// Activity logging followed by notifications.
    pub fn standard(stores: &WorkflowStores, mode: DispatchMode) -> Self {
        let hooks: Vec<Arc<dyn PostCommitHook>> = vec![
            Arc::new(ActivityLogHook::new(stores.activity.clone())),
            Arc::new(NotificationHook::new(
                stores.notifications.clone(),
                stores.registrations.clone(),
            )),
        ];
        Self::new(hooks, mode)
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Runs every hook for `transition`. Never fails.
    pub async fn dispatch(&self, transition: WorkflowTransition) {
        match self.mode {
            DispatchMode::Inline => run_hooks(&self.hooks, &transition).await,
            DispatchMode::Background => {
                let hooks = self.hooks.clone();
                tokio::spawn(async move {
                    run_hooks(&hooks, &transition).await;
                });
            }
        }
    }
}

async fn run_hooks(hooks: &[Arc<dyn PostCommitHook>], transition: &WorkflowTransition) {
    for hook in hooks {
        if let Err(e) = hook.on_commit(transition).await {
            counter!("side_effect_failures_total", "hook" => hook.name()).increment(1);
            tracing::warn!(
                hook = hook.name(),
                action = %transition.action(),
                entity_id = %transition.entity_id(),
                error = %e,
                "Post-commit hook failed"
            );
        }
    }
}
