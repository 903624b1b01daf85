//! Capacity-gated event registration.

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::store::RegistrationStore;
use crate::error::WorkflowError;
use crate::models::{Feedback, Registration, SubmitFeedbackRequest};

pub struct RegistrationEngine {
    registrations: Arc<dyn RegistrationStore>,
}

impl RegistrationEngine {
    pub fn new(registrations: Arc<dyn RegistrationStore>) -> Self {
        Self { registrations }
    }

    /// Registers the user, confirming while seats remain and waitlisting after.
    ///
    /// Registering again leaves the status unchanged unless capacity changed;
    /// registering after cancelling behaves like a first registration.
    pub async fn register(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Registration, WorkflowError> {
        self.registrations
            .register(event_id, user_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound("Event not found".into()))
    }

    /// Cancels the user's registration. Cancelling twice succeeds.
    ///
    /// The next waitlisted registrant is not promoted.
    pub async fn cancel(&self, event_id: Uuid, user_id: Uuid) -> Result<Registration, WorkflowError> {
        self.registrations
            .cancel_registration(event_id, user_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound("Registration not found".into()))
    }

    pub async fn mark_attendance(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Registration, WorkflowError> {
        self.registrations
            .mark_attendance(event_id, user_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound("Registration not found".into()))
    }

    /// Stores or replaces the user's feedback. No registration is required.
    pub async fn submit_feedback(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        request: SubmitFeedbackRequest,
    ) -> Result<Feedback, WorkflowError> {
        shared::validation::validate_rating(request.rating)?;
        request.validate()?;

        self.registrations
            .upsert_feedback(event_id, user_id, request.rating, request.comment)
            .await?
            .ok_or_else(|| WorkflowError::NotFound("Event not found".into()))
    }
}
