//! Caller identity and command capabilities.
//!
//! Identity is issued elsewhere; requests arrive with at most one validated
//! `(user_id, role)` pair. Whether a caller may run a command is decided purely
//! by membership of its role in the command's allow-list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::WorkflowError;

/// Platform role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    ClubModerator,
    SystemAdmin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::ClubModerator, Role::SystemAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::ClubModerator => "club_moderator",
            Role::SystemAdmin => "system_admin",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "club_moderator" => Ok(Role::ClubModerator),
            "system_admin" => Ok(Role::SystemAdmin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

/// Commands accepted by the workflow coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CreateEvent,
    ApproveEvent,
    RejectEvent,
    CompleteEvent,
    CancelEvent,
    ViewEvent,
    CreateNews,
    ApproveNews,
    RejectNews,
    Register,
    CancelRegistration,
    MarkAttendance,
    SubmitFeedback,
    ViewOwnActivity,
    ViewUserActivity,
    ViewAllActivity,
    ManageNotifications,
}

const EVERYONE: &[Role] = &[Role::Student, Role::ClubModerator, Role::SystemAdmin];
const STAFF: &[Role] = &[Role::ClubModerator, Role::SystemAdmin];
const ADMIN: &[Role] = &[Role::SystemAdmin];

impl Command {
    /// Roles permitted to run this command. Membership is exact; no role
    /// implies another.
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Command::CreateEvent
            | Command::ViewEvent
            | Command::CreateNews
            | Command::Register
            | Command::CancelRegistration
            | Command::SubmitFeedback
            | Command::ViewOwnActivity
            | Command::ManageNotifications => EVERYONE,
            Command::CompleteEvent | Command::CancelEvent | Command::MarkAttendance => STAFF,
            Command::ApproveEvent
            | Command::RejectEvent
            | Command::ApproveNews
            | Command::RejectNews
            | Command::ViewUserActivity
            | Command::ViewAllActivity => ADMIN,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateEvent => "create_event",
            Command::ApproveEvent => "approve_event",
            Command::RejectEvent => "reject_event",
            Command::CompleteEvent => "complete_event",
            Command::CancelEvent => "cancel_event",
            Command::ViewEvent => "view_event",
            Command::CreateNews => "create_news",
            Command::ApproveNews => "approve_news",
            Command::RejectNews => "reject_news",
            Command::Register => "register",
            Command::CancelRegistration => "cancel_registration",
            Command::MarkAttendance => "mark_attendance",
            Command::SubmitFeedback => "submit_feedback",
            Command::ViewOwnActivity => "view_own_activity",
            Command::ViewUserActivity => "view_user_activity",
            Command::ViewAllActivity => "view_all_activity",
            Command::ManageNotifications => "manage_notifications",
        }
    }
}

/// Identity attached to a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub actor: Option<Actor>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { actor: None }
    }

    pub fn authenticated(user_id: Uuid, role: Role) -> Self {
        Self {
            actor: Some(Actor { user_id, role }),
        }
    }

    pub fn current_user_id(&self) -> Result<Uuid, WorkflowError> {
        self.actor
            .map(|a| a.user_id)
            .ok_or(WorkflowError::Unauthenticated)
    }

    pub fn has_role(&self, allowed: &[Role]) -> bool {
        self.actor.map_or(false, |a| allowed.contains(&a.role))
    }

    /// Checks identity presence and capability for `command`.
    pub fn require(&self, command: Command) -> Result<Actor, WorkflowError> {
        let actor = self.actor.ok_or(WorkflowError::Unauthenticated)?;
        if command.allowed_roles().contains(&actor.role) {
            Ok(actor)
        } else {
            Err(WorkflowError::Forbidden(format!(
                "Role {} may not {}",
                actor.role,
                command.name()
            )))
        }
    }
}
