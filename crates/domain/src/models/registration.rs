//! Event registration models and the capacity decision rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Status of a user's registration for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Confirmed,
    Waitlist,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Waitlist => "waitlist",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }

    /// Picks the status for a registration attempt.
    ///
    /// `confirmed_others` counts confirmed registrations for the event
    /// excluding the caller's own row. A capacity of zero always waitlists.
    pub fn decide(capacity: i32, confirmed_others: i64) -> RegistrationStatus {
        if confirmed_others < i64::from(capacity) {
            RegistrationStatus::Confirmed
        } else {
            RegistrationStatus::Waitlist
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, RegistrationStatus::Cancelled)
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            "waitlist" => Ok(RegistrationStatus::Waitlist),
            "cancelled" => Ok(RegistrationStatus::Cancelled),
            _ => Err(format!("Invalid registration status: {}", s)),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's registration for an event. At most one per (event, user).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: RegistrationStatus,
    pub attendance_marked: bool,
    pub feedback_submitted: bool,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Confirmed and waitlisted totals for an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationCounts {
    pub confirmed: i64,
    pub waitlist: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_below_capacity_confirms() {
        assert_eq!(RegistrationStatus::decide(2, 0), RegistrationStatus::Confirmed);
        assert_eq!(RegistrationStatus::decide(2, 1), RegistrationStatus::Confirmed);
    }

    #[test]
    fn test_decide_at_capacity_waitlists() {
        assert_eq!(RegistrationStatus::decide(2, 2), RegistrationStatus::Waitlist);
        assert_eq!(RegistrationStatus::decide(2, 5), RegistrationStatus::Waitlist);
    }

    #[test]
    fn test_decide_zero_capacity_always_waitlists() {
        assert_eq!(RegistrationStatus::decide(0, 0), RegistrationStatus::Waitlist);
    }

    #[test]
    fn test_registration_status_serialization() {
        let json = serde_json::to_string(&RegistrationStatus::Waitlist).unwrap();
        assert_eq!(json, "\"waitlist\"");
        assert_eq!(
            "confirmed".parse::<RegistrationStatus>().unwrap(),
            RegistrationStatus::Confirmed
        );
    }

    #[test]
    fn test_is_active() {
        assert!(RegistrationStatus::Confirmed.is_active());
        assert!(RegistrationStatus::Waitlist.is_active());
        assert!(!RegistrationStatus::Cancelled.is_active());
    }
}
