//! Common validation utilities.

use chrono::{DateTime, Utc};
use validator::ValidationError;

/// Lowest accepted feedback rating.
pub const MIN_RATING: i32 = 1;

/// Highest accepted feedback rating.
pub const MAX_RATING: i32 = 5;

/// Validates that a feedback rating is within the accepted range (1 to 5).
pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        let mut err = ValidationError::new("rating_range");
        err.message = Some("Rating must be between 1 and 5".into());
        Err(err)
    }
}

/// Validates that an event capacity is non-negative.
///
/// Zero is accepted; what it means for registration is decided by the
/// registration engine.
pub fn validate_capacity(capacity: i32) -> Result<(), ValidationError> {
    if capacity >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("capacity_range");
        err.message = Some("Capacity must be non-negative".into());
        Err(err)
    }
}

/// Validates that a required text field contains something other than whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that an event does not end before it starts.
pub fn validate_event_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if end >= start {
        Ok(())
    } else {
        let mut err = ValidationError::new("event_window");
        err.message = Some("Event end must not be before its start".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(3).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-1).is_err());
    }

    #[test]
    fn test_validate_rating_error_message() {
        let err = validate_rating(6).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Rating must be between 1 and 5"
        );
    }

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity(0).is_ok());
        assert!(validate_capacity(250).is_ok());
        assert!(validate_capacity(-1).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Robotics night").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   \t").is_err());
    }

    #[test]
    fn test_validate_event_window() {
        let start = Utc::now();
        assert!(validate_event_window(start, start).is_ok());
        assert!(validate_event_window(start, start + Duration::hours(2)).is_ok());

        let err = validate_event_window(start, start - Duration::minutes(1)).unwrap_err();
        assert_eq!(err.code, "event_window");
    }
}
