//! Booking models and the booking lifecycle state machine

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a booking request
///
/// Every booking starts out `pending`; `completed` and `cancelled`
/// are terminal. The full transition table lives in
/// [`BookingStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Initial status of every newly created booking
    pub fn initial() -> Self {
        BookingStatus::Pending
    }

    /// Whether no further transitions are possible from this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Transition table of the booking lifecycle:
    /// pending -> {confirmed, cancelled}, confirmed -> {completed, cancelled}
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }
}

/// Why a requested booking transition was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDenial {
    /// The actor does not own the booked business
    NotOwner,
    /// The requested move is not in the lifecycle table
    IllegalTransition,
}

/// Decide whether `actor_id` may move a booking from `current` to
/// `requested`.
///
/// Ownership is checked before the lifecycle table, so a non-owner is
/// denied without learning anything about the booking's state.
pub fn authorize_transition(
    owner_id: Uuid,
    actor_id: Uuid,
    current: BookingStatus,
    requested: BookingStatus,
) -> Result<(), TransitionDenial> {
    if owner_id != actor_id {
        return Err(TransitionDenial::NotOwner);
    }
    if !current.can_transition_to(requested) {
        return Err(TransitionDenial::IllegalTransition);
    }
    Ok(())
}

/// A customer's request to engage a business for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub business_id: Uuid,
    pub user_id: Uuid,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub event_type: String,
    pub guest_count: i32,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    #[test]
    fn test_status_string_round_trip() {
        for status in ALL {
            assert_eq!(BookingStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::from_str("approved"), None);
        assert_eq!(BookingStatus::from_str(""), None);
    }

    #[test]
    fn test_pending_transitions() {
        let pending = BookingStatus::Pending;
        assert!(pending.can_transition_to(BookingStatus::Confirmed));
        assert!(pending.can_transition_to(BookingStatus::Cancelled));
        assert!(!pending.can_transition_to(BookingStatus::Completed));
        assert!(!pending.can_transition_to(BookingStatus::Pending));
    }

    #[test]
    fn test_confirmed_transitions() {
        let confirmed = BookingStatus::Confirmed;
        assert!(confirmed.can_transition_to(BookingStatus::Completed));
        assert!(confirmed.can_transition_to(BookingStatus::Cancelled));
        assert!(!confirmed.can_transition_to(BookingStatus::Pending));
        assert!(!confirmed.can_transition_to(BookingStatus::Confirmed));
    }

    #[test]
    fn test_terminal_states_allow_nothing() {
        for terminal in [BookingStatus::Completed, BookingStatus::Cancelled] {
            assert!(terminal.is_terminal());
            for next in ALL {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_initial_status_is_pending() {
        assert_eq!(BookingStatus::initial(), BookingStatus::Pending);
        assert!(!BookingStatus::initial().is_terminal());
    }

    #[test]
    fn test_transition_authorization_checks_ownership_first() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert_eq!(
            authorize_transition(owner, owner, BookingStatus::Pending, BookingStatus::Confirmed),
            Ok(())
        );
        // A non-owner is denied even for a move the table would allow
        assert_eq!(
            authorize_transition(owner, stranger, BookingStatus::Pending, BookingStatus::Confirmed),
            Err(TransitionDenial::NotOwner)
        );
        assert_eq!(
            authorize_transition(owner, owner, BookingStatus::Completed, BookingStatus::Cancelled),
            Err(TransitionDenial::IllegalTransition)
        );
    }
}
