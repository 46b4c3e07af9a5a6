//! Domain errors

use chrono::NaiveDate;
use thiserror::Error;

use super::reservation::{ChangeField, ReservationStatus};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// The acting role may not touch this field.
    #[error("{}", forbidden_message(*.field, *.target))]
    ForbiddenField {
        field: ChangeField,
        target: Option<ReservationStatus>,
    },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Invalid guest count: {0}")]
    InvalidGuestCount(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("No availability on {date} for the target room type {room_type_id}.")]
    NoAvailability { room_type_id: i64, date: NaiveDate },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

fn forbidden_message(field: ChangeField, target: Option<ReservationStatus>) -> String {
    match (field, target) {
        (ChangeField::RoomType, _) => "Not allowed to change room type.".to_string(),
        (ChangeField::Room, _) => "Not allowed to assign a concrete room.".to_string(),
        (ChangeField::Status, Some(to)) => format!("Not allowed to change status to {}", to),
        (ChangeField::Status, None) => "Not allowed to change status.".to_string(),
    }
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            // DB errors mapped from repositories contain "Database error:" prefix
            DomainError::Validation(msg) => msg.starts_with("Database error:"),
            _ => false,
        }
    }

    /// Policy rejections and illegal transitions are both a disallowed mutation.
    pub fn is_disallowed_mutation(&self) -> bool {
        matches!(
            self,
            DomainError::ForbiddenField { .. } | DomainError::InvalidTransition { .. }
        )
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "not_found",
            DomainError::ForbiddenField { .. } => "forbidden_field",
            DomainError::InvalidTransition { .. } => "invalid_transition",
            DomainError::InvalidDateRange(_) => "invalid_date_range",
            DomainError::InvalidGuestCount(_) => "invalid_guest_count",
            DomainError::InvalidPrice(_) => "invalid_price",
            DomainError::NoAvailability { .. } => "no_availability",
            DomainError::Validation(_) => "validation",
            DomainError::Conflict(_) => "conflict",
            DomainError::Unauthorized(_) => "unauthorized",
            DomainError::Forbidden(_) => "forbidden",
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_field_messages_name_the_field() {
        let e = DomainError::ForbiddenField {
            field: ChangeField::RoomType,
            target: None,
        };
        assert_eq!(e.to_string(), "Not allowed to change room type.");

        let e = DomainError::ForbiddenField {
            field: ChangeField::Status,
            target: Some(ReservationStatus::Confirmed),
        };
        assert_eq!(e.to_string(), "Not allowed to change status to Confirmed");
    }

    #[test]
    fn database_errors_are_transient() {
        assert!(DomainError::Validation("Database error: locked".into()).is_transient());
        assert!(!DomainError::Validation("bad input".into()).is_transient());
    }

    #[test]
    fn policy_and_transition_errors_share_a_category() {
        let forbidden = DomainError::ForbiddenField {
            field: ChangeField::Room,
            target: None,
        };
        let transition = DomainError::InvalidTransition {
            from: ReservationStatus::Pending,
            to: ReservationStatus::CheckedIn,
        };
        assert!(forbidden.is_disallowed_mutation());
        assert!(transition.is_disallowed_mutation());
        assert!(!DomainError::Conflict("x".into()).is_disallowed_mutation());
    }
}
