//! Response envelope and domain error mapping

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard API envelope
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty payload for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

pub type ApiError = (StatusCode, Json<ApiResponse<()>>);
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Map a domain error onto its HTTP status.
///
/// Policy rejections and illegal transitions share 400. Database failures
/// surface as 500 with a generic message; the detail only goes to the log.
pub fn domain_error_response(e: DomainError) -> ApiError {
    if e.is_transient() {
        error!(error = %e, "Storage failure");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Internal server error")),
        );
    }

    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::ForbiddenField { .. }
        | DomainError::InvalidTransition { .. }
        | DomainError::InvalidDateRange(_)
        | DomainError::InvalidGuestCount(_)
        | DomainError::InvalidPrice(_)
        | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NoAvailability { .. } | DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
    };
    if status == StatusCode::CONFLICT {
        warn!(error = %e, "Request conflicted");
    }
    (status, Json(ApiResponse::error(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChangeField, ReservationStatus};
    use chrono::NaiveDate;

    fn status_of(e: DomainError) -> StatusCode {
        domain_error_response(e).0
    }

    #[test]
    fn disallowed_mutations_share_bad_request() {
        assert_eq!(
            status_of(DomainError::ForbiddenField {
                field: ChangeField::RoomType,
                target: None,
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::InvalidTransition {
                from: ReservationStatus::CheckedOut,
                to: ReservationStatus::Canceled,
            }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn availability_and_conflicts_map_to_409() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(
            status_of(DomainError::NoAvailability {
                room_type_id: 1,
                date
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::Conflict("stale".into())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn database_errors_hide_their_detail() {
        let (status, Json(body)) =
            domain_error_response(DomainError::Validation("Database error: disk I/O".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }

    #[test]
    fn not_found_keeps_message() {
        let (status, Json(body)) = domain_error_response(DomainError::not_found("Hotel", 9));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("Not found: Hotel with id=9"));
    }
}
