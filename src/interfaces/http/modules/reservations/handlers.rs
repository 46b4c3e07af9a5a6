//! Guest reservation handlers
//!
//! The caller is always the token subject; another user's reservation is
//! reported as not found.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{to_dtos, ReservationDto};
use crate::application::{BookingRequest, GuestReservationService, ReservationChangeRequest};
use crate::interfaces::http::common::{
    domain_error_response, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct GuestReservationState {
    pub reservations: GuestReservationService,
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    responses(
        (status = 200, description = "Own reservations, newest first", body = ApiResponse<Vec<ReservationDto>>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_my_reservations(
    State(state): State<GuestReservationState>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<ReservationDto>> {
    let details = state
        .reservations
        .list(&user.actor())
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(to_dtos(details))))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Reservation created (Pending)", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid dates, guest count or currency"),
        (status = 404, description = "Hotel or room type not found"),
        (status = 409, description = "No availability")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_reservation(
    State(state): State<GuestReservationState>,
    user: AuthenticatedUser,
    ValidatedJson(body): ValidatedJson<BookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), ApiError> {
    let created = state
        .reservations
        .create(&user.actor(), body)
        .await
        .map_err(domain_error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_my_reservation(
    State(state): State<GuestReservationState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<ReservationDto> {
    let details = state
        .reservations
        .get(&user.actor(), id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}

/// Guests may move dates and change the guest count. Any other field in
/// the body is ignored.
#[utoipa::path(
    patch,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i64, Path, description = "Reservation ID")),
    request_body = ReservationChangeRequest,
    responses(
        (status = 200, description = "Updated reservation", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid change"),
        (status = 404, description = "Not found"),
        (status = 409, description = "No availability or concurrent update")
    ),
    security(("bearer_auth" = []))
)]
pub async fn modify_my_reservation(
    State(state): State<GuestReservationState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<ReservationChangeRequest>,
) -> ApiResult<ReservationDto> {
    let details = state
        .reservations
        .modify(&user.actor(), id, &body)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Canceled reservation", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Reservation can no longer be canceled"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_my_reservation(
    State(state): State<GuestReservationState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<ReservationDto> {
    let details = state
        .reservations
        .cancel(&user.actor(), id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}
