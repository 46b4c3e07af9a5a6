//! Manager reservation handlers
//!
//! Every route is scoped to `/manager/hotels/{hotel_id}`; a reservation of
//! another hotel is reported as not found.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    ApplyUpgradeRequest, CancelQuery, ManagerReservationQuery, StatusChangeDto,
    UpgradeStatusRequest,
};
use crate::application::{ManagerReservationService, ReservationChangeRequest};
use crate::domain::UpgradeStatus;
use crate::interfaces::http::common::{
    domain_error_response, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::reservations::dto::{to_dtos, ReservationDto};

#[derive(Clone)]
pub struct ManagerReservationState {
    pub reservations: ManagerReservationService,
}

#[utoipa::path(
    get,
    path = "/api/v1/manager/hotels/{hotel_id}/reservations",
    tag = "Manager",
    params(("hotel_id" = i64, Path, description = "Hotel ID"), ManagerReservationQuery),
    responses(
        (status = 200, description = "Reservations of the hotel", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Unknown status filter"),
        (status = 404, description = "Hotel not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_hotel_reservations(
    State(state): State<ManagerReservationState>,
    Path(hotel_id): Path<i64>,
    Query(query): Query<ManagerReservationQuery>,
) -> ApiResult<Vec<ReservationDto>> {
    let filter = query.to_filter().map_err(domain_error_response)?;
    let details = state
        .reservations
        .list(hotel_id, &filter)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(to_dtos(details))))
}

#[utoipa::path(
    get,
    path = "/api/v1/manager/hotels/{hotel_id}/reservations/{id}",
    tag = "Manager",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_hotel_reservation(
    State(state): State<ManagerReservationState>,
    Path((hotel_id, id)): Path<(i64, i64)>,
) -> ApiResult<ReservationDto> {
    let details = state
        .reservations
        .get(hotel_id, id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/manager/hotels/{hotel_id}/reservations/{id}",
    tag = "Manager",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("id" = i64, Path, description = "Reservation ID")
    ),
    request_body = ReservationChangeRequest,
    responses(
        (status = 200, description = "Updated reservation", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid change or status transition"),
        (status = 404, description = "Not found"),
        (status = 409, description = "No availability or concurrent update")
    ),
    security(("bearer_auth" = []))
)]
pub async fn modify_hotel_reservation(
    State(state): State<ManagerReservationState>,
    user: AuthenticatedUser,
    Path((hotel_id, id)): Path<(i64, i64)>,
    ValidatedJson(body): ValidatedJson<ReservationChangeRequest>,
) -> ApiResult<ReservationDto> {
    let details = state
        .reservations
        .modify(&user.actor(), hotel_id, id, &body)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/manager/hotels/{hotel_id}/reservations/{id}/check-in",
    tag = "Manager",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Checked in (idempotent)", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Canceled or not checkable-in"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn check_in(
    State(state): State<ManagerReservationState>,
    user: AuthenticatedUser,
    Path((hotel_id, id)): Path<(i64, i64)>,
) -> ApiResult<ReservationDto> {
    let details = state
        .reservations
        .check_in(&user.actor(), hotel_id, id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/manager/hotels/{hotel_id}/reservations/{id}/check-out",
    tag = "Manager",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Checked out (idempotent)", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Canceled or not checked in"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn check_out(
    State(state): State<ManagerReservationState>,
    user: AuthenticatedUser,
    Path((hotel_id, id)): Path<(i64, i64)>,
) -> ApiResult<ReservationDto> {
    let details = state
        .reservations
        .check_out(&user.actor(), hotel_id, id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/manager/hotels/{hotel_id}/reservations/{id}/no-show",
    tag = "Manager",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Marked as no-show", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid status transition"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn mark_no_show(
    State(state): State<ManagerReservationState>,
    user: AuthenticatedUser,
    Path((hotel_id, id)): Path<(i64, i64)>,
) -> ApiResult<ReservationDto> {
    let details = state
        .reservations
        .no_show(&user.actor(), hotel_id, id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/manager/hotels/{hotel_id}/reservations/{id}/apply-upgrade",
    tag = "Manager",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("id" = i64, Path, description = "Reservation ID")
    ),
    request_body = ApplyUpgradeRequest,
    responses(
        (status = 200, description = "Upgrade applied", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Not eligible for an upgrade"),
        (status = 404, description = "Reservation or room type not found"),
        (status = 409, description = "No availability in the target room type")
    ),
    security(("bearer_auth" = []))
)]
pub async fn apply_upgrade(
    State(state): State<ManagerReservationState>,
    user: AuthenticatedUser,
    Path((hotel_id, id)): Path<(i64, i64)>,
    ValidatedJson(body): ValidatedJson<ApplyUpgradeRequest>,
) -> ApiResult<ReservationDto> {
    let details = state
        .reservations
        .apply_upgrade(&user.actor(), hotel_id, id, body.room_type_id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/manager/hotels/{hotel_id}/reservations/{id}/upgrade-status",
    tag = "Manager",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("id" = i64, Path, description = "Reservation ID")
    ),
    request_body = UpgradeStatusRequest,
    responses(
        (status = 200, description = "Upgrade status changed", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Unknown status or invalid upgrade transition"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_upgrade_status(
    State(state): State<ManagerReservationState>,
    Path((hotel_id, id)): Path<(i64, i64)>,
    ValidatedJson(body): ValidatedJson<UpgradeStatusRequest>,
) -> ApiResult<ReservationDto> {
    let status: UpgradeStatus = body.upgrade_status.parse().map_err(domain_error_response)?;
    let details = state
        .reservations
        .set_upgrade_status(hotel_id, id, status)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/manager/hotels/{hotel_id}/reservations/{id}/history",
    tag = "Manager",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Status changes, oldest first", body = ApiResponse<Vec<StatusChangeDto>>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reservation_history(
    State(state): State<ManagerReservationState>,
    Path((hotel_id, id)): Path<(i64, i64)>,
) -> ApiResult<Vec<StatusChangeDto>> {
    let history = state
        .reservations
        .history(hotel_id, id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        history.into_iter().map(StatusChangeDto::from).collect(),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/manager/hotels/{hotel_id}/reservations/{id}",
    tag = "Manager",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("id" = i64, Path, description = "Reservation ID"),
        CancelQuery
    ),
    responses(
        (status = 200, description = "Canceled reservation", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Reservation can no longer be canceled"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_hotel_reservation(
    State(state): State<ManagerReservationState>,
    user: AuthenticatedUser,
    Path((hotel_id, id)): Path<(i64, i64)>,
    Query(query): Query<CancelQuery>,
) -> ApiResult<ReservationDto> {
    let details = state
        .reservations
        .cancel(&user.actor(), hotel_id, id, query.reason)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    use crate::interfaces::http::testing::{guest, manager, TestApp, MANAGER_ID};

    fn base(app: &TestApp, r: &Value) -> String {
        format!(
            "/api/v1/manager/hotels/{}/reservations/{}",
            app.seed.hotel_id, r["id"]
        )
    }

    async fn confirm(app: &TestApp, r: &Value) {
        let (status, body) = app
            .send(
                Method::PATCH,
                &base(app, r),
                manager(),
                Some(json!({"status": "Confirmed"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
    }

    #[tokio::test]
    async fn guests_cannot_use_the_desk() {
        let app = TestApp::new().await;
        let uri = format!("/api/v1/manager/hotels/{}/reservations", app.seed.hotel_id);
        let (status, _) = app.get(&uri, guest()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = app.get(&uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn listing_filters_by_status() {
        let app = TestApp::new().await;
        let first = app.book_standard(1).await;
        app.book_standard(2).await;
        confirm(&app, &first).await;

        let uri = format!("/api/v1/manager/hotels/{}/reservations", app.seed.hotel_id);
        let (_, body) = app.get(&uri, manager()).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (_, body) = app.get(&format!("{}?status=Confirmed", uri), manager()).await;
        let confirmed = body["data"].as_array().unwrap();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0]["id"], first["id"]);

        let (status, _) = app.get(&format!("{}?status=Lost", uri), manager()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn stay_lifecycle_is_recorded() {
        let app = TestApp::new().await;
        let r = app.book_standard(1).await;
        confirm(&app, &r).await;

        let check_in = format!("{}/check-in", base(&app, &r));
        let (status, body) = app.send(Method::PATCH, &check_in, manager(), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "CheckedIn");

        // repeated check-in is a no-op
        let (status, body) = app.send(Method::PATCH, &check_in, manager(), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "CheckedIn");

        let (status, _) = app
            .send(Method::PATCH, &format!("{}/check-out", base(&app, &r)), manager(), None)
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = app
            .get(&format!("{}/history", base(&app, &r)), manager())
            .await;
        let history = body["data"].as_array().unwrap();
        let steps: Vec<(&str, &str)> = history
            .iter()
            .map(|h| {
                (
                    h["from_status"].as_str().unwrap(),
                    h["to_status"].as_str().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            steps,
            vec![
                ("Pending", "Confirmed"),
                ("Confirmed", "CheckedIn"),
                ("CheckedIn", "CheckedOut")
            ]
        );
        assert_eq!(history[0]["changed_by"], MANAGER_ID);
    }

    #[tokio::test]
    async fn illegal_transitions_are_400() {
        let app = TestApp::new().await;
        let r = app.book_standard(1).await;

        let (status, body) = app
            .send(Method::PATCH, &format!("{}/check-out", base(&app, &r)), manager(), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Pending -> CheckedOut"));
    }

    #[tokio::test]
    async fn canceled_reservation_cannot_check_in() {
        let app = TestApp::new().await;
        let r = app.book_standard(1).await;

        let (status, body) = app
            .send(
                Method::DELETE,
                &format!("{}?reason=overbooked", base(&app, &r)),
                manager(),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "Canceled");

        let (status, body) = app
            .send(Method::PATCH, &format!("{}/check-in", base(&app, &r)), manager(), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation: Reservation has already been cancelled.");

        let (_, body) = app
            .get(&format!("{}/history", base(&app, &r)), manager())
            .await;
        assert_eq!(body["data"][0]["reason"], "overbooked");
    }

    #[tokio::test]
    async fn upgrade_needs_eligibility_first() {
        let app = TestApp::new().await;
        let r = app.book_standard(1).await;
        let upgrade = json!({"room_type_id": app.seed.deluxe.id});

        let (status, _) = app
            .send(
                Method::PATCH,
                &format!("{}/apply-upgrade", base(&app, &r)),
                manager(),
                Some(upgrade.clone()),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .send(
                Method::PATCH,
                &format!("{}/upgrade-status", base(&app, &r)),
                manager(),
                Some(json!({"upgrade_status": "Eligible"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["upgrade_status"], "Eligible");

        let (status, body) = app
            .send(
                Method::PATCH,
                &format!("{}/apply-upgrade", base(&app, &r)),
                manager(),
                Some(upgrade),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["data"]["room_type_id"], app.seed.deluxe.id);
        assert_eq!(body["data"]["upgrade_status"], "Applied");
        assert_eq!(body["data"]["status"], "Pending");
        assert!(!body["data"]["upgraded_at"].is_null());
    }

    #[tokio::test]
    async fn unknown_upgrade_status_is_400() {
        let app = TestApp::new().await;
        let r = app.book_standard(1).await;
        let (status, _) = app
            .send(
                Method::PATCH,
                &format!("{}/upgrade-status", base(&app, &r)),
                manager(),
                Some(json!({"upgrade_status": "Maybe"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn reservation_of_another_hotel_is_404() {
        let app = TestApp::new().await;
        let r = app.book_standard(1).await;
        let uri = format!(
            "/api/v1/manager/hotels/{}/reservations/{}",
            app.seed.other_hotel_id, r["id"]
        );
        let (status, _) = app.get(&uri, manager()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
