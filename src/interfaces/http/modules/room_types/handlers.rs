//! Room type handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{PriceWindowDto, RoomTypeDto};
use crate::application::{
    CreateRoomTypeRequest, RoomTypeService, SetPricesRequest, UpdateRoomTypeRequest,
};
use crate::interfaces::http::common::{
    domain_error_response, ApiError, ApiResponse, ApiResult, ValidatedJson,
};

#[derive(Clone)]
pub struct RoomTypeState {
    pub room_types: RoomTypeService,
}

#[utoipa::path(
    post,
    path = "/api/v1/manager/hotels/{hotel_id}/room-types",
    tag = "Room Types",
    params(("hotel_id" = i64, Path, description = "Hotel ID")),
    request_body = CreateRoomTypeRequest,
    responses(
        (status = 201, description = "Room type created", body = ApiResponse<RoomTypeDto>),
        (status = 400, description = "Invalid capacity, count or rate"),
        (status = 404, description = "Hotel not found"),
        (status = 409, description = "Code already in use")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_room_type(
    State(state): State<RoomTypeState>,
    Path(hotel_id): Path<i64>,
    ValidatedJson(body): ValidatedJson<CreateRoomTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomTypeDto>>), ApiError> {
    let room_type = state
        .room_types
        .create(hotel_id, body)
        .await
        .map_err(domain_error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(room_type.into())),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/v1/manager/hotels/{hotel_id}/room-types/{id}",
    tag = "Room Types",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("id" = i64, Path, description = "Room type ID")
    ),
    request_body = UpdateRoomTypeRequest,
    responses(
        (status = 200, description = "Room type updated", body = ApiResponse<RoomTypeDto>),
        (status = 400, description = "Invalid capacity, count or rate"),
        (status = 404, description = "Room type not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_room_type(
    State(state): State<RoomTypeState>,
    Path((hotel_id, id)): Path<(i64, i64)>,
    ValidatedJson(body): ValidatedJson<UpdateRoomTypeRequest>,
) -> ApiResult<RoomTypeDto> {
    let room_type = state
        .room_types
        .update(hotel_id, id, body)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(room_type.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/manager/hotels/{hotel_id}/room-types/{id}/prices",
    tag = "Room Types",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("id" = i64, Path, description = "Room type ID")
    ),
    request_body = SetPricesRequest,
    responses(
        (status = 200, description = "Nightly prices set for [start_date, end_date)", body = ApiResponse<PriceWindowDto>),
        (status = 400, description = "Invalid window or negative price"),
        (status = 404, description = "Room type not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_room_type_prices(
    State(state): State<RoomTypeState>,
    Path((hotel_id, id)): Path<(i64, i64)>,
    ValidatedJson(body): ValidatedJson<SetPricesRequest>,
) -> ApiResult<PriceWindowDto> {
    let window = PriceWindowDto {
        room_type_id: id,
        start_date: body.start_date,
        end_date: body.end_date,
        nights: (body.end_date - body.start_date).num_days(),
        price: body.price,
    };
    state
        .room_types
        .set_prices(hotel_id, id, body)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(window)))
}
