//! Room handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{RoomDto, RoomListQuery};
use crate::application::{CreateRoomRequest, RoomService, UpdateRoomRequest};
use crate::interfaces::http::common::{
    domain_error_response, ApiError, ApiResponse, ApiResult, EmptyData, ValidatedJson,
};

#[derive(Clone)]
pub struct RoomState {
    pub rooms: RoomService,
}

#[utoipa::path(
    get,
    path = "/api/v1/manager/hotels/{hotel_id}/rooms",
    tag = "Rooms",
    params(("hotel_id" = i64, Path, description = "Hotel ID"), RoomListQuery),
    responses(
        (status = 200, description = "Rooms of the hotel", body = ApiResponse<Vec<RoomDto>>),
        (status = 400, description = "Unknown status filter"),
        (status = 404, description = "Hotel not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_rooms(
    State(state): State<RoomState>,
    Path(hotel_id): Path<i64>,
    Query(query): Query<RoomListQuery>,
) -> ApiResult<Vec<RoomDto>> {
    let status = query.status().map_err(domain_error_response)?;
    let rooms = state
        .rooms
        .list(hotel_id, status)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/manager/hotels/{hotel_id}/rooms",
    tag = "Rooms",
    params(("hotel_id" = i64, Path, description = "Hotel ID")),
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = ApiResponse<RoomDto>),
        (status = 404, description = "Hotel or room type not found"),
        (status = 409, description = "Room number already in use")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_room(
    State(state): State<RoomState>,
    Path(hotel_id): Path<i64>,
    ValidatedJson(body): ValidatedJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomDto>>), ApiError> {
    let room = state
        .rooms
        .create(hotel_id, body)
        .await
        .map_err(domain_error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(room.into()))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/manager/hotels/{hotel_id}/rooms/{room_id}",
    tag = "Rooms",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("room_id" = i64, Path, description = "Room ID")
    ),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = ApiResponse<RoomDto>),
        (status = 404, description = "Room or room type not found"),
        (status = 409, description = "Room number already in use")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_room(
    State(state): State<RoomState>,
    Path((hotel_id, room_id)): Path<(i64, i64)>,
    ValidatedJson(body): ValidatedJson<UpdateRoomRequest>,
) -> ApiResult<RoomDto> {
    let room = state
        .rooms
        .update(hotel_id, room_id, body)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/manager/hotels/{hotel_id}/rooms/{room_id}",
    tag = "Rooms",
    params(
        ("hotel_id" = i64, Path, description = "Hotel ID"),
        ("room_id" = i64, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Room not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_room(
    State(state): State<RoomState>,
    Path((hotel_id, room_id)): Path<(i64, i64)>,
) -> ApiResult<EmptyData> {
    state
        .rooms
        .delete(hotel_id, room_id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::interfaces::http::testing::{guest, manager, TestApp};

    fn rooms_uri(app: &TestApp) -> String {
        format!("/api/v1/manager/hotels/{}/rooms", app.seed.hotel_id)
    }

    #[tokio::test]
    async fn create_list_and_filter() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send(
                Method::POST,
                &rooms_uri(&app),
                manager(),
                Some(json!({
                    "room_type_id": app.seed.standard.id,
                    "room_number": "102",
                    "floor": 1,
                    "status": "Maintenance"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        assert_eq!(body["data"]["status"], "Maintenance");

        let (_, body) = app.get(&rooms_uri(&app), manager()).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let (_, body) = app
            .get(&format!("{}?status=Maintenance", rooms_uri(&app)), manager())
            .await;
        let rooms = body["data"].as_array().unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0]["room_number"], "102");
    }

    #[tokio::test]
    async fn duplicate_number_is_409() {
        let app = TestApp::new().await;
        let (status, _) = app
            .send(
                Method::POST,
                &rooms_uri(&app),
                manager(),
                Some(json!({"room_type_id": app.seed.standard.id, "room_number": "101"})),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn room_type_of_another_hotel_is_404() {
        let app = TestApp::new().await;
        let uri = format!("/api/v1/manager/hotels/{}/rooms", app.seed.other_hotel_id);
        let (status, _) = app
            .send(
                Method::POST,
                &uri,
                manager(),
                Some(json!({"room_type_id": app.seed.standard.id, "room_number": "1"})),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_then_delete() {
        let app = TestApp::new().await;
        let uri = format!("{}/{}", rooms_uri(&app), app.seed.standard_room.id);

        let (status, body) = app
            .send(
                Method::PATCH,
                &uri,
                manager(),
                Some(json!({"status": "OutOfService", "floor": 2})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "OutOfService");
        assert_eq!(body["data"]["floor"], 2);
        assert_eq!(body["data"]["room_number"], "101");

        let (status, _) = app.send(Method::DELETE, &uri, manager(), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = app.send(Method::DELETE, &uri, manager(), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn guests_cannot_manage_rooms() {
        let app = TestApp::new().await;
        let (status, _) = app.get(&rooms_uri(&app), guest()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
