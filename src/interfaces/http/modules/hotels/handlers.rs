//! Hotel API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AvailabilityQuery, AvailableHotelsQuery, CitySearchQuery, HotelDto, RoomTypeAvailabilityDto,
    RoomTypeDto,
};
use crate::application::{AvailabilityService, CreateHotelRequest, HotelService};
use crate::interfaces::http::common::{
    domain_error_response, ApiError, ApiResponse, ApiResult, ValidatedJson,
};

#[derive(Clone)]
pub struct HotelState {
    pub hotels: HotelService,
    pub availability: AvailabilityService,
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels",
    tag = "Hotels",
    responses(
        (status = 200, description = "All hotels", body = ApiResponse<Vec<HotelDto>>)
    )
)]
pub async fn list_hotels(State(state): State<HotelState>) -> ApiResult<Vec<HotelDto>> {
    let hotels = state.hotels.list().await.map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        hotels.into_iter().map(HotelDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}",
    tag = "Hotels",
    params(("id" = i64, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Hotel", body = ApiResponse<HotelDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_hotel(State(state): State<HotelState>, Path(id): Path<i64>) -> ApiResult<HotelDto> {
    let hotel = state.hotels.get(id).await.map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(hotel.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/search",
    tag = "Hotels",
    params(CitySearchQuery),
    responses(
        (status = 200, description = "Hotels whose city starts with the keyword", body = ApiResponse<Vec<HotelDto>>),
        (status = 400, description = "Blank keyword")
    )
)]
pub async fn search_hotels(
    State(state): State<HotelState>,
    Query(query): Query<CitySearchQuery>,
) -> ApiResult<Vec<HotelDto>> {
    let hotels = state
        .hotels
        .search_by_city(&query.city)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        hotels.into_iter().map(HotelDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/search/available",
    tag = "Hotels",
    params(AvailableHotelsQuery),
    responses(
        (status = 200, description = "Hotels with at least one free room type for the stay", body = ApiResponse<Vec<HotelDto>>),
        (status = 400, description = "Blank keyword or invalid dates")
    )
)]
pub async fn search_available_hotels(
    State(state): State<HotelState>,
    Query(query): Query<AvailableHotelsQuery>,
) -> ApiResult<Vec<HotelDto>> {
    let hotels = state
        .hotels
        .search_available(&query.city, query.check_in, query.check_out)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        hotels.into_iter().map(HotelDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/room-types",
    tag = "Hotels",
    params(("id" = i64, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Room types of the hotel", body = ApiResponse<Vec<RoomTypeDto>>),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn list_room_types(
    State(state): State<HotelState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<RoomTypeDto>> {
    let room_types = state
        .hotels
        .room_types(id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        room_types.into_iter().map(RoomTypeDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/room-types/availability",
    tag = "Hotels",
    params(("id" = i64, Path, description = "Hotel ID"), AvailabilityQuery),
    responses(
        (status = 200, description = "Per room type availability", body = ApiResponse<Vec<RoomTypeAvailabilityDto>>),
        (status = 400, description = "Invalid dates or guest count"),
        (status = 404, description = "Hotel not found")
    )
)]
pub async fn room_type_availability(
    State(state): State<HotelState>,
    Path(id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<Vec<RoomTypeAvailabilityDto>> {
    let availability = state
        .availability
        .availability(id, query.check_in, query.check_out, query.num_guests)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        availability
            .into_iter()
            .map(RoomTypeAvailabilityDto::from)
            .collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/manager/hotels",
    tag = "Manager",
    request_body = CreateHotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = ApiResponse<HotelDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Manager role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_hotel(
    State(state): State<HotelState>,
    ValidatedJson(body): ValidatedJson<CreateHotelRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HotelDto>>), ApiError> {
    let hotel = state.hotels.create(body).await.map_err(domain_error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(hotel.into()))))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::interfaces::http::testing::{guest, manager, TestApp};

    #[tokio::test]
    async fn catalogue_is_public() {
        let app = TestApp::new().await;
        let (status, body) = app.get("/api/v1/hotels", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let uri = format!("/api/v1/hotels/{}/room-types", app.seed.hotel_id);
        let (status, body) = app.get(&uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["code"], "STD");
        assert_eq!(body["data"][1]["base_rate"], "250.00");
    }

    #[tokio::test]
    async fn unknown_hotel_is_404() {
        let app = TestApp::new().await;
        let (status, body) = app.get("/api/v1/hotels/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn city_search_matches_prefix_and_rejects_blank() {
        let app = TestApp::new().await;
        let (status, body) = app.get("/api/v1/hotels/search?city=sea", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], "Harbor View");

        let (status, _) = app.get("/api/v1/hotels/search?city=%20", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn availability_reflects_bookings() {
        let app = TestApp::new().await;
        app.book_standard(2).await;

        let uri = format!(
            "/api/v1/hotels/{}/room-types/availability?check_in=2030-06-01&check_out=2030-06-03",
            app.seed.hotel_id
        );
        let (status, body) = app.get(&uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["available"], 2);
        assert_eq!(body["data"][1]["available"], 2);

        let (_, body) = app.get(&format!("{}&num_guests=3", uri), None).await;
        let types = body["data"].as_array().unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0]["code"], "DLX");
    }

    #[tokio::test]
    async fn availability_rejects_inverted_window() {
        let app = TestApp::new().await;
        let uri = format!(
            "/api/v1/hotels/{}/room-types/availability?check_in=2030-06-03&check_out=2030-06-01",
            app.seed.hotel_id
        );
        let (status, _) = app.get(&uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn available_search_skips_hotels_without_rooms() {
        let app = TestApp::new().await;
        let (status, body) = app
            .get(
                "/api/v1/hotels/search/available?city=Portland&check_in=2030-06-01&check_out=2030-06-02",
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn only_managers_create_hotels() {
        let app = TestApp::new().await;
        let hotel = json!({"name": "Bayside", "city": "Tacoma", "star_rating": 3});

        let (status, _) = app
            .send(Method::POST, "/api/v1/manager/hotels", guest(), Some(hotel.clone()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .send(Method::POST, "/api/v1/manager/hotels", manager(), Some(hotel))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["city"], "Tacoma");

        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/manager/hotels",
                manager(),
                Some(json!({"name": "Too Fancy", "city": "Tacoma", "star_rating": 6})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
