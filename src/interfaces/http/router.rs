//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, EmptyData};
use super::middleware::{auth_middleware, require_manager, AuthState};
use super::modules::health::{self, HealthState};
use super::modules::hotels::{self, HotelState};
use super::modules::manager_reservations::{self, ManagerReservationState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::reservations::{self, GuestReservationState};
use super::modules::room_types::{self, RoomTypeState};
use super::modules::rooms::{self, RoomState};
use crate::application::{
    AvailabilityService, BookingRequest, CreateHotelRequest, CreateRoomRequest,
    CreateRoomTypeRequest, GuestReservationService, HotelService, ManagerReservationService,
    ReservationChangeRequest, ReservationOrchestrator, RoomService, RoomTypeService,
    SetPricesRequest, UpdateRoomRequest, UpdateRoomTypeRequest,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;

/// Everything the routes need, grouped per route family.
#[derive(Clone)]
pub struct ApiState {
    pub auth: AuthState,
    pub hotels: HotelState,
    pub guest_reservations: GuestReservationState,
    pub manager_reservations: ManagerReservationState,
    pub rooms: RoomState,
    pub room_types: RoomTypeState,
    pub health: HealthState,
    pub metrics: MetricsState,
}

impl ApiState {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        orchestrator: Arc<ReservationOrchestrator>,
        jwt_config: JwtConfig,
        db: Option<DatabaseConnection>,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            auth: AuthState { jwt_config },
            hotels: HotelState {
                hotels: HotelService::new(repos.clone()),
                availability: AvailabilityService::new(repos.clone()),
            },
            guest_reservations: GuestReservationState {
                reservations: GuestReservationService::new(repos.clone(), orchestrator.clone()),
            },
            manager_reservations: ManagerReservationState {
                reservations: ManagerReservationService::new(repos.clone(), orchestrator),
            },
            rooms: RoomState {
                rooms: RoomService::new(repos.clone()),
            },
            room_types: RoomTypeState {
                room_types: RoomTypeService::new(repos),
            },
            health: HealthState {
                db,
                started_at: Arc::new(Instant::now()),
            },
            metrics: MetricsState {
                handle: metrics_handle,
            },
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token; role `manager` unlocks /manager routes"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        // Hotels
        hotels::list_hotels,
        hotels::get_hotel,
        hotels::search_hotels,
        hotels::search_available_hotels,
        hotels::list_room_types,
        hotels::room_type_availability,
        hotels::create_hotel,
        // Guest reservations
        reservations::list_my_reservations,
        reservations::create_reservation,
        reservations::get_my_reservation,
        reservations::modify_my_reservation,
        reservations::cancel_my_reservation,
        // Manager reservations
        manager_reservations::list_hotel_reservations,
        manager_reservations::get_hotel_reservation,
        manager_reservations::modify_hotel_reservation,
        manager_reservations::check_in,
        manager_reservations::check_out,
        manager_reservations::mark_no_show,
        manager_reservations::apply_upgrade,
        manager_reservations::set_upgrade_status,
        manager_reservations::reservation_history,
        manager_reservations::cancel_hotel_reservation,
        // Rooms
        rooms::list_rooms,
        rooms::create_room,
        rooms::update_room,
        rooms::delete_room,
        // Room types
        room_types::create_room_type,
        room_types::update_room_type,
        room_types::set_room_type_prices,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            health::ComponentHealth,
            hotels::HotelDto,
            hotels::RoomTypeDto,
            hotels::RoomTypeAvailabilityDto,
            CreateHotelRequest,
            reservations::ReservationDto,
            BookingRequest,
            ReservationChangeRequest,
            manager_reservations::ApplyUpgradeRequest,
            manager_reservations::UpgradeStatusRequest,
            manager_reservations::StatusChangeDto,
            rooms::RoomDto,
            CreateRoomRequest,
            UpdateRoomRequest,
            room_types::PriceWindowDto,
            CreateRoomTypeRequest,
            UpdateRoomTypeRequest,
            SetPricesRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability."),
        (name = "Hotels", description = "Public catalogue: hotels, room types and per-night availability for a stay `[check_in, check_out)`."),
        (name = "Reservations", description = "Guest bookings. A guest sees only their own reservations and may change dates and guest count."),
        (name = "Manager", description = "Hotel staff: reservation desk, lifecycle events (check-in, check-out, no-show, cancel), upgrades and status history. Requires role `manager`."),
        (name = "Rooms", description = "Physical rooms of a hotel. Requires role `manager`."),
        (name = "Room Types", description = "Room types and nightly prices. Requires role `manager`."),
    ),
    info(
        title = "AirHotel Reservation API",
        version = "1.0.0",
        description = "Hotel reservation backend.

All endpoints answer with `{\"success\": bool, \"data\": ..., \"error\": \"...\"}`.
Dates are ISO `YYYY-MM-DD`; a stay is the half-open window `[check_in, check_out)`.
Money is a decimal string (`\"200.00\"`) with an ISO 4217 currency code."
    )
)]
pub struct ApiDoc;

pub fn create_api_router(state: ApiState) -> Router {
    let authenticate = middleware::from_fn_with_state(state.auth.clone(), auth_middleware);

    let public_hotels = Router::new()
        .route("/api/v1/hotels", get(hotels::list_hotels))
        .route("/api/v1/hotels/search", get(hotels::search_hotels))
        .route(
            "/api/v1/hotels/search/available",
            get(hotels::search_available_hotels),
        )
        .route("/api/v1/hotels/{id}", get(hotels::get_hotel))
        .route("/api/v1/hotels/{id}/room-types", get(hotels::list_room_types))
        .route(
            "/api/v1/hotels/{id}/room-types/availability",
            get(hotels::room_type_availability),
        )
        .with_state(state.hotels.clone());

    let guest_reservations = Router::new()
        .route(
            "/api/v1/reservations",
            get(reservations::list_my_reservations).post(reservations::create_reservation),
        )
        .route(
            "/api/v1/reservations/{id}",
            get(reservations::get_my_reservation)
                .patch(reservations::modify_my_reservation)
                .delete(reservations::cancel_my_reservation),
        )
        .layer(authenticate.clone())
        .with_state(state.guest_reservations.clone());

    let manager_hotels = Router::new()
        .route("/api/v1/manager/hotels", post(hotels::create_hotel))
        .with_state(state.hotels.clone());

    let manager_reservations = Router::new()
        .route(
            "/reservations",
            get(manager_reservations::list_hotel_reservations),
        )
        .route(
            "/reservations/{id}",
            get(manager_reservations::get_hotel_reservation)
                .patch(manager_reservations::modify_hotel_reservation)
                .delete(manager_reservations::cancel_hotel_reservation),
        )
        .route(
            "/reservations/{id}/check-in",
            patch(manager_reservations::check_in),
        )
        .route(
            "/reservations/{id}/check-out",
            patch(manager_reservations::check_out),
        )
        .route(
            "/reservations/{id}/no-show",
            patch(manager_reservations::mark_no_show),
        )
        .route(
            "/reservations/{id}/apply-upgrade",
            patch(manager_reservations::apply_upgrade),
        )
        .route(
            "/reservations/{id}/upgrade-status",
            patch(manager_reservations::set_upgrade_status),
        )
        .route(
            "/reservations/{id}/history",
            get(manager_reservations::reservation_history),
        )
        .with_state(state.manager_reservations.clone());

    let manager_rooms = Router::new()
        .route("/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/rooms/{room_id}",
            patch(rooms::update_room).delete(rooms::delete_room),
        )
        .with_state(state.rooms.clone());

    let manager_room_types = Router::new()
        .route("/room-types", post(room_types::create_room_type))
        .route("/room-types/{id}", patch(room_types::update_room_type))
        .route(
            "/room-types/{id}/prices",
            put(room_types::set_room_type_prices),
        )
        .with_state(state.room_types.clone());

    // manager gate runs after authentication
    let manager = Router::new()
        .merge(manager_hotels)
        .nest(
            "/api/v1/manager/hotels/{hotel_id}",
            manager_reservations
                .merge(manager_rooms)
                .merge(manager_room_types),
        )
        .layer(middleware::from_fn(require_manager))
        .layer(authenticate);

    let metrics_route = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(state.metrics.clone());

    let health_route = Router::new()
        .route("/health", get(health::health_check))
        .with_state(state.health.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .merge(health_route)
        .merge(public_hotels)
        .merge(guest_reservations)
        .merge(manager)
        .route_layer(middleware::from_fn(http_metrics_middleware));

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(metrics_route)
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
