//! Room type management and nightly prices (manager)

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use super::guards;

/// Longest window a single price update may cover.
const MAX_PRICE_WINDOW_NIGHTS: i32 = 366;
use crate::domain::{
    DomainError, DomainResult, NewRoomType, RepositoryProvider, RoomType, StayRange,
};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoomTypeRequest {
    #[validate(length(min = 1, max = 20, message = "code is required"))]
    pub code: String,
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub bed_type: Option<String>,
    #[validate(range(min = 1, message = "capacity must be at least 1"))]
    pub capacity: i32,
    #[validate(range(min = 0, message = "total rooms cannot be negative"))]
    pub total_rooms: i32,
    #[schema(value_type = Option<String>, example = "129.00")]
    pub base_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomTypeRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub bed_type: Option<String>,
    #[validate(range(min = 1, message = "capacity must be at least 1"))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0, message = "total rooms cannot be negative"))]
    pub total_rooms: Option<i32>,
    #[schema(value_type = Option<String>, example = "139.00")]
    pub base_rate: Option<Decimal>,
}

/// One price for every night in `[start_date, end_date)`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SetPricesRequest {
    #[schema(value_type = String, format = Date, example = "2025-12-20")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2026-01-03")]
    pub end_date: NaiveDate,
    #[schema(value_type = String, example = "189.00")]
    pub price: Decimal,
}

#[derive(Clone)]
pub struct RoomTypeService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RoomTypeService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, hotel_id: i64) -> DomainResult<Vec<RoomType>> {
        guards::ensure_hotel_exists(self.repos.as_ref(), hotel_id).await?;
        self.repos.room_types().find_by_hotel(hotel_id).await
    }

    pub async fn create(&self, hotel_id: i64, req: CreateRoomTypeRequest) -> DomainResult<RoomType> {
        guards::ensure_hotel_exists(self.repos.as_ref(), hotel_id).await?;
        check_counts(Some(req.capacity), Some(req.total_rooms), req.base_rate)?;

        let code = req.code.trim().to_uppercase();
        if self
            .repos
            .room_types()
            .find_by_code(hotel_id, &code)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "Room type code {} already exists in this hotel.",
                code
            )));
        }

        let room_type = self
            .repos
            .room_types()
            .create(NewRoomType {
                hotel_id,
                code,
                name: req.name,
                description: req.description,
                bed_type: req.bed_type,
                capacity: req.capacity,
                total_rooms: req.total_rooms,
                base_rate: req.base_rate,
            })
            .await?;
        info!(hotel_id, room_type_id = room_type.id, code = %room_type.code, "Room type created");
        Ok(room_type)
    }

    pub async fn update(
        &self,
        hotel_id: i64,
        room_type_id: i64,
        req: UpdateRoomTypeRequest,
    ) -> DomainResult<RoomType> {
        let mut room_type =
            guards::room_type_in_hotel(self.repos.as_ref(), hotel_id, room_type_id).await?;
        check_counts(req.capacity, req.total_rooms, req.base_rate)?;

        if let Some(name) = req.name {
            room_type.name = name;
        }
        if let Some(description) = req.description {
            room_type.description = Some(description);
        }
        if let Some(bed_type) = req.bed_type {
            room_type.bed_type = Some(bed_type);
        }
        if let Some(capacity) = req.capacity {
            room_type.capacity = capacity;
        }
        if let Some(total_rooms) = req.total_rooms {
            room_type.total_rooms = total_rooms;
        }
        if let Some(base_rate) = req.base_rate {
            room_type.base_rate = Some(base_rate);
        }

        self.repos.room_types().update(room_type.clone()).await?;
        Ok(room_type)
    }

    /// Set the nightly price of every night in the window.
    pub async fn set_prices(
        &self,
        hotel_id: i64,
        room_type_id: i64,
        req: SetPricesRequest,
    ) -> DomainResult<()> {
        guards::room_type_in_hotel(self.repos.as_ref(), hotel_id, room_type_id).await?;
        let window = StayRange::new(req.start_date, req.end_date)?;
        window.ensure_at_most(MAX_PRICE_WINDOW_NIGHTS)?;
        if req.price < Decimal::ZERO {
            return Err(DomainError::InvalidPrice("Price cannot be negative.".into()));
        }

        self.repos
            .daily_prices()
            .upsert_range(
                hotel_id,
                room_type_id,
                window.check_in(),
                window.check_out(),
                req.price,
            )
            .await?;
        info!(hotel_id, room_type_id, %window, price = %req.price, "Daily prices set");
        Ok(())
    }
}

fn check_counts(
    capacity: Option<i32>,
    total_rooms: Option<i32>,
    base_rate: Option<Decimal>,
) -> DomainResult<()> {
    if capacity.is_some_and(|c| c < 1) {
        return Err(DomainError::Validation("Capacity must be at least 1.".into()));
    }
    if total_rooms.is_some_and(|t| t < 0) {
        return Err(DomainError::Validation("Total rooms cannot be negative.".into()));
    }
    if base_rate.is_some_and(|r| r < Decimal::ZERO) {
        return Err(DomainError::InvalidPrice("Base rate cannot be negative.".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::reservations::PricingService;
    use crate::application::testing::seeded;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    #[tokio::test]
    async fn codes_are_unique_per_hotel() {
        let (repos, seed) = seeded().await;
        let service = RoomTypeService::new(repos);
        let req = CreateRoomTypeRequest {
            code: "dlx".into(),
            name: "Another Deluxe".into(),
            description: None,
            bed_type: None,
            capacity: 2,
            total_rooms: 1,
            base_rate: None,
        };

        let err = service.create(seed.hotel_id, req.clone()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let created = service.create(seed.other_hotel_id, req).await.unwrap();
        assert_eq!(created.code, "DLX");
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let (repos, seed) = seeded().await;
        let service = RoomTypeService::new(repos);

        let updated = service
            .update(
                seed.hotel_id,
                seed.standard.id,
                UpdateRoomTypeRequest {
                    total_rooms: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.total_rooms, 5);
        assert_eq!(updated.capacity, seed.standard.capacity);
        assert_eq!(updated.base_rate, seed.standard.base_rate);

        let err = service
            .update(
                seed.hotel_id,
                seed.standard.id,
                UpdateRoomTypeRequest {
                    base_rate: Some(Decimal::new(-1, 0)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPrice(_)));
    }

    #[tokio::test]
    async fn daily_prices_feed_the_quote() {
        let (repos, seed) = seeded().await;
        let service = RoomTypeService::new(repos.clone());

        service
            .set_prices(
                seed.hotel_id,
                seed.standard.id,
                SetPricesRequest {
                    start_date: d(2),
                    end_date: d(4),
                    price: Decimal::new(15000, 2),
                },
            )
            .await
            .unwrap();

        let quote = PricingService::new(repos)
            .quote(&seed.standard, &StayRange::new(d(1), d(4)).unwrap())
            .await
            .unwrap();
        assert_eq!(quote, Decimal::new(40000, 2));
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let (repos, seed) = seeded().await;
        let service = RoomTypeService::new(repos);
        let err = service
            .set_prices(
                seed.hotel_id,
                seed.standard.id,
                SetPricesRequest {
                    start_date: d(1),
                    end_date: d(2),
                    price: Decimal::new(-100, 2),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPrice(_)));
    }
}
