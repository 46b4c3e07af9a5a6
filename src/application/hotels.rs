//! Hotel queries and hotel creation

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use super::availability::AvailabilityService;
use super::guards;
use crate::domain::{
    DomainError, DomainResult, Hotel, NewHotel, RepositoryProvider, RoomType, StayRange,
    DEFAULT_MAX_STAY_NIGHTS,
};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateHotelRequest {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    pub brand: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 1, max = 100, message = "city is required"))]
    pub city: String,
    pub country: Option<String>,
    #[validate(range(min = 1, max = 5, message = "star rating must be between 1 and 5"))]
    pub star_rating: Option<i32>,
}

#[derive(Clone)]
pub struct HotelService {
    repos: Arc<dyn RepositoryProvider>,
    availability: AvailabilityService,
}

impl HotelService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            availability: AvailabilityService::new(repos.clone()),
            repos,
        }
    }

    pub async fn list(&self) -> DomainResult<Vec<Hotel>> {
        self.repos.hotels().find_all().await
    }

    pub async fn get(&self, hotel_id: i64) -> DomainResult<Hotel> {
        guards::hotel(self.repos.as_ref(), hotel_id).await
    }

    /// Hotels whose city starts with `city`, case-insensitive.
    pub async fn search_by_city(&self, city: &str) -> DomainResult<Vec<Hotel>> {
        let keyword = city.trim();
        if keyword.is_empty() {
            return Err(DomainError::Validation("Search keyword is required.".into()));
        }
        self.repos.hotels().find_by_city_prefix(keyword).await
    }

    /// Hotels in `city` with at least one room type free on every night.
    pub async fn search_available(
        &self,
        city: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Hotel>> {
        let stay = StayRange::new(check_in, check_out)?;
        stay.ensure_at_most(DEFAULT_MAX_STAY_NIGHTS)?;
        let candidates = self.search_by_city(city).await?;

        let mut available = Vec::new();
        for hotel in candidates {
            let types = self.availability.compute(hotel.id, &stay, None).await?;
            if types.iter().any(|t| t.available > 0) {
                available.push(hotel);
            }
        }
        Ok(available)
    }

    pub async fn create(&self, req: CreateHotelRequest) -> DomainResult<Hotel> {
        if req.star_rating.is_some_and(|s| !(1..=5).contains(&s)) {
            return Err(DomainError::Validation(
                "Star rating must be between 1 and 5.".into(),
            ));
        }
        let hotel = self
            .repos
            .hotels()
            .create(NewHotel {
                name: req.name,
                brand: req.brand,
                address: req.address,
                city: req.city,
                country: req.country,
                star_rating: req.star_rating,
            })
            .await?;
        info!(hotel_id = hotel.id, name = %hotel.name, "Hotel created");
        Ok(hotel)
    }

    pub async fn room_types(&self, hotel_id: i64) -> DomainResult<Vec<RoomType>> {
        guards::ensure_hotel_exists(self.repos.as_ref(), hotel_id).await?;
        self.repos.room_types().find_by_hotel(hotel_id).await
    }
}
