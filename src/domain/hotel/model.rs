//! Hotel domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub country: Option<String>,
    /// 1..=5
    pub star_rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Data for a hotel that has not been stored yet
#[derive(Debug, Clone, Default)]
pub struct NewHotel {
    pub name: String,
    pub brand: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub country: Option<String>,
    pub star_rating: Option<i32>,
}

impl Hotel {
    /// Case-insensitive city prefix match used by the hotel search.
    pub fn city_starts_with(&self, prefix: &str) -> bool {
        self.city
            .to_lowercase()
            .starts_with(&prefix.trim().to_lowercase())
    }
}
