//! Room type DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use crate::interfaces::http::modules::hotels::dto::RoomTypeDto;

/// Echo of an applied price window
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PriceWindowDto {
    pub room_type_id: i64,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub end_date: NaiveDate,
    pub nights: i64,
    #[schema(value_type = String, example = "189.00")]
    pub price: Decimal,
}
