//! Room domain entity

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Operational status of a physical room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoomStatus {
    #[default]
    Available,
    Maintenance,
    OutOfService,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Maintenance => "Maintenance",
            Self::OutOfService => "OutOfService",
        }
    }
}

impl std::str::FromStr for RoomStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "").as_str() {
            "available" => Ok(Self::Available),
            "maintenance" => Ok(Self::Maintenance),
            "outofservice" => Ok(Self::OutOfService),
            _ => Err(DomainError::Validation(format!("Unknown room status: {}", s))),
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub hotel_id: i64,
    pub room_type_id: i64,
    /// Unique within the hotel
    pub room_number: String,
    pub floor: Option<i32>,
    pub status: RoomStatus,
}

#[derive(Debug, Clone)]
pub struct NewRoom {
    pub hotel_id: i64,
    pub room_type_id: i64,
    pub room_number: String,
    pub floor: Option<i32>,
    pub status: RoomStatus,
}
