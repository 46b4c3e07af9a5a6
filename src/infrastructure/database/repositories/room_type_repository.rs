//! SeaORM implementations of RoomTypeRepository and DailyPriceRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{db_err, from_cents, to_cents};
use crate::domain::room_type::{DailyPriceRepository, RoomTypeRepository};
use crate::domain::{DailyPrice, DomainError, DomainResult, NewRoomType, RoomType};
use crate::infrastructure::database::entities::{room_type, room_type_daily_price};

pub struct SeaOrmRoomTypeRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: room_type::Model) -> RoomType {
    RoomType {
        id: m.id,
        hotel_id: m.hotel_id,
        code: m.code,
        name: m.name,
        description: m.description,
        bed_type: m.bed_type,
        capacity: m.capacity,
        total_rooms: m.total_rooms,
        base_rate: m.base_rate_cents.map(from_cents),
    }
}

#[async_trait]
impl RoomTypeRepository for SeaOrmRoomTypeRepository {
    async fn create(&self, rt: NewRoomType) -> DomainResult<RoomType> {
        debug!("Creating room type {} for hotel {}", rt.code, rt.hotel_id);

        let model = room_type::ActiveModel {
            id: NotSet,
            hotel_id: Set(rt.hotel_id),
            code: Set(rt.code),
            name: Set(rt.name),
            description: Set(rt.description),
            bed_type: Set(rt.bed_type),
            capacity: Set(rt.capacity),
            total_rooms: Set(rt.total_rooms),
            base_rate_cents: Set(rt.base_rate.map(to_cents).transpose()?),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<RoomType>> {
        let model = room_type::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_hotel(&self, hotel_id: i64) -> DomainResult<Vec<RoomType>> {
        let models = room_type::Entity::find()
            .filter(room_type::Column::HotelId.eq(hotel_id))
            .order_by_asc(room_type::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_code(&self, hotel_id: i64, code: &str) -> DomainResult<Option<RoomType>> {
        let model = room_type::Entity::find()
            .filter(room_type::Column::HotelId.eq(hotel_id))
            .filter(room_type::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, rt: RoomType) -> DomainResult<()> {
        debug!("Updating room type: {}", rt.id);

        let existing = room_type::Entity::find_by_id(rt.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("RoomType", rt.id));
        }

        let model = room_type::ActiveModel {
            id: Set(rt.id),
            hotel_id: Set(rt.hotel_id),
            code: Set(rt.code),
            name: Set(rt.name),
            description: Set(rt.description),
            bed_type: Set(rt.bed_type),
            capacity: Set(rt.capacity),
            total_rooms: Set(rt.total_rooms),
            base_rate_cents: Set(rt.base_rate.map(to_cents).transpose()?),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}

// ── Daily prices ────────────────────────────────────────────────

pub struct SeaOrmDailyPriceRepository {
    db: DatabaseConnection,
}

impl SeaOrmDailyPriceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DailyPriceRepository for SeaOrmDailyPriceRepository {
    async fn find_range(
        &self,
        hotel_id: i64,
        room_type_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<DailyPrice>> {
        let models = room_type_daily_price::Entity::find()
            .filter(room_type_daily_price::Column::HotelId.eq(hotel_id))
            .filter(room_type_daily_price::Column::RoomTypeId.eq(room_type_id))
            .filter(room_type_daily_price::Column::StayDate.gte(from))
            .filter(room_type_daily_price::Column::StayDate.lt(to))
            .order_by_asc(room_type_daily_price::Column::StayDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models
            .into_iter()
            .map(|m| DailyPrice {
                hotel_id: m.hotel_id,
                room_type_id: m.room_type_id,
                stay_date: m.stay_date,
                price: from_cents(m.price_cents),
            })
            .collect())
    }

    async fn upsert_range(
        &self,
        hotel_id: i64,
        room_type_id: i64,
        from: NaiveDate,
        to: NaiveDate,
        price: Decimal,
    ) -> DomainResult<()> {
        let cents = to_cents(price)?;
        debug!(
            "Setting price {} for room type {} over [{}, {})",
            cents, room_type_id, from, to
        );

        let txn = self.db.begin().await.map_err(db_err)?;
        let mut date = from;
        while date < to {
            let existing = room_type_daily_price::Entity::find()
                .filter(room_type_daily_price::Column::HotelId.eq(hotel_id))
                .filter(room_type_daily_price::Column::RoomTypeId.eq(room_type_id))
                .filter(room_type_daily_price::Column::StayDate.eq(date))
                .one(&txn)
                .await
                .map_err(db_err)?;

            match existing {
                Some(m) => {
                    let mut active: room_type_daily_price::ActiveModel = m.into();
                    active.price_cents = Set(cents);
                    active.update(&txn).await.map_err(db_err)?;
                }
                None => {
                    room_type_daily_price::ActiveModel {
                        id: NotSet,
                        hotel_id: Set(hotel_id),
                        room_type_id: Set(room_type_id),
                        stay_date: Set(date),
                        price_cents: Set(cents),
                    }
                    .insert(&txn)
                    .await
                    .map_err(db_err)?;
                }
            }

            date = date
                .succ_opt()
                .ok_or_else(|| DomainError::InvalidDateRange("date out of range".into()))?;
        }
        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hotel::HotelRepository;
    use crate::domain::NewHotel;
    use crate::infrastructure::database::repositories::hotel_repository::SeaOrmHotelRepository;
    use crate::infrastructure::database::repositories::test_db;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    #[tokio::test]
    async fn room_type_money_and_prices_round_trip() {
        let db = test_db::connect().await;
        let hotel = SeaOrmHotelRepository::new(db.clone())
            .create(NewHotel {
                name: "Harbor View".into(),
                city: "Seattle".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let types = SeaOrmRoomTypeRepository::new(db.clone());
        let created = types
            .create(NewRoomType {
                hotel_id: hotel.id,
                code: "STD".into(),
                name: "Standard".into(),
                capacity: 2,
                total_rooms: 3,
                base_rate: Some(Decimal::new(12950, 2)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.base_rate, Some(Decimal::new(12950, 2)));
        assert_eq!(
            types.find_by_code(hotel.id, "STD").await.unwrap().map(|rt| rt.id),
            Some(created.id)
        );

        let prices = SeaOrmDailyPriceRepository::new(db);
        prices
            .upsert_range(hotel.id, created.id, d(1), d(4), Decimal::new(10000, 2))
            .await
            .unwrap();
        prices
            .upsert_range(hotel.id, created.id, d(2), d(3), Decimal::new(15000, 2))
            .await
            .unwrap();

        let stored = prices
            .find_range(hotel.id, created.id, d(1), d(4))
            .await
            .unwrap();
        let amounts: Vec<_> = stored.iter().map(|p| p.price).collect();
        assert_eq!(
            amounts,
            vec![
                Decimal::new(10000, 2),
                Decimal::new(15000, 2),
                Decimal::new(10000, 2)
            ]
        );
    }
}
