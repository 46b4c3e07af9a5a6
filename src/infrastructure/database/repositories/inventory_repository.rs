//! SeaORM implementation of InventoryRepository
//!
//! A plan is applied inside one transaction: every hold is checked first,
//! then releases and holds are written. Any failure rolls back the lot.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::room_type::InventoryRepository;
use crate::domain::{DomainError, DomainResult, InventoryPlan, NightSlot, NightlyInventory};
use crate::infrastructure::database::entities::room_type_inventory;

pub struct SeaOrmInventoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmInventoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Take rooms out of sale on one night (maintenance, house use).
    pub async fn block(
        &self,
        hotel_id: i64,
        room_type_id: i64,
        date: NaiveDate,
        total: i32,
        blocked: i32,
    ) -> DomainResult<()> {
        match find_night(&self.db, hotel_id, room_type_id, date).await? {
            Some(m) => {
                let mut active: room_type_inventory::ActiveModel = m.into();
                active.blocked = Set(blocked);
                active.update(&self.db).await.map_err(db_err)?;
            }
            None => {
                room_type_inventory::ActiveModel {
                    id: NotSet,
                    hotel_id: Set(hotel_id),
                    room_type_id: Set(room_type_id),
                    stay_date: Set(date),
                    total: Set(total),
                    reserved: Set(0),
                    blocked: Set(blocked),
                }
                .insert(&self.db)
                .await
                .map_err(db_err)?;
            }
        }
        Ok(())
    }
}

fn model_to_domain(m: room_type_inventory::Model) -> NightlyInventory {
    NightlyInventory {
        hotel_id: m.hotel_id,
        room_type_id: m.room_type_id,
        stay_date: m.stay_date,
        total: m.total,
        reserved: m.reserved,
        blocked: m.blocked,
    }
}

async fn find_night<C: ConnectionTrait>(
    conn: &C,
    hotel_id: i64,
    room_type_id: i64,
    date: NaiveDate,
) -> DomainResult<Option<room_type_inventory::Model>> {
    room_type_inventory::Entity::find()
        .filter(room_type_inventory::Column::HotelId.eq(hotel_id))
        .filter(room_type_inventory::Column::RoomTypeId.eq(room_type_id))
        .filter(room_type_inventory::Column::StayDate.eq(date))
        .one(conn)
        .await
        .map_err(db_err)
}

async fn hold<C: ConnectionTrait>(conn: &C, hotel_id: i64, slot: &NightSlot) -> DomainResult<()> {
    match find_night(conn, hotel_id, slot.room_type_id, slot.date).await? {
        Some(m) => {
            let reserved = m.reserved + 1;
            let mut active: room_type_inventory::ActiveModel = m.into();
            active.total = Set(slot.total_rooms);
            active.reserved = Set(reserved);
            active.update(conn).await.map_err(db_err)?;
        }
        None => {
            room_type_inventory::ActiveModel {
                id: NotSet,
                hotel_id: Set(hotel_id),
                room_type_id: Set(slot.room_type_id),
                stay_date: Set(slot.date),
                total: Set(slot.total_rooms),
                reserved: Set(1),
                blocked: Set(0),
            }
            .insert(conn)
            .await
            .map_err(db_err)?;
        }
    }
    Ok(())
}

async fn release<C: ConnectionTrait>(
    conn: &C,
    hotel_id: i64,
    slot: &NightSlot,
) -> DomainResult<()> {
    let Some(m) = find_night(conn, hotel_id, slot.room_type_id, slot.date).await? else {
        warn!(
            "Releasing night {} of room type {} without an inventory row",
            slot.date, slot.room_type_id
        );
        return Ok(());
    };
    let reserved = (m.reserved - 1).max(0);
    let mut active: room_type_inventory::ActiveModel = m.into();
    active.reserved = Set(reserved);
    active.update(conn).await.map_err(db_err)?;
    Ok(())
}

#[async_trait]
impl InventoryRepository for SeaOrmInventoryRepository {
    async fn find_for_hotel(
        &self,
        hotel_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<NightlyInventory>> {
        let models = room_type_inventory::Entity::find()
            .filter(room_type_inventory::Column::HotelId.eq(hotel_id))
            .filter(room_type_inventory::Column::StayDate.gte(from))
            .filter(room_type_inventory::Column::StayDate.lt(to))
            .order_by_asc(room_type_inventory::Column::RoomTypeId)
            .order_by_asc(room_type_inventory::Column::StayDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn apply(&self, plan: &InventoryPlan) -> DomainResult<()> {
        debug!(
            "Applying inventory plan for hotel {}: {} releases, {} holds",
            plan.hotel_id,
            plan.releases.len(),
            plan.holds.len()
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        for slot in &plan.holds {
            let occupied = find_night(&txn, plan.hotel_id, slot.room_type_id, slot.date)
                .await?
                .map(|m| m.reserved + m.blocked)
                .unwrap_or(0);
            if slot.total_rooms - occupied <= 0 {
                // dropping txn rolls back
                return Err(DomainError::NoAvailability {
                    room_type_id: slot.room_type_id,
                    date: slot.date,
                });
            }
        }

        for slot in &plan.releases {
            release(&txn, plan.hotel_id, slot).await?;
        }
        for slot in &plan.holds {
            hold(&txn, plan.hotel_id, slot).await?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hotel::HotelRepository;
    use crate::domain::room_type::RoomTypeRepository;
    use crate::domain::{NewHotel, NewRoomType, Occupation, StayRange};
    use crate::infrastructure::database::repositories::hotel_repository::SeaOrmHotelRepository;
    use crate::infrastructure::database::repositories::room_type_repository::SeaOrmRoomTypeRepository;
    use crate::infrastructure::database::repositories::test_db;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    async fn setup() -> (SeaOrmInventoryRepository, i64, i64) {
        let db = test_db::connect().await;
        let hotel = SeaOrmHotelRepository::new(db.clone())
            .create(NewHotel {
                name: "Harbor View".into(),
                city: "Seattle".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let rt = SeaOrmRoomTypeRepository::new(db.clone())
            .create(NewRoomType {
                hotel_id: hotel.id,
                code: "STD".into(),
                name: "Standard".into(),
                capacity: 2,
                total_rooms: 1,
                ..Default::default()
            })
            .await
            .unwrap();
        (SeaOrmInventoryRepository::new(db), hotel.id, rt.id)
    }

    fn occupation(room_type_id: i64, from: u32, to: u32) -> Occupation {
        Occupation {
            room_type_id,
            total_rooms: 1,
            stay: StayRange::new(d(from), d(to)).unwrap(),
        }
    }

    #[tokio::test]
    async fn hold_creates_rows_and_release_frees_them() {
        let (repo, hotel_id, rt) = setup().await;

        repo.apply(&InventoryPlan::hold(hotel_id, occupation(rt, 1, 3)))
            .await
            .unwrap();
        let rows = repo.find_for_hotel(hotel_id, d(1), d(5)).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.reserved == 1 && r.total == 1));

        repo.apply(&InventoryPlan::release(hotel_id, occupation(rt, 1, 3)))
            .await
            .unwrap();
        let rows = repo.find_for_hotel(hotel_id, d(1), d(5)).await.unwrap();
        assert!(rows.iter().all(|r| r.reserved == 0));
    }

    #[tokio::test]
    async fn failed_plan_changes_nothing() {
        let (repo, hotel_id, rt) = setup().await;
        repo.apply(&InventoryPlan::hold(hotel_id, occupation(rt, 2, 3)))
            .await
            .unwrap();

        let err = repo
            .apply(&InventoryPlan::hold(hotel_id, occupation(rt, 1, 4)))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::NoAvailability {
                room_type_id: rt,
                date: d(2)
            }
        );

        let rows = repo.find_for_hotel(hotel_id, d(1), d(5)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stay_date, d(2));
    }

    #[tokio::test]
    async fn blocked_rooms_count_as_occupied() {
        let (repo, hotel_id, rt) = setup().await;
        repo.block(hotel_id, rt, d(1), 1, 1).await.unwrap();

        let err = repo
            .apply(&InventoryPlan::hold(hotel_id, occupation(rt, 1, 2)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NoAvailability { .. }));
    }
}
