//! SeaORM implementation of ReservationRepository
//!
//! Updates are conditional on the stored `version` matching the snapshot's.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{db_err, from_cents, to_cents};
use crate::domain::reservation::{
    NewReservation, Reservation, ReservationFilter, ReservationRepository, ReservationStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    Ok(Reservation {
        id: m.id,
        user_id: m.user_id,
        hotel_id: m.hotel_id,
        room_type_id: m.room_type_id,
        room_id: m.room_id,
        status: m.status.parse()?,
        upgrade_status: m.upgrade_status.parse()?,
        check_in: m.check_in,
        check_out: m.check_out,
        nights: m.nights,
        num_guests: m.num_guests,
        currency: m.currency,
        price_total: from_cents(m.price_total_cents),
        notes: m.notes,
        created_at: m.created_at,
        upgraded_at: m.upgraded_at,
        canceled_at: m.canceled_at,
        version: m.version,
    })
}

fn models_to_domain(models: Vec<reservation::Model>) -> DomainResult<Vec<Reservation>> {
    models.into_iter().map(model_to_domain).collect()
}

/// Every column but the key, ready for insert or conditional update.
fn to_active_model(r: &Reservation) -> DomainResult<reservation::ActiveModel> {
    Ok(reservation::ActiveModel {
        id: NotSet,
        user_id: Set(r.user_id),
        hotel_id: Set(r.hotel_id),
        room_type_id: Set(r.room_type_id),
        room_id: Set(r.room_id),
        status: Set(r.status.as_str().to_string()),
        upgrade_status: Set(r.upgrade_status.as_str().to_string()),
        check_in: Set(r.check_in),
        check_out: Set(r.check_out),
        nights: Set(r.nights),
        num_guests: Set(r.num_guests),
        currency: Set(r.currency.clone()),
        price_total_cents: Set(to_cents(r.price_total)?),
        notes: Set(r.notes.clone()),
        created_at: Set(r.created_at),
        upgraded_at: Set(r.upgraded_at),
        canceled_at: Set(r.canceled_at),
        version: Set(r.version),
    })
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create(&self, new: NewReservation) -> DomainResult<Reservation> {
        debug!(
            "Creating reservation for user {} in hotel {}",
            new.user_id, new.hotel_id
        );

        let draft = new.into_reservation(0, Utc::now());
        let saved = to_active_model(&draft)?
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        model_to_domain(saved)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_by_user(&self, user_id: i64) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .order_by_desc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }

    async fn find_by_hotel(
        &self,
        hotel_id: i64,
        filter: &ReservationFilter,
    ) -> DomainResult<Vec<Reservation>> {
        let mut query = reservation::Entity::find().filter(reservation::Column::HotelId.eq(hotel_id));
        if let Some(status) = filter.status {
            query = query.filter(reservation::Column::Status.eq(status.as_str()));
        }
        if let Some(end) = filter.end {
            query = query.filter(reservation::Column::CheckIn.lt(end));
        }
        if let Some(start) = filter.start {
            query = query.filter(reservation::Column::CheckOut.gt(start));
        }
        let models = query
            .order_by_asc(reservation::Column::CheckIn)
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }

    async fn update(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!("Updating reservation {} at version {}", r.id, r.version);

        let mut next = r;
        next.version += 1;
        let result = reservation::Entity::update_many()
            .set(to_active_model(&next)?)
            .filter(reservation::Column::Id.eq(next.id))
            .filter(reservation::Column::Version.eq(next.version - 1))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            let exists = reservation::Entity::find_by_id(next.id)
                .one(&self.db)
                .await
                .map_err(db_err)?
                .is_some();
            return Err(if exists {
                DomainError::Conflict(format!(
                    "Reservation {} was modified concurrently",
                    next.id
                ))
            } else {
                DomainError::not_found("Reservation", next.id)
            });
        }
        Ok(next)
    }

    async fn find_confirmed_checking_in_before(
        &self,
        date: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::Status.eq(ReservationStatus::Confirmed.as_str()))
            .filter(reservation::Column::CheckIn.lt(date))
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hotel::HotelRepository;
    use crate::domain::room_type::RoomTypeRepository;
    use crate::domain::{NewHotel, NewRoomType, StayRange, UpgradeStatus};
    use crate::infrastructure::database::repositories::hotel_repository::SeaOrmHotelRepository;
    use crate::infrastructure::database::repositories::room_type_repository::SeaOrmRoomTypeRepository;
    use crate::infrastructure::database::repositories::test_db;
    use rust_decimal::Decimal;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    async fn setup() -> (SeaOrmReservationRepository, NewReservation) {
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
                total_rooms: 3,
                ..Default::default()
            })
            .await
            .unwrap();
        let new = NewReservation {
            user_id: 7,
            hotel_id: hotel.id,
            room_type_id: rt.id,
            stay: StayRange::new(d(1), d(3)).unwrap(),
            num_guests: 2,
            currency: "USD".into(),
            price_total: Decimal::new(20050, 2),
            notes: None,
        };
        (SeaOrmReservationRepository::new(db), new)
    }

    #[tokio::test]
    async fn create_stores_pending_reservation() {
        let (repo, new) = setup().await;
        let created = repo.create(new).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.status, ReservationStatus::Pending);
        assert_eq!(created.upgrade_status, UpgradeStatus::NotEligible);
        assert_eq!(created.nights, 2);
        assert_eq!(created.price_total, Decimal::new(20050, 2));
        assert_eq!(created.version, 1);
        assert_eq!(repo.find_by_user(7).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stale_update_is_a_conflict() {
        let (repo, new) = setup().await;
        let created = repo.create(new).await.unwrap();

        let mut first = created.clone();
        first.status = ReservationStatus::Confirmed;
        let saved = repo.update(first).await.unwrap();
        assert_eq!(saved.version, 2);

        let mut stale = created;
        stale.num_guests = 1;
        let err = repo.update(stale).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Confirmed);
        assert_eq!(stored.num_guests, 2);
    }

    #[tokio::test]
    async fn filters_and_no_show_candidates() {
        let (repo, new) = setup().await;
        let hotel_id = new.hotel_id;
        let created = repo.create(new).await.unwrap();
        let mut confirmed = created.clone();
        confirmed.status = ReservationStatus::Confirmed;
        repo.update(confirmed).await.unwrap();

        let window = ReservationFilter {
            start: Some(d(2)),
            end: Some(d(5)),
            ..Default::default()
        };
        assert_eq!(repo.find_by_hotel(hotel_id, &window).await.unwrap().len(), 1);
        let later = ReservationFilter {
            start: Some(d(3)),
            ..Default::default()
        };
        assert!(repo.find_by_hotel(hotel_id, &later).await.unwrap().is_empty());

        assert_eq!(repo.find_confirmed_checking_in_before(d(2)).await.unwrap().len(), 1);
        assert!(repo.find_confirmed_checking_in_before(d(1)).await.unwrap().is_empty());
    }
}
