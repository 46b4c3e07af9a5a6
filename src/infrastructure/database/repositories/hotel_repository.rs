//! SeaORM implementation of HotelRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::hotel::HotelRepository;
use crate::domain::{DomainResult, Hotel, NewHotel};
use crate::infrastructure::database::entities::hotel;

pub struct SeaOrmHotelRepository {
    db: DatabaseConnection,
}

impl SeaOrmHotelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: hotel::Model) -> Hotel {
    Hotel {
        id: m.id,
        name: m.name,
        brand: m.brand,
        address: m.address,
        city: m.city,
        country: m.country,
        star_rating: m.star_rating,
        created_at: m.created_at,
    }
}

#[async_trait]
impl HotelRepository for SeaOrmHotelRepository {
    async fn create(&self, h: NewHotel) -> DomainResult<Hotel> {
        debug!("Creating hotel: {}", h.name);

        let model = hotel::ActiveModel {
            id: NotSet,
            name: Set(h.name),
            brand: Set(h.brand),
            address: Set(h.address),
            city: Set(h.city),
            country: Set(h.country),
            star_rating: Set(h.star_rating),
            created_at: Set(Utc::now()),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Hotel>> {
        let model = hotel::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let models = hotel::Entity::find()
            .order_by_asc(hotel::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_city_prefix(&self, prefix: &str) -> DomainResult<Vec<Hotel>> {
        // SQLite LIKE is case-insensitive for ASCII; re-check for the rest
        let models = hotel::Entity::find()
            .filter(hotel::Column::City.starts_with(prefix.trim()))
            .order_by_asc(hotel::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models
            .into_iter()
            .map(model_to_domain)
            .filter(|h| h.city_starts_with(prefix))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_db;

    #[tokio::test]
    async fn create_and_search_by_city() {
        let repo = SeaOrmHotelRepository::new(test_db::connect().await);
        let created = repo
            .create(NewHotel {
                name: "Harbor View".into(),
                city: "Seattle".into(),
                star_rating: Some(4),
                ..Default::default()
            })
            .await
            .unwrap();
        repo.create(NewHotel {
            name: "Lakeside Inn".into(),
            city: "Portland".into(),
            ..Default::default()
        })
        .await
        .unwrap();

        let loaded = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Harbor View");
        assert_eq!(loaded.star_rating, Some(4));
        let found = repo.find_by_city_prefix("sea").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, created.id);
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }
}
