use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use super::models::{ItemRow, NewItemRow};
use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::item::{Item, ItemKind, ItemUpdate, NewItem};
use crate::domain::ports::ItemRepository;
use crate::schema::items;

pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn new_item_row(id: Uuid, item: NewItem) -> NewItemRow {
    let mut row = NewItemRow {
        id,
        dtype: item.kind.dtype().to_string(),
        name: item.name,
        price: item.price,
        stock_quantity: item.stock_quantity,
        ..Default::default()
    };
    match item.kind {
        ItemKind::Book { author, isbn } => {
            row.author = author;
            row.isbn = isbn;
        }
        ItemKind::Album { artist, etc } => {
            row.artist = artist;
            row.etc = etc;
        }
        ItemKind::Movie { director, actor } => {
            row.director = director;
            row.actor = actor;
        }
    }
    row
}

impl ItemRepository for DieselItemRepository {
    fn create(&self, item: NewItem) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;
        let id = Uuid::new_v4();
        diesel::insert_into(items::table)
            .values(&new_item_row(id, item))
            .execute(&mut conn)?;
        Ok(id)
    }

    fn find_all(&self) -> Result<Vec<Item>, DomainError> {
        let mut conn = self.pool.get()?;
        items::table
            .select(ItemRow::as_select())
            .order((items::name.asc(), items::id.asc()))
            .load(&mut conn)?
            .into_iter()
            .map(Item::try_from)
            .collect()
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        let mut conn = self.pool.get()?;
        items::table
            .find(id)
            .select(ItemRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Item::try_from)
            .transpose()
    }

    fn update(&self, id: Uuid, update: ItemUpdate) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let updated = diesel::update(items::table.find(id))
            .set((
                items::name.eq(update.name),
                items::price.eq(update.price),
                items::stock_quantity.eq(update.stock_quantity),
                items::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::DieselItemRepository;
    use crate::domain::item::{ItemKind, ItemUpdate, NewItem};
    use crate::domain::ports::ItemRepository;
    use crate::infrastructure::test_support::setup_db;

    #[tokio::test]
    async fn each_kind_round_trips_through_the_single_table() {
        let (_container, pool) = setup_db().await;
        let repo = DieselItemRepository::new(pool);
        let kinds = vec![
            ItemKind::Book {
                author: Some("kim".to_string()),
                isbn: Some("isbn-1".to_string()),
            },
            ItemKind::Album {
                artist: Some("IU".to_string()),
                etc: None,
            },
            ItemKind::Movie {
                director: Some("bong".to_string()),
                actor: Some("song".to_string()),
            },
        ];

        for (i, kind) in kinds.iter().enumerate() {
            let id = repo
                .create(NewItem {
                    name: format!("item{}", i),
                    price: BigDecimal::from(1000),
                    stock_quantity: 3,
                    kind: kind.clone(),
                })
                .expect("create failed");
            let item = repo.find_by_id(id).unwrap().expect("item should exist");
            assert_eq!(&item.kind, kind);
        }

        assert_eq!(repo.find_all().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_changes_price_and_stock() {
        let (_container, pool) = setup_db().await;
        let repo = DieselItemRepository::new(pool);
        let id = repo
            .create(NewItem {
                name: "JPA".to_string(),
                price: BigDecimal::from(10000),
                stock_quantity: 10,
                kind: ItemKind::Book {
                    author: None,
                    isbn: None,
                },
            })
            .unwrap();

        let updated = repo
            .update(
                id,
                ItemUpdate {
                    name: "JPA 2".to_string(),
                    price: BigDecimal::from(20000),
                    stock_quantity: 4,
                },
            )
            .unwrap();

        assert!(updated);
        let item = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(item.name, "JPA 2");
        assert_eq!(item.price, BigDecimal::from(20000));
        assert_eq!(item.stock_quantity, 4);
        let missing = ItemUpdate {
            name: "x".to_string(),
            price: BigDecimal::from(1),
            stock_quantity: 1,
        };
        assert!(!repo.update(uuid::Uuid::new_v4(), missing).unwrap());
    }
}
