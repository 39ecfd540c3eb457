use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::models::parse_order_status;
use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::member::Address;
use crate::domain::order_query::{OrderFlatRow, OrderHeader, OrderItemQueryView};
use crate::domain::ports::OrderQueryRepository;
use crate::schema::{deliveries, items, members, order_items, orders};

type HeaderTuple = (
    Uuid,
    String,
    DateTime<Utc>,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
);

fn to_header(
    (order_id, name, order_date, status, city, street, zipcode): HeaderTuple,
) -> Result<OrderHeader, DomainError> {
    Ok(OrderHeader {
        order_id,
        name,
        order_date,
        order_status: parse_order_status(&status)?,
        address: Address {
            city,
            street,
            zipcode,
        },
    })
}

pub struct DieselOrderQueryRepository {
    pool: DbPool,
}

impl DieselOrderQueryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderQueryRepository for DieselOrderQueryRepository {
    fn find_headers(&self, offset: i64, limit: i64) -> Result<Vec<OrderHeader>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<HeaderTuple> = orders::table
            .inner_join(members::table)
            .inner_join(deliveries::table)
            .select((
                orders::id,
                members::name,
                orders::order_date,
                orders::status,
                deliveries::city,
                deliveries::street,
                deliveries::zipcode,
            ))
            .order((orders::order_date.asc(), orders::id.asc()))
            .offset(offset)
            .limit(limit)
            .load(&mut conn)?;

        rows.into_iter().map(to_header).collect()
    }

    fn find_items(&self, order_ids: &[Uuid]) -> Result<Vec<OrderItemQueryView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<(Uuid, String, BigDecimal, i32)> = order_items::table
            .inner_join(items::table)
            .filter(order_items::order_id.eq_any(order_ids))
            .select((
                order_items::order_id,
                items::name,
                order_items::order_price,
                order_items::count,
            ))
            .order((order_items::created_at.asc(), order_items::id.asc()))
            .load(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(order_id, item_name, order_price, count)| OrderItemQueryView {
                order_id,
                item_name,
                order_price,
                count,
            })
            .collect())
    }

    fn find_flat_rows(&self) -> Result<Vec<OrderFlatRow>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<(HeaderTuple, (String, BigDecimal, i32))> = orders::table
            .inner_join(members::table)
            .inner_join(deliveries::table)
            .inner_join(order_items::table.inner_join(items::table))
            .select((
                (
                    orders::id,
                    members::name,
                    orders::order_date,
                    orders::status,
                    deliveries::city,
                    deliveries::street,
                    deliveries::zipcode,
                ),
                (items::name, order_items::order_price, order_items::count),
            ))
            .order((
                orders::order_date.asc(),
                orders::id.asc(),
                order_items::created_at.asc(),
                order_items::id.asc(),
            ))
            .load(&mut conn)?;

        rows.into_iter()
            .map(|(header, (item_name, order_price, count))| {
                let header = to_header(header)?;
                Ok(OrderFlatRow {
                    order_id: header.order_id,
                    name: header.name,
                    order_date: header.order_date,
                    order_status: header.order_status,
                    address: header.address,
                    item_name,
                    order_price,
                    count,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DieselOrderQueryRepository;
    use crate::application::order_query_service::OrderQueryService;
    use crate::domain::ports::{OrderQueryRepository, OrderRepository};
    use crate::infrastructure::order_repo::DieselOrderRepository;
    use crate::infrastructure::test_support::{seed_book, seed_member, setup_db};

    #[tokio::test]
    async fn flat_and_batched_views_agree() {
        let (_container, pool) = setup_db().await;
        let user_a = seed_member(&pool, "userA", 20, None);
        let user_b = seed_member(&pool, "userB", 30, None);
        let jpa1 = seed_book(&pool, "JPA1 BOOK", "10000", 100);
        let jpa2 = seed_book(&pool, "JPA2 BOOK", "20000", 100);
        let orders = DieselOrderRepository::new(pool.clone());
        orders.place(user_a, jpa1, 1).unwrap();
        orders.place(user_b, jpa2, 3).unwrap();
        orders.place(user_b, jpa1, 2).unwrap();

        let service = OrderQueryService::new(DieselOrderQueryRepository::new(pool));
        let flat = service.find_orders_flat().unwrap();
        let batched = service.find_orders_batched(0, 100).unwrap();
        let per_order = service.find_orders_per_order(0, 100).unwrap();

        assert_eq!(flat.len(), 3);
        assert_eq!(flat, batched);
        assert_eq!(batched, per_order);
        assert_eq!(flat[0].header.name, "userA");
        assert_eq!(flat[1].order_items[0].item_name, "JPA2 BOOK");
        assert_eq!(flat[1].order_items[0].count, 3);
    }

    #[tokio::test]
    async fn headers_are_paged() {
        let (_container, pool) = setup_db().await;
        let member = seed_member(&pool, "userA", 20, None);
        let book = seed_book(&pool, "JPA1 BOOK", "10000", 100);
        let orders = DieselOrderRepository::new(pool.clone());
        for _ in 0..5 {
            orders.place(member, book, 1).unwrap();
        }
        let repo = DieselOrderQueryRepository::new(pool);

        assert_eq!(repo.find_headers(0, 3).unwrap().len(), 3);
        assert_eq!(repo.find_headers(3, 3).unwrap().len(), 2);
        assert!(repo.find_items(&[]).unwrap().is_empty());
        assert_eq!(repo.find_flat_rows().unwrap().len(), 5);
    }
}
