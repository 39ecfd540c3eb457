use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use super::models::{
    parse_delivery_status, parse_order_status, DeliveryRow, ItemRow, MemberRow, NewDeliveryRow,
    NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow,
};
use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::item::Item;
use crate::domain::order::{
    ensure_cancellable, DeliveryStatus, OrderItemView, OrderSearch, OrderStatus, OrderView,
};
use crate::domain::ports::OrderRepository;
use crate::schema::{deliveries, items, members, order_items, orders};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Loads the items of the given orders in one query, keyed by order id.
fn load_order_items(
    conn: &mut PgConnection,
    order_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<OrderItemView>>, DomainError> {
    let rows: Vec<(OrderItemRow, String)> = order_items::table
        .inner_join(items::table)
        .filter(order_items::order_id.eq_any(order_ids))
        .select((OrderItemRow::as_select(), items::name))
        .order((order_items::created_at.asc(), order_items::id.asc()))
        .load(conn)?;

    let mut by_order: HashMap<Uuid, Vec<OrderItemView>> = HashMap::new();
    for (line, item_name) in rows {
        by_order.entry(line.order_id).or_default().push(OrderItemView {
            id: line.id,
            item_id: line.item_id,
            item_name,
            order_price: line.order_price,
            count: line.count,
        });
    }
    Ok(by_order)
}

/// `LIKE` pattern matching `needle` anywhere, with its wildcards taken literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn to_views(
    conn: &mut PgConnection,
    rows: Vec<(OrderRow, String, DeliveryRow)>,
) -> Result<Vec<OrderView>, DomainError> {
    let order_ids: Vec<Uuid> = rows.iter().map(|(o, _, _)| o.id).collect();
    let mut lines = load_order_items(conn, &order_ids)?;

    rows.into_iter()
        .map(|(order, member_name, delivery)| {
            Ok(OrderView {
                id: order.id,
                member_id: order.member_id,
                member_name,
                order_date: order.order_date,
                status: parse_order_status(&order.status)?,
                delivery_status: parse_delivery_status(&delivery.status)?,
                address: delivery.address(),
                items: lines.remove(&order.id).unwrap_or_default(),
            })
        })
        .collect()
}

impl OrderRepository for DieselOrderRepository {
    fn place(&self, member_id: Uuid, item_id: Uuid, count: i32) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Load the member and lock the item row for the stock update
            let member = members::table
                .find(member_id)
                .select(MemberRow::as_select())
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Member"))?;

            let mut item: Item = items::table
                .find(item_id)
                .select(ItemRow::as_select())
                .for_update()
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Item"))?
                .try_into()?;

            // 2. Take the stock
            item.remove_stock(count)?;
            let now = Utc::now();
            diesel::update(items::table.find(item_id))
                .set((
                    items::stock_quantity.eq(item.stock_quantity),
                    items::updated_at.eq(now),
                ))
                .execute(conn)?;

            // 3. Delivery goes to the member's address
            let delivery_id = Uuid::new_v4();
            diesel::insert_into(deliveries::table)
                .values(&NewDeliveryRow {
                    id: delivery_id,
                    city: member.city,
                    street: member.street,
                    zipcode: member.zipcode,
                    status: DeliveryStatus::Ready.as_str().to_string(),
                })
                .execute(conn)?;

            // 4. Order and its single line at the current item price
            let order_id = Uuid::new_v4();
            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    member_id,
                    delivery_id,
                    order_date: now,
                    status: OrderStatus::Order.as_str().to_string(),
                })
                .execute(conn)?;

            diesel::insert_into(order_items::table)
                .values(&NewOrderItemRow {
                    id: Uuid::new_v4(),
                    order_id,
                    item_id,
                    order_price: item.price,
                    count,
                })
                .execute(conn)?;

            Ok(order_id)
        })
    }

    fn cancel(&self, order_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let order = orders::table
                .find(order_id)
                .select(OrderRow::as_select())
                .for_update()
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Order"))?;

            let delivery_status: String = deliveries::table
                .find(order.delivery_id)
                .select(deliveries::status)
                .first(conn)?;

            ensure_cancellable(
                parse_order_status(&order.status)?,
                parse_delivery_status(&delivery_status)?,
            )?;

            diesel::update(orders::table.find(order_id))
                .set((
                    orders::status.eq(OrderStatus::Cancel.as_str()),
                    orders::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            // Give the ordered quantity back to each item
            let lines = OrderItemRow::belonging_to(&order)
                .select(OrderItemRow::as_select())
                .load(conn)?;
            let now = Utc::now();
            for line in lines {
                let mut item: Item = items::table
                    .find(line.item_id)
                    .select(ItemRow::as_select())
                    .for_update()
                    .first(conn)?
                    .try_into()?;
                item.add_stock(line.count);
                diesel::update(items::table.find(line.item_id))
                    .set((
                        items::stock_quantity.eq(item.stock_quantity),
                        items::updated_at.eq(now),
                    ))
                    .execute(conn)?;
            }

            Ok(())
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = orders::table
            .inner_join(members::table)
            .inner_join(deliveries::table)
            .filter(orders::id.eq(id))
            .select((
                OrderRow::as_select(),
                members::name,
                DeliveryRow::as_select(),
            ))
            .first::<(OrderRow, String, DeliveryRow)>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(to_views(&mut conn, vec![row])?.pop())
    }

    fn search(&self, search: &OrderSearch, limit: i64) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut query = orders::table
            .inner_join(members::table)
            .inner_join(deliveries::table)
            .into_boxed();

        if let Some(status) = search.order_status {
            query = query.filter(orders::status.eq(status.as_str()));
        }
        if let Some(name) = search.member_name() {
            query = query.filter(members::name.like(contains_pattern(name)).escape('\\'));
        }

        let rows = query
            .select((
                OrderRow::as_select(),
                members::name,
                DeliveryRow::as_select(),
            ))
            .order((orders::order_date.desc(), orders::id.asc()))
            .limit(limit)
            .load::<(OrderRow, String, DeliveryRow)>(&mut conn)?;

        to_views(&mut conn, rows)
    }
}
