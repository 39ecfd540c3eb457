//! In-memory repository doubles for service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::item::{Item, ItemKind, ItemUpdate, NewItem};
use crate::domain::member::{Address, MemberTeamView, MemberView, NewMember};
use crate::domain::order::{
    ensure_cancellable, DeliveryStatus, OrderItemView, OrderSearch, OrderStatus, OrderView,
};
use crate::domain::order_query::{OrderFlatRow, OrderHeader, OrderItemQueryView};
use crate::domain::page::{MemberSortKey, PageRequest, SortDirection};
use crate::domain::ports::{
    ItemRepository, MemberRepository, MemberSearchRepository, OrderQueryRepository,
    OrderRepository,
};
use crate::domain::search::Predicate;

#[derive(Default)]
pub struct InMemoryMemberRepository {
    teams: Mutex<Vec<(Uuid, String)>>,
    members: Mutex<Vec<MemberView>>,
}

impl MemberRepository for InMemoryMemberRepository {
    fn create_team(&self, name: &str) -> Result<Uuid, DomainError> {
        let id = Uuid::new_v4();
        self.teams.lock().unwrap().push((id, name.to_string()));
        Ok(id)
    }

    fn create(&self, member: NewMember) -> Result<Uuid, DomainError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.members.lock().unwrap().push(MemberView {
            id,
            name: member.name,
            age: member.age,
            address: member.address,
            team_id: member.team_id,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        Ok(self.members.lock().unwrap().iter().any(|m| m.name == name))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<MemberView>, DomainError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    fn find_all(&self) -> Result<Vec<MemberView>, DomainError> {
        let mut members = self.members.lock().unwrap().clone();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(members)
    }

    fn update_name(&self, id: Uuid, name: &str) -> Result<bool, DomainError> {
        let mut members = self.members.lock().unwrap();
        match members.iter_mut().find(|m| m.id == id) {
            Some(member) => {
                member.name = name.to_string();
                member.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Evaluates predicates in memory and records every query it serves.
pub struct InMemoryMemberSearchRepository {
    rows: Vec<MemberTeamView>,
    count_calls: AtomicUsize,
    predicates: Mutex<Vec<Predicate>>,
    fail_next_content: AtomicBool,
}

impl InMemoryMemberSearchRepository {
    pub fn new(rows: Vec<MemberTeamView>) -> Self {
        Self {
            rows,
            count_calls: AtomicUsize::new(0),
            predicates: Mutex::new(Vec::new()),
            fail_next_content: AtomicBool::new(false),
        }
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn predicates(&self) -> Vec<Predicate> {
        self.predicates.lock().unwrap().clone()
    }

    pub fn fail_next_content_query(&self) {
        self.fail_next_content.store(true, Ordering::SeqCst);
    }

    fn matching(&self, predicate: &Predicate) -> Vec<MemberTeamView> {
        self.rows
            .iter()
            .filter(|row| predicate.matches(row))
            .cloned()
            .collect()
    }
}

impl MemberSearchRepository for InMemoryMemberSearchRepository {
    fn find_all(&self, predicate: &Predicate) -> Result<Vec<MemberTeamView>, DomainError> {
        Ok(self.matching(predicate))
    }

    fn find_page(
        &self,
        predicate: &Predicate,
        request: &PageRequest,
    ) -> Result<Vec<MemberTeamView>, DomainError> {
        if self.fail_next_content.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Internal("connection reset".to_string()));
        }
        self.predicates.lock().unwrap().push(predicate.clone());

        let mut rows = self.matching(predicate);
        let sort = request.sort();
        rows.sort_by(|a, b| {
            let ordering = match sort.key {
                MemberSortKey::Name => a.name.cmp(&b.name),
                MemberSortKey::Age => a.age.cmp(&b.age),
                MemberSortKey::TeamName => a.team_name.cmp(&b.team_name),
            };
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        Ok(rows
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size() as usize)
            .collect())
    }

    fn count(&self, predicate: &Predicate) -> Result<i64, DomainError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.predicates.lock().unwrap().push(predicate.clone());
        Ok(self.matching(predicate).len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryItemRepository {
    items: Mutex<Vec<Item>>,
}

impl ItemRepository for InMemoryItemRepository {
    fn create(&self, item: NewItem) -> Result<Uuid, DomainError> {
        let id = Uuid::new_v4();
        self.items.lock().unwrap().push(Item {
            id,
            name: item.name,
            price: item.price,
            stock_quantity: item.stock_quantity,
            kind: item.kind,
        });
        Ok(id)
    }

    fn find_all(&self) -> Result<Vec<Item>, DomainError> {
        Ok(self.items.lock().unwrap().clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        Ok(self.items.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }

    fn update(&self, id: Uuid, update: ItemUpdate) -> Result<bool, DomainError> {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.name = update.name;
                item.price = update.price;
                item.stock_quantity = update.stock_quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    members: Mutex<HashMap<Uuid, String>>,
    items: Mutex<HashMap<Uuid, Item>>,
    orders: Mutex<Vec<OrderView>>,
}

impl InMemoryOrderRepository {
    pub fn add_member(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.members.lock().unwrap().insert(id, name.to_string());
        id
    }

    pub fn add_item(&self, name: &str, price: BigDecimal, stock: i32) -> Uuid {
        let id = Uuid::new_v4();
        self.items.lock().unwrap().insert(
            id,
            Item {
                id,
                name: name.to_string(),
                price,
                stock_quantity: stock,
                kind: ItemKind::Book {
                    author: None,
                    isbn: None,
                },
            },
        );
        id
    }

    pub fn stock_of(&self, item_id: Uuid) -> i32 {
        self.items.lock().unwrap()[&item_id].stock_quantity
    }

    pub fn complete_delivery(&self, order_id: Uuid) {
        let mut orders = self.orders.lock().unwrap();
        if let Some(order) = orders.iter_mut().find(|o| o.id == order_id) {
            order.delivery_status = DeliveryStatus::Comp;
        }
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn place(&self, member_id: Uuid, item_id: Uuid, count: i32) -> Result<Uuid, DomainError> {
        let member_name = self
            .members
            .lock()
            .unwrap()
            .get(&member_id)
            .cloned()
            .ok_or(DomainError::NotFound("Member"))?;
        let mut items = self.items.lock().unwrap();
        let item = items.get_mut(&item_id).ok_or(DomainError::NotFound("Item"))?;
        item.remove_stock(count)?;

        let order_id = Uuid::new_v4();
        self.orders.lock().unwrap().push(OrderView {
            id: order_id,
            member_id,
            member_name,
            order_date: Utc::now(),
            status: OrderStatus::Order,
            delivery_status: DeliveryStatus::Ready,
            address: Address::default(),
            items: vec![OrderItemView {
                id: Uuid::new_v4(),
                item_id,
                item_name: item.name.clone(),
                order_price: item.price.clone(),
                count,
            }],
        });
        Ok(order_id)
    }

    fn cancel(&self, order_id: Uuid) -> Result<(), DomainError> {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(DomainError::NotFound("Order"))?;
        ensure_cancellable(order.status, order.delivery_status)?;

        let mut items = self.items.lock().unwrap();
        for line in &order.items {
            if let Some(item) = items.get_mut(&line.item_id) {
                item.add_stock(line.count);
            }
        }
        order.status = OrderStatus::Cancel;
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        Ok(self.orders.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    fn search(&self, search: &OrderSearch, limit: i64) -> Result<Vec<OrderView>, DomainError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| search.order_status.map_or(true, |s| o.status == s))
            .filter(|o| search.member_name().map_or(true, |n| o.member_name.contains(n)))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

pub struct InMemoryOrderQueryRepository {
    headers: Vec<OrderHeader>,
    items: Vec<OrderItemQueryView>,
    item_queries: AtomicUsize,
}

impl InMemoryOrderQueryRepository {
    /// Two orders: `userA` with items A and B, `userB` with item C.
    pub fn sample() -> Self {
        let header = |name: &str, day: u32| OrderHeader {
            order_id: Uuid::new_v4(),
            name: name.to_string(),
            order_date: Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap(),
            order_status: OrderStatus::Order,
            address: Address {
                city: Some("Seoul".to_string()),
                street: None,
                zipcode: None,
            },
        };
        let order1 = header("userA", 1);
        let order2 = header("userB", 2);
        let item = |order: &OrderHeader, name: &str, price: i32, count: i32| OrderItemQueryView {
            order_id: order.order_id,
            item_name: name.to_string(),
            order_price: BigDecimal::from(price),
            count,
        };
        let items = vec![
            item(&order1, "A", 100, 1),
            item(&order1, "B", 200, 2),
            item(&order2, "C", 50, 3),
        ];
        Self {
            headers: vec![order1, order2],
            items,
            item_queries: AtomicUsize::new(0),
        }
    }

    pub fn item_queries(&self) -> usize {
        self.item_queries.load(Ordering::SeqCst)
    }
}

impl OrderQueryRepository for InMemoryOrderQueryRepository {
    fn find_headers(&self, offset: i64, limit: i64) -> Result<Vec<OrderHeader>, DomainError> {
        Ok(self
            .headers
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn find_items(&self, order_ids: &[Uuid]) -> Result<Vec<OrderItemQueryView>, DomainError> {
        self.item_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .items
            .iter()
            .filter(|i| order_ids.contains(&i.order_id))
            .cloned()
            .collect())
    }

    fn find_flat_rows(&self) -> Result<Vec<OrderFlatRow>, DomainError> {
        let mut rows = Vec::new();
        for header in &self.headers {
            for item in self.items.iter().filter(|i| i.order_id == header.order_id) {
                rows.push(OrderFlatRow {
                    order_id: header.order_id,
                    name: header.name.clone(),
                    order_date: header.order_date,
                    order_status: header.order_status,
                    address: header.address.clone(),
                    item_name: item.item_name.clone(),
                    order_price: item.order_price.clone(),
                    count: item.count,
                });
            }
        }
        Ok(rows)
    }
}
