//! Read-side order projections and the reshaping of join rows into nested
//! order views.

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::member::Address;
use super::order::OrderStatus;

/// Header of an order projection; also the group key for flat rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderHeader {
    pub order_id: Uuid,
    pub name: String,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderItemQueryView {
    pub order_id: Uuid,
    pub item_name: String,
    pub order_price: BigDecimal,
    pub count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQueryView {
    pub header: OrderHeader,
    pub order_items: Vec<OrderItemQueryView>,
}

/// One row of `orders ⋈ members ⋈ deliveries ⋈ order_items ⋈ items`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderFlatRow {
    pub order_id: Uuid,
    pub name: String,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub address: Address,
    pub item_name: String,
    pub order_price: BigDecimal,
    pub count: i32,
}

impl OrderFlatRow {
    fn into_parts(self) -> (OrderHeader, OrderItemQueryView) {
        let item = OrderItemQueryView {
            order_id: self.order_id,
            item_name: self.item_name,
            order_price: self.order_price,
            count: self.count,
        };
        let header = OrderHeader {
            order_id: self.order_id,
            name: self.name,
            order_date: self.order_date,
            order_status: self.order_status,
            address: self.address,
        };
        (header, item)
    }
}

impl OrderQueryView {
    pub fn new(header: OrderHeader) -> Self {
        Self {
            header,
            order_items: Vec::new(),
        }
    }

    pub fn flatten(&self) -> Vec<OrderFlatRow> {
        self.order_items
            .iter()
            .map(|item| OrderFlatRow {
                order_id: self.header.order_id,
                name: self.header.name.clone(),
                order_date: self.header.order_date,
                order_status: self.header.order_status,
                address: self.header.address.clone(),
                item_name: item.item_name.clone(),
                order_price: item.order_price.clone(),
                count: item.count,
            })
            .collect()
    }
}

/// Regroups flat join rows into one view per distinct header.
///
/// Groups keep the order in which their header first appears and items keep
/// row order within a group. Rows sharing an order id are expected to carry
/// identical header fields. The input must already be bounded: slicing flat
/// rows into pages can split an order's items across pages.
pub fn group_flat_rows(rows: Vec<OrderFlatRow>) -> Vec<OrderQueryView> {
    let mut index: HashMap<OrderHeader, usize> = HashMap::new();
    let mut groups: Vec<OrderQueryView> = Vec::new();

    for row in rows {
        let (header, item) = row.into_parts();
        let slot = match index.get(&header) {
            Some(&slot) => slot,
            None => {
                index.insert(header.clone(), groups.len());
                groups.push(OrderQueryView::new(header));
                groups.len() - 1
            }
        };
        groups[slot].order_items.push(item);
    }

    groups
}

/// Attaches items fetched in one batch to their headers by order id. Headers
/// without items get an empty list.
pub fn attach_order_items(
    headers: Vec<OrderHeader>,
    items: Vec<OrderItemQueryView>,
) -> Vec<OrderQueryView> {
    let mut by_order: HashMap<Uuid, Vec<OrderItemQueryView>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    headers
        .into_iter()
        .map(|header| {
            let order_items = by_order.remove(&header.order_id).unwrap_or_default();
            OrderQueryView {
                header,
                order_items,
            }
        })
        .collect()
}
