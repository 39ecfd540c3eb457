use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::member::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Order,
    Cancel,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Order => "ORDER",
            OrderStatus::Cancel => "CANCEL",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ORDER" => Ok(OrderStatus::Order),
            "CANCEL" => Ok(OrderStatus::Cancel),
            other => Err(DomainError::InvalidInput(format!(
                "unknown order status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    Ready,
    Comp,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Ready => "READY",
            DeliveryStatus::Comp => "COMP",
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READY" => Ok(DeliveryStatus::Ready),
            "COMP" => Ok(DeliveryStatus::Comp),
            other => Err(DomainError::InvalidInput(format!(
                "unknown delivery status '{}'",
                other
            ))),
        }
    }
}

/// Checks the two-state lifecycle before moving an order to `CANCEL`.
pub fn ensure_cancellable(
    status: OrderStatus,
    delivery: DeliveryStatus,
) -> Result<(), DomainError> {
    if delivery == DeliveryStatus::Comp {
        return Err(DomainError::AlreadyDelivered);
    }
    if status == OrderStatus::Cancel {
        return Err(DomainError::InvalidInput(
            "order is already cancelled".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub order_price: BigDecimal,
    pub count: i32,
}

impl OrderItemView {
    pub fn total_price(&self) -> BigDecimal {
        &self.order_price * BigDecimal::from(self.count)
    }
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub member_id: Uuid,
    pub member_name: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub delivery_status: DeliveryStatus,
    pub address: Address,
    pub items: Vec<OrderItemView>,
}

impl OrderView {
    pub fn total_price(&self) -> BigDecimal {
        self.items
            .iter()
            .fold(BigDecimal::from(0), |acc, item| acc + item.total_price())
    }
}

/// Filters for the entity-style order search. Blank names are ignored.
#[derive(Debug, Clone, Default)]
pub struct OrderSearch {
    pub member_name: Option<String>,
    pub order_status: Option<OrderStatus>,
}

impl OrderSearch {
    pub fn member_name(&self) -> Option<&str> {
        self.member_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
