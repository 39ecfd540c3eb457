use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::item::{Item, ItemKind};
use crate::domain::member::{Address, MemberTeamView, MemberView};
use crate::domain::order::{DeliveryStatus, OrderStatus};
use crate::schema::{deliveries, items, members, order_items, orders, teams};

#[derive(Debug, Insertable)]
#[diesel(table_name = teams)]
pub struct NewTeamRow {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub city: Option<String>,
    pub street: Option<String>,
    pub zipcode: Option<String>,
    pub team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MemberRow> for MemberView {
    fn from(row: MemberRow) -> Self {
        MemberView {
            id: row.id,
            name: row.name,
            age: row.age,
            address: Address {
                city: row.city,
                street: row.street,
                zipcode: row.zipcode,
            },
            team_id: row.team_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = members)]
pub struct NewMemberRow {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub city: Option<String>,
    pub street: Option<String>,
    pub zipcode: Option<String>,
    pub team_id: Option<Uuid>,
}

/// `members LEFT JOIN teams` projection.
#[derive(Debug, Queryable)]
pub struct MemberTeamRow {
    pub member_id: Uuid,
    pub name: String,
    pub age: i32,
    pub team_id: Option<Uuid>,
    pub team_name: Option<String>,
}

impl From<MemberTeamRow> for MemberTeamView {
    fn from(row: MemberTeamRow) -> Self {
        MemberTeamView {
            member_id: row.member_id,
            name: row.name,
            age: row.age,
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    pub id: Uuid,
    pub dtype: String,
    pub name: String,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub artist: Option<String>,
    pub etc: Option<String>,
    pub director: Option<String>,
    pub actor: Option<String>,
}

impl TryFrom<ItemRow> for Item {
    type Error = DomainError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let kind = match row.dtype.as_str() {
            "B" => ItemKind::Book {
                author: row.author,
                isbn: row.isbn,
            },
            "A" => ItemKind::Album {
                artist: row.artist,
                etc: row.etc,
            },
            "M" => ItemKind::Movie {
                director: row.director,
                actor: row.actor,
            },
            other => {
                return Err(DomainError::Internal(format!(
                    "item {} has unknown dtype '{}'",
                    row.id, other
                )))
            }
        };
        Ok(Item {
            id: row.id,
            name: row.name,
            price: row.price,
            stock_quantity: row.stock_quantity,
            kind,
        })
    }
}

#[derive(Debug, Default, Insertable)]
#[diesel(table_name = items)]
pub struct NewItemRow {
    pub id: Uuid,
    pub dtype: String,
    pub name: String,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub artist: Option<String>,
    pub etc: Option<String>,
    pub director: Option<String>,
    pub actor: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = deliveries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryRow {
    pub id: Uuid,
    pub city: Option<String>,
    pub street: Option<String>,
    pub zipcode: Option<String>,
    pub status: String,
}

impl DeliveryRow {
    pub fn address(&self) -> Address {
        Address {
            city: self.city.clone(),
            street: self.street.clone(),
            zipcode: self.zipcode.clone(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = deliveries)]
pub struct NewDeliveryRow {
    pub id: Uuid,
    pub city: Option<String>,
    pub street: Option<String>,
    pub zipcode: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub member_id: Uuid,
    pub delivery_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub member_id: Uuid,
    pub delivery_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub item_id: Uuid,
    pub order_price: BigDecimal,
    pub count: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub item_id: Uuid,
    pub order_price: BigDecimal,
    pub count: i32,
}

/// Status columns are written by this service only, so an unknown value is
/// corrupted data rather than bad input.
pub fn parse_order_status(value: &str) -> Result<OrderStatus, DomainError> {
    OrderStatus::from_str(value).map_err(|e| DomainError::Internal(e.to_string()))
}

pub fn parse_delivery_status(value: &str) -> Result<DeliveryStatus, DomainError> {
    DeliveryStatus::from_str(value).map_err(|e| DomainError::Internal(e.to_string()))
}
