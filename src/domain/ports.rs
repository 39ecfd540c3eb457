use uuid::Uuid;

use super::errors::DomainError;
use super::item::{Item, ItemUpdate, NewItem};
use super::member::{MemberTeamView, MemberView, NewMember};
use super::order::{OrderSearch, OrderView};
use super::order_query::{OrderFlatRow, OrderHeader, OrderItemQueryView};
use super::page::PageRequest;
use super::search::Predicate;

pub trait MemberRepository: Send + Sync + 'static {
    fn create_team(&self, name: &str) -> Result<Uuid, DomainError>;
    fn create(&self, member: NewMember) -> Result<Uuid, DomainError>;
    fn exists_by_name(&self, name: &str) -> Result<bool, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<MemberView>, DomainError>;
    fn find_all(&self) -> Result<Vec<MemberView>, DomainError>;
    /// Returns `false` when no member has the given id.
    fn update_name(&self, id: Uuid, name: &str) -> Result<bool, DomainError>;
}

/// Row store for the `members LEFT JOIN teams` projection.
pub trait MemberSearchRepository: Send + Sync + 'static {
    fn find_all(&self, predicate: &Predicate) -> Result<Vec<MemberTeamView>, DomainError>;
    fn find_page(
        &self,
        predicate: &Predicate,
        request: &PageRequest,
    ) -> Result<Vec<MemberTeamView>, DomainError>;
    fn count(&self, predicate: &Predicate) -> Result<i64, DomainError>;
}

pub trait ItemRepository: Send + Sync + 'static {
    fn create(&self, item: NewItem) -> Result<Uuid, DomainError>;
    fn find_all(&self) -> Result<Vec<Item>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError>;
    /// Returns `false` when no item has the given id.
    fn update(&self, id: Uuid, update: ItemUpdate) -> Result<bool, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn place(&self, member_id: Uuid, item_id: Uuid, count: i32) -> Result<Uuid, DomainError>;
    fn cancel(&self, order_id: Uuid) -> Result<(), DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn search(&self, search: &OrderSearch, limit: i64) -> Result<Vec<OrderView>, DomainError>;
}

pub trait OrderQueryRepository: Send + Sync + 'static {
    fn find_headers(&self, offset: i64, limit: i64) -> Result<Vec<OrderHeader>, DomainError>;
    fn find_items(&self, order_ids: &[Uuid]) -> Result<Vec<OrderItemQueryView>, DomainError>;
    fn find_flat_rows(&self) -> Result<Vec<OrderFlatRow>, DomainError>;
}
