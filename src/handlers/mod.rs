pub mod items;
pub mod members;
pub mod orders;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::item_service::ItemService;
use crate::application::member_search_service::MemberSearchService;
use crate::application::member_service::MemberService;
use crate::application::order_query_service::OrderQueryService;
use crate::application::order_service::OrderService;
use crate::db::DbPool;
use crate::domain::member::Address;
use crate::domain::page::Page;
use crate::infrastructure::item_repo::DieselItemRepository;
use crate::infrastructure::member_repo::DieselMemberRepository;
use crate::infrastructure::member_search_repo::DieselMemberSearchRepository;
use crate::infrastructure::order_query_repo::DieselOrderQueryRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;

/// Services shared by every worker through `web::Data`.
pub struct AppState {
    pub members: MemberService<DieselMemberRepository>,
    pub member_search: MemberSearchService<DieselMemberSearchRepository>,
    pub items: ItemService<DieselItemRepository>,
    pub orders: OrderService<DieselOrderRepository>,
    pub order_queries: OrderQueryService<DieselOrderQueryRepository>,
}

impl AppState {
    pub fn new(pool: DbPool, order_search_limit: i64) -> Self {
        Self {
            members: MemberService::new(DieselMemberRepository::new(pool.clone())),
            member_search: MemberSearchService::new(DieselMemberSearchRepository::new(
                pool.clone(),
            )),
            items: ItemService::new(DieselItemRepository::new(pool.clone())),
            orders: OrderService::new(DieselOrderRepository::new(pool.clone()), order_search_limit),
            order_queries: OrderQueryService::new(DieselOrderQueryRepository::new(pool)),
        }
    }
}

// ── Shared DTOs ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddressDto {
    pub city: Option<String>,
    pub street: Option<String>,
    pub zipcode: Option<String>,
}

impl From<Address> for AddressDto {
    fn from(a: Address) -> Self {
        AddressDto {
            city: a.city,
            street: a.street,
            zipcode: a.zipcode,
        }
    }
}

impl From<AddressDto> for Address {
    fn from(a: AddressDto) -> Self {
        Address {
            city: a.city,
            street: a.street,
            zipcode: a.zipcode,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub first: bool,
    pub last: bool,
    pub has_next: bool,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        PageResponse {
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages(),
            first: page.is_first(),
            last: page.is_last(),
            has_next: page.has_next(),
            content: page.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page::{MemberSort, PageRequest};

    #[test]
    fn page_response_carries_derived_flags() {
        let request = PageRequest::new(1, 2, MemberSort::default()).unwrap();
        let page = Page::new(vec!["c", "d"], &request, 5);

        let body = serde_json::to_value(PageResponse::from(page)).unwrap();

        assert_eq!(body["content"], serde_json::json!(["c", "d"]));
        assert_eq!(body["page"], 1);
        assert_eq!(body["total_elements"], 5);
        assert_eq!(body["total_pages"], 3);
        assert_eq!(body["first"], false);
        assert_eq!(body["last"], false);
        assert_eq!(body["has_next"], true);
    }

    #[test]
    fn missing_address_fields_deserialize_as_none() {
        let dto: AddressDto = serde_json::from_str(r#"{"city":"Seoul"}"#).unwrap();
        let address = Address::from(dto);
        assert_eq!(address.city.as_deref(), Some("Seoul"));
        assert_eq!(address.street, None);
    }
}
