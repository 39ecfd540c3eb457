pub mod item_service;
pub mod member_search_service;
pub mod member_service;
pub mod order_query_service;
pub mod order_service;

#[cfg(test)]
pub(crate) mod fakes;
