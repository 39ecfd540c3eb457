pub mod errors;
pub mod item;
pub mod member;
pub mod order;
pub mod order_query;
pub mod page;
pub mod ports;
pub mod search;
