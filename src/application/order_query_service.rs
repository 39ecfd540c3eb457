use crate::domain::errors::DomainError;
use crate::domain::order_query::{
    attach_order_items, group_flat_rows, OrderHeader, OrderQueryView,
};
use crate::domain::ports::OrderQueryRepository;

pub struct OrderQueryService<R> {
    repo: R,
}

impl<R: OrderQueryRepository> OrderQueryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn find_order_summaries(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<OrderHeader>, DomainError> {
        self.repo.find_headers(offset, limit)
    }

    /// One item query per order header.
    pub fn find_orders_per_order(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<OrderQueryView>, DomainError> {
        self.repo
            .find_headers(offset, limit)?
            .into_iter()
            .map(|header| {
                let order_items = self.repo.find_items(&[header.order_id])?;
                Ok(OrderQueryView {
                    header,
                    order_items,
                })
            })
            .collect()
    }

    /// One item query for the whole page of headers.
    pub fn find_orders_batched(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<OrderQueryView>, DomainError> {
        let headers = self.repo.find_headers(offset, limit)?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        let order_ids: Vec<_> = headers.iter().map(|h| h.order_id).collect();
        let items = self.repo.find_items(&order_ids)?;
        Ok(attach_order_items(headers, items))
    }

    /// A single join query regrouped in memory. Unpaged.
    pub fn find_orders_flat(&self) -> Result<Vec<OrderQueryView>, DomainError> {
        Ok(group_flat_rows(self.repo.find_flat_rows()?))
    }
}
