use log::info;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderSearch, OrderView};
use crate::domain::ports::OrderRepository;

pub struct OrderService<R> {
    repo: R,
    search_limit: i64,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R, search_limit: i64) -> Self {
        Self { repo, search_limit }
    }

    pub fn place_order(
        &self,
        member_id: Uuid,
        item_id: Uuid,
        count: i32,
    ) -> Result<Uuid, DomainError> {
        if count < 1 {
            return Err(DomainError::InvalidInput(format!(
                "order count must be at least 1, got {}",
                count
            )));
        }
        let order_id = self.repo.place(member_id, item_id, count)?;
        info!(
            "Placed order {} for member {} ({} x item {})",
            order_id, member_id, count, item_id
        );
        Ok(order_id)
    }

    pub fn cancel_order(&self, order_id: Uuid) -> Result<(), DomainError> {
        self.repo.cancel(order_id)?;
        info!("Cancelled order {}", order_id);
        Ok(())
    }

    pub fn get_order(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound("Order"))
    }

    pub fn search_orders(&self, search: &OrderSearch) -> Result<Vec<OrderView>, DomainError> {
        self.repo.search(search, self.search_limit)
    }
}
