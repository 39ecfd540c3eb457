use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not enough stock: requested {requested}, available {available}")]
    NotEnoughStock { requested: i32, available: i32 },
    #[error("Order has already been delivered and cannot be cancelled")]
    AlreadyDelivered,
    #[error("Internal error: {0}")]
    Internal(String),
}
