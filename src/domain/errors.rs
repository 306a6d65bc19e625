use thiserror::Error;

use super::cart::ProductId;

pub const STOCK_EXCEEDED_MESSAGE: &str = "Requested quantity exceeds stock";

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Requested {requested} but only {available} in stock")]
    StockExceeded { requested: i64, available: i64 },
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),
    #[error("Inventory error: {0}")]
    Inventory(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Corrupt cart snapshot: {0}")]
    CorruptSnapshot(String),
}

/// The three cart mutations, used to pick the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    AddItem,
    RemoveItem,
    UpdateAmount,
}

impl CartOperation {
    pub fn failure_message(self) -> &'static str {
        match self {
            CartOperation::AddItem => "Failed to add product",
            CartOperation::RemoveItem => "Failed to remove product",
            CartOperation::UpdateAmount => "Failed to change product quantity",
        }
    }
}

impl CartError {
    /// User-facing text for this error when it aborts `operation`.
    pub fn user_message(&self, operation: CartOperation) -> &'static str {
        match self {
            CartError::StockExceeded { .. } => STOCK_EXCEEDED_MESSAGE,
            _ => operation.failure_message(),
        }
    }
}
