//! Error types for the StockMovement actor.

use crate::product_actor::ProductError;
use crate::profit::ProfitError;
use thiserror::Error;

/// Errors that can occur during stock movement operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MovementError {
    /// The requested movement was not found.
    #[error("Movement not found: {0}")]
    NotFound(String),

    /// The product referenced by the movement does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The outgoing quantity exceeds the product's on-hand stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// At profit-calculation time, cumulative exits exceed cumulative entries.
    #[error(
        "Insufficient entry stock for product {product_id}: \
         exit of {requested} left {unmatched} units unmatched"
    )]
    InsufficientEntryStock {
        product_id: String,
        requested: u32,
        unmatched: u32,
    },

    /// The movement data failed validation.
    #[error("Invalid movement data: {0}")]
    Validation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<ProductError> for MovementError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => MovementError::ProductNotFound(id),
            ProductError::InsufficientStock {
                requested,
                available,
            } => MovementError::InsufficientStock {
                requested,
                available,
            },
            ProductError::InvalidQuantity(q) => {
                MovementError::Validation(format!("invalid quantity: {}", q))
            }
            other => MovementError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ProfitError> for MovementError {
    fn from(e: ProfitError) -> Self {
        match e {
            ProfitError::InsufficientEntryStock {
                product_id,
                requested,
                unmatched,
            } => MovementError::InsufficientEntryStock {
                product_id,
                requested,
                unmatched,
            },
        }
    }
}
