//! Product domain type and its create/update DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product tracked by the inventory record store.
///
/// The on-hand quantity is only ever mutated through the product actor's
/// `ApplyMovement` action, which keeps it non-negative. `version` is an
/// optimistic revision token, bumped on every committed mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// Unique, immutable business key (e.g. `"NB-001"`).
    pub code: String,
    pub description: String,
    /// Product type used for catalogue filtering (e.g. `"ELECTRONIC"`).
    pub category: String,
    /// Current unit cost charged by the supplier. Always `> 0`.
    pub supplier_cost: Decimal,
    /// On-hand quantity. Never negative at any committed state.
    pub stock_quantity: u32,
    pub version: u64,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the actor system)
    /// * `code` - Unique business key
    /// * `description` - Human-readable description
    /// * `category` - Product type
    /// * `supplier_cost` - Current supplier unit cost
    /// * `stock_quantity` - Initial on-hand quantity
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        supplier_cost: Decimal,
        stock_quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            description: description.into(),
            category: category.into(),
            supplier_cost,
            stock_quantity,
            version: 0,
        }
    }

    /// Value of the on-hand stock at the current supplier cost.
    pub fn stock_value(&self) -> Decimal {
        self.supplier_cost * Decimal::from(self.stock_quantity)
    }
}

/// DTO for Product creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub code: String,
    pub description: String,
    pub category: String,
    pub supplier_cost: Decimal,
    /// Initial on-hand quantity, commonly 0. A nonzero value seeds stock
    /// without a ledger entry (an opening-balance correction).
    pub stock_quantity: u32,
}

/// DTO for Product updates. A set field replaces the current value; the
/// business key `code` is immutable and cannot be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub description: Option<String>,
    pub category: Option<String>,
    pub supplier_cost: Option<Decimal>,
    /// Direct quantity correction outside the ledger. The profit engine may
    /// subsequently report insufficient entry stock for quantities that never
    /// went through a movement.
    pub stock_quantity: Option<u32>,
}
