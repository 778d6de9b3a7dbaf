//! Stock movement domain type and its create/update DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementType {
    /// A receipt into stock.
    In,
    /// A sale or withdrawal out of stock.
    Out,
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementType::In => write!(f, "IN"),
            MovementType::Out => write!(f, "OUT"),
        }
    }
}

/// A single recorded inventory event, owned by the ledger store.
///
/// Movements are appended once and never deleted; the ledger reports them per
/// product ordered by `moved_at` ascending, ties broken by the sequence `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    /// Ledger sequence number, assigned monotonically by the store.
    pub id: u64,
    pub product_id: String,
    pub movement_type: MovementType,
    /// Units moved. Always `> 0`.
    pub quantity: u32,
    /// Unit sale price. Required for `Out`, ignored for `In`.
    pub sale_price: Option<Decimal>,
    /// Unit purchase cost of an `In` movement. When absent, profit
    /// calculations fall back to the product's current supplier cost.
    pub purchase_cost: Option<Decimal>,
    pub moved_at: DateTime<Utc>,
    pub description: Option<String>,
    /// On-hand quantity of the product immediately after this movement
    /// committed. Recorded by the quantity mutator as a running balance.
    pub stock_after: u32,
}

/// DTO for StockMovement creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementCreate {
    pub product_id: String,
    pub movement_type: MovementType,
    pub quantity: u32,
    pub sale_price: Option<Decimal>,
    pub purchase_cost: Option<Decimal>,
    /// Movement timestamp; defaults to now when absent.
    pub moved_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

impl MovementCreate {
    /// A receipt of `quantity` units at `purchase_cost` per unit.
    pub fn entry(product_id: impl Into<String>, quantity: u32, purchase_cost: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            movement_type: MovementType::In,
            quantity,
            sale_price: None,
            purchase_cost: Some(purchase_cost),
            moved_at: None,
            description: None,
        }
    }

    /// A sale of `quantity` units at `sale_price` per unit.
    pub fn exit(product_id: impl Into<String>, quantity: u32, sale_price: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            movement_type: MovementType::Out,
            quantity,
            sale_price: Some(sale_price),
            purchase_cost: None,
            moved_at: None,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// DTO for StockMovement updates.
///
/// An update replaces the movement's fields wholesale; it is an audit
/// correction of the ledger record and does not re-apply quantity effects to
/// the product. The product reference and timestamp are immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementUpdate {
    pub movement_type: MovementType,
    pub quantity: u32,
    pub sale_price: Option<Decimal>,
    pub purchase_cost: Option<Decimal>,
    pub description: Option<String>,
}
