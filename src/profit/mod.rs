//! FIFO cost-matching engine.
//!
//! Computes realized profit for a product by replaying its movement history:
//! every receipt contributes a cost layer, and every sale consumes the oldest
//! unconsumed layers first. The computation is a pure function over a snapshot
//! of the ledger; it takes no locks and mutates nothing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

use crate::model::{MovementType, Product, StockMovement};

/// Result of a profit calculation over a product's full movement history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitReport {
    pub revenue: Decimal,
    pub cost: Decimal,
    /// `revenue - cost`.
    pub profit: Decimal,
    pub quantity_sold: u32,
}

impl ProfitReport {
    fn zero() -> Self {
        Self {
            revenue: Decimal::ZERO,
            cost: Decimal::ZERO,
            profit: Decimal::ZERO,
            quantity_sold: 0,
        }
    }
}

/// Errors raised by the profit engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfitError {
    /// Cumulative outgoing quantity exceeds everything ever received. This
    /// implies the ledger under-covers the product's sales (e.g. stock seeded
    /// or corrected outside the ledger) and is reported rather than guessed
    /// around.
    #[error(
        "insufficient entry stock for product {product_id}: \
         exit of {requested} left {unmatched} units unmatched"
    )]
    InsufficientEntryStock {
        product_id: String,
        requested: u32,
        unmatched: u32,
    },
}

/// A remembered receipt batch, partially or fully consumed by later sales.
#[derive(Debug)]
struct CostLayer {
    remaining: u32,
    unit_cost: Decimal,
}

/// Computes revenue, cost, profit and quantity sold for `product` over
/// `movements`.
///
/// `movements` must be the product's full ledger history ordered by
/// `moved_at` ascending with ties broken by sequence id, exactly as
/// the ledger reports it.
///
/// Receipts are collected into cost layers first, then sales are walked in
/// ledger order, each consuming the oldest layers. A receipt without a
/// recorded purchase cost is costed at the product's current supplier cost;
/// a sale without a recorded sale price is priced the same way.
///
/// # Errors
/// [`ProfitError::InsufficientEntryStock`] when a sale cannot be fully
/// matched against the receipt layers.
pub fn compute_profit(
    product: &Product,
    movements: &[StockMovement],
) -> Result<ProfitReport, ProfitError> {
    if movements.is_empty() {
        return Ok(ProfitReport::zero());
    }

    let mut layers: VecDeque<CostLayer> = movements
        .iter()
        .filter(|m| m.movement_type == MovementType::In)
        .map(|m| CostLayer {
            remaining: m.quantity,
            unit_cost: m.purchase_cost.unwrap_or(product.supplier_cost),
        })
        .collect();

    let mut revenue = Decimal::ZERO;
    let mut cost = Decimal::ZERO;
    let mut quantity_sold: u32 = 0;

    for movement in movements {
        if movement.movement_type != MovementType::Out {
            continue;
        }

        quantity_sold += movement.quantity;
        let unit_price = movement.sale_price.unwrap_or(product.supplier_cost);
        revenue += unit_price * Decimal::from(movement.quantity);

        let mut remaining = movement.quantity;
        while remaining > 0 {
            let Some(layer) = layers.front_mut() else {
                return Err(ProfitError::InsufficientEntryStock {
                    product_id: product.id.clone(),
                    requested: movement.quantity,
                    unmatched: remaining,
                });
            };

            let consumed = remaining.min(layer.remaining);
            cost += layer.unit_cost * Decimal::from(consumed);
            remaining -= consumed;
            layer.remaining -= consumed;
            if layer.remaining == 0 {
                layers.pop_front();
            }
        }
    }

    Ok(ProfitReport {
        revenue,
        cost,
        profit: revenue - cost,
        quantity_sold,
    })
}
