//! Read models for the portfolio dashboard.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Profit summary for one product, as ranked on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductProfit {
    pub product_id: String,
    pub code: String,
    pub description: String,
    pub profit: Decimal,
    pub quantity_sold: u32,
}

/// Portfolio-level statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Sum over all products of `stock_quantity * supplier_cost`.
    pub total_stock_value: Decimal,
    /// Products with strictly positive profit, descending by profit, at most 5.
    pub top_profit_products: Vec<ProductProfit>,
}
