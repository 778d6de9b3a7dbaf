//! # Movement Client
//!
//! Provides a high-level API for the ledger store and the read-side
//! operations that span both stores: profit calculation and the portfolio
//! dashboard.

use crate::clients::actor_client::ActorClient;
use crate::clients::product_client::ProductClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{
    DashboardStats, MovementCreate, MovementUpdate, ProductProfit, StockMovement,
};
use crate::movement_actor::MovementError;
use crate::profit::{self, ProfitReport};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Number of products reported on the dashboard ranking.
const TOP_PROFIT_LIMIT: usize = 5;

/// Client for interacting with the StockMovement actor.
///
/// Holds a [`ProductClient`] as well: profit queries need the product's
/// current supplier cost, and the dashboard walks every product. Movement
/// creation itself is orchestrated inside the movement entity's `on_create`
/// hook, not here, so the ledger append and the quantity effect commit or
/// abort together.
#[derive(Clone)]
pub struct MovementClient {
    inner: ResourceClient<StockMovement>,
    product_client: ProductClient,
}

impl MovementClient {
    pub fn new(inner: ResourceClient<StockMovement>, product_client: ProductClient) -> Self {
        Self {
            inner,
            product_client,
        }
    }
}

#[async_trait]
impl ActorClient<StockMovement> for MovementClient {
    type Error = MovementError;

    fn inner(&self) -> &ResourceClient<StockMovement> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => MovementError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<MovementError>() {
                Ok(err) => *err,
                Err(other) => MovementError::ActorCommunicationError(other.to_string()),
            },
            other => MovementError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl MovementClient {
    /// Record a stock movement and apply its quantity effect.
    ///
    /// The returned movement carries the assigned ledger id and
    /// `stock_after`, the product's on-hand quantity once the movement
    /// committed. Business rejections come back typed:
    /// [`MovementError::InsufficientStock`] for an over-draw,
    /// [`MovementError::ProductNotFound`] for a dangling reference, and
    /// [`MovementError::Validation`] for bad input (checked before any store
    /// access). In every failure case, neither store is changed.
    #[instrument(skip(self, params))]
    pub async fn apply_movement(
        &self,
        params: MovementCreate,
    ) -> Result<StockMovement, MovementError> {
        debug!(?params, "apply_movement called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Replace a recorded movement's fields wholesale.
    #[instrument(skip(self, update))]
    pub async fn update_movement(
        &self,
        id: u64,
        update: MovementUpdate,
    ) -> Result<StockMovement, MovementError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// The full ledger, oldest movement first.
    #[instrument(skip(self))]
    pub async fn list_movements(&self) -> Result<Vec<StockMovement>, MovementError> {
        let mut movements = self.inner.list().await.map_err(Self::map_error)?;
        sort_by_ledger_order(&mut movements);
        Ok(movements)
    }

    /// One product's movement history, oldest first, ties broken by the
    /// ledger sequence id.
    #[instrument(skip(self))]
    pub async fn movements_for_product(
        &self,
        product_id: &str,
    ) -> Result<Vec<StockMovement>, MovementError> {
        let mut movements: Vec<StockMovement> = self
            .inner
            .list()
            .await
            .map_err(Self::map_error)?
            .into_iter()
            .filter(|m| m.product_id == product_id)
            .collect();
        sort_by_ledger_order(&mut movements);
        Ok(movements)
    }

    /// The whole ledger grouped by product, each history oldest first.
    #[instrument(skip(self))]
    pub async fn movements_by_product(
        &self,
    ) -> Result<HashMap<String, Vec<StockMovement>>, MovementError> {
        let movements = self.list_movements().await?;
        let mut grouped: HashMap<String, Vec<StockMovement>> = HashMap::new();
        for movement in movements {
            grouped
                .entry(movement.product_id.clone())
                .or_default()
                .push(movement);
        }
        Ok(grouped)
    }

    /// Compute realized profit for one product by FIFO-matching its ledger
    /// history.
    ///
    /// Reads a snapshot of the product and its movements, then runs the pure
    /// engine; no locks are taken, and repeated calls with no intervening
    /// writes return identical reports.
    #[instrument(skip(self))]
    pub async fn compute_profit(&self, product_id: &str) -> Result<ProfitReport, MovementError> {
        let product = self
            .product_client
            .get(product_id.to_string())
            .await
            .map_err(MovementError::from)?
            .ok_or_else(|| MovementError::ProductNotFound(product_id.to_string()))?;

        let movements = self.movements_for_product(product_id).await?;
        let report = profit::compute_profit(&product, &movements)?;
        Ok(report)
    }

    /// Portfolio statistics: total stock value plus the top profitable
    /// products.
    ///
    /// A product whose profit calculation fails — the ledger may legitimately
    /// under-cover sales after out-of-band stock corrections — is excluded
    /// from the ranking rather than failing the whole report.
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, MovementError> {
        let products = self
            .product_client
            .list_products()
            .await
            .map_err(MovementError::from)?;

        let mut total_stock_value = Decimal::ZERO;
        for product in &products {
            total_stock_value += product.stock_value();
        }

        let mut ranked: Vec<ProductProfit> = Vec::new();
        for product in &products {
            match self.compute_profit(&product.id).await {
                Ok(report) if report.profit > Decimal::ZERO => {
                    ranked.push(ProductProfit {
                        product_id: product.id.clone(),
                        code: product.code.clone(),
                        description: product.description.clone(),
                        profit: report.profit,
                        quantity_sold: report.quantity_sold,
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(product_id = %product.id, error = %e, "Excluding product from profit ranking");
                }
            }
        }

        // Stable sort: ties keep the code-ordered input order.
        ranked.sort_by(|a, b| b.profit.cmp(&a.profit));
        ranked.truncate(TOP_PROFIT_LIMIT);

        Ok(DashboardStats {
            total_stock_value,
            top_profit_products: ranked,
        })
    }
}

fn sort_by_ledger_order(movements: &mut [StockMovement]) {
    movements.sort_by(|a, b| a.moved_at.cmp(&b.moved_at).then_with(|| a.id.cmp(&b.id)));
}
