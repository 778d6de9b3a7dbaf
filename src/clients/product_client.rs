//! # Product Client
//!
//! Provides a high-level API for interacting with the Product actor — the
//! inventory record store. It wraps a `ResourceClient<Product>` and exposes
//! domain-specific methods.

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{MovementType, Product, ProductCreate, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<ProductError>() {
                Ok(err) => *err,
                Err(other) => ProductError::ActorCommunicationError(other.to_string()),
            },
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    /// Register a new product. Responds with the stored record, including the
    /// assigned id.
    #[instrument(skip(self, params))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Update a product's mutable fields.
    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: String,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Snapshot of all products, ordered by business code so repeated reads
    /// and downstream rankings are deterministic.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let mut products = self.inner.list().await.map_err(Self::map_error)?;
        products.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(products)
    }

    /// All products whose category matches, case-insensitively.
    #[instrument(skip(self))]
    pub async fn products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, ProductError> {
        let products = self.list_products().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .collect())
    }

    /// Check the current stock level for a product.
    ///
    /// Returns the quantity available.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        match self.inner.perform_action(id, ProductAction::CheckStock).await {
            Ok(ProductActionResult::CheckStock(level)) => Ok(level),
            Ok(_) => unreachable!("CheckStock action must return CheckStock result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Apply one movement's quantity delta to a product, returning the stock
    /// level after the delta.
    ///
    /// The delta is applied inside the product actor, so concurrent calls
    /// against the same product are serialized and an `Out` beyond the
    /// available stock fails with
    /// [`ProductError::InsufficientStock`] without changing anything.
    #[instrument(skip(self))]
    pub async fn apply_stock_movement(
        &self,
        id: String,
        movement_type: MovementType,
        quantity: u32,
    ) -> Result<u32, ProductError> {
        debug!(
            "Applying {} movement of {} units to product {}",
            movement_type, quantity, id
        );
        match self
            .inner
            .perform_action(
                id,
                ProductAction::ApplyMovement {
                    movement_type,
                    quantity,
                },
            )
            .await
        {
            Ok(ProductActionResult::ApplyMovement(level)) => Ok(level),
            Ok(_) => unreachable!("ApplyMovement action must return ApplyMovement result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        // Spawn task to call check_stock
        let check_task =
            tokio::spawn(async move { product_client.check_stock("product_1".to_string()).await });

        // Expect the action request
        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        assert_eq!(id, "product_1");
        assert!(matches!(action, ProductAction::CheckStock));

        // Respond with stock level
        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        // Verify the result
        let result = check_task.await.unwrap();
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_apply_stock_movement_success() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let apply_task = tokio::spawn(async move {
            product_client
                .apply_stock_movement("product_1".to_string(), MovementType::In, 5)
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        assert_eq!(id, "product_1");
        match action {
            ProductAction::ApplyMovement {
                movement_type,
                quantity,
            } => {
                assert_eq!(movement_type, MovementType::In);
                assert_eq!(quantity, 5);
            }
            _ => panic!("Expected ApplyMovement action"),
        }

        responder
            .send(Ok(ProductActionResult::ApplyMovement(15)))
            .unwrap();

        let result = apply_task.await.unwrap();
        assert_eq!(result.unwrap(), 15);
    }

    #[tokio::test]
    async fn test_apply_stock_movement_insufficient_stock() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let apply_task = tokio::spawn(async move {
            product_client
                .apply_stock_movement("product_1".to_string(), MovementType::Out, 100)
                .await
        });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        // The actor boxes the typed error; the client downcasts it back.
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    requested: 100,
                    available: 7,
                },
            ))))
            .unwrap();

        let result = apply_task.await.unwrap();
        assert_eq!(
            result.unwrap_err(),
            ProductError::InsufficientStock {
                requested: 100,
                available: 7,
            }
        );
    }

    #[tokio::test]
    async fn test_list_products_sorts_by_code() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let list_task = tokio::spawn(async move { product_client.list_products().await });

        let responder = crate::framework::mock::expect_list(&mut receiver)
            .await
            .expect("Expected List request");
        responder
            .send(Ok(vec![
                Product::new("product_2", "ZZ-9", "Widget B", "HARDWARE", dec!(10), 0),
                Product::new("product_1", "AA-1", "Widget A", "HARDWARE", dec!(10), 0),
            ]))
            .unwrap();

        let products = list_task.await.unwrap().unwrap();
        assert_eq!(products[0].code, "AA-1");
        assert_eq!(products[1].code, "ZZ-9");
    }
}
