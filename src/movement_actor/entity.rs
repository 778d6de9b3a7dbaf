//! Entity trait implementation for the StockMovement domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation that enables
//! [`StockMovement`] to be managed by the generic
//! [`crate::framework::ResourceActor`].
//!
//! The movement actor is the ledger store. Its `on_create` hook applies the
//! movement's quantity delta through the injected [`ProductClient`] *before*
//! the ledger entry is inserted: a failed mutation aborts the create, so a
//! movement record never exists without its quantity effect, and vice versa.

use super::error::MovementError;
use crate::clients::ProductClient;
use crate::framework::ActorEntity;
use crate::model::{MovementCreate, MovementType, MovementUpdate, StockMovement};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

impl StockMovement {
    /// Field-level validation, shared by creation and wholesale updates.
    fn validate(&self) -> Result<(), MovementError> {
        let mut errors = Vec::new();

        if self.product_id.trim().is_empty() {
            errors.push("product reference is required".to_string());
        }
        if self.quantity == 0 {
            errors.push("quantity must be greater than zero".to_string());
        }
        match self.movement_type {
            MovementType::Out => {
                if self.sale_price.is_none() {
                    errors.push("sale price is required for OUT movements".to_string());
                }
            }
            MovementType::In => {}
        }
        if let Some(price) = self.sale_price {
            if price <= Decimal::ZERO {
                errors.push("sale price must be greater than zero".to_string());
            }
        }
        if let Some(cost) = self.purchase_cost {
            if cost <= Decimal::ZERO {
                errors.push("purchase cost must be greater than zero".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(MovementError::Validation(errors.join(", ")))
        }
    }
}

#[async_trait]
impl ActorEntity for StockMovement {
    type Id = u64;
    type Create = MovementCreate;
    type Update = MovementUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ProductClient;
    type Error = MovementError;

    /// Creates a new StockMovement from creation parameters.
    ///
    /// Validation happens here, before any store is touched; the quantity
    /// effect is applied later in [`ActorEntity::on_create`].
    fn from_create_params(id: u64, params: MovementCreate) -> Result<Self, MovementError> {
        let movement = Self {
            id,
            product_id: params.product_id,
            movement_type: params.movement_type,
            quantity: params.quantity,
            sale_price: params.sale_price,
            purchase_cost: params.purchase_cost,
            moved_at: params.moved_at.unwrap_or_else(Utc::now),
            description: params.description,
            stock_after: 0,
        };
        movement.validate()?;
        Ok(movement)
    }

    /// Applies the quantity delta to the product before the ledger entry is
    /// inserted. The product actor serializes the read-modify-write and
    /// rejects exits that would drive stock negative; its typed error is
    /// surfaced unchanged and the movement is never stored.
    async fn on_create(&mut self, ctx: &ProductClient) -> Result<(), MovementError> {
        let stock_after = ctx
            .apply_stock_movement(self.product_id.clone(), self.movement_type, self.quantity)
            .await?;
        self.stock_after = stock_after;
        Ok(())
    }

    /// Replaces the movement's fields wholesale and re-validates.
    ///
    /// This is an audit correction of the ledger record: the product's
    /// quantity is not re-derived, and the recorded running balance is kept.
    async fn on_update(
        &mut self,
        update: MovementUpdate,
        _ctx: &ProductClient,
    ) -> Result<(), MovementError> {
        let previous = self.clone();

        self.movement_type = update.movement_type;
        self.quantity = update.quantity;
        self.sale_price = update.sale_price;
        self.purchase_cost = update.purchase_cost;
        self.description = update.description;

        if let Err(e) = self.validate() {
            *self = previous;
            return Err(e);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &ProductClient) -> Result<(), MovementError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn exit_without_sale_price_is_rejected() {
        let err = StockMovement::from_create_params(
            1,
            MovementCreate {
                product_id: "product_1".to_string(),
                movement_type: MovementType::Out,
                quantity: 3,
                sale_price: None,
                purchase_cost: None,
                moved_at: None,
                description: None,
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            MovementError::Validation("sale price is required for OUT movements".to_string())
        );
    }

    #[test]
    fn zero_quantity_is_rejected_before_any_store_access() {
        let err = StockMovement::from_create_params(
            1,
            MovementCreate {
                product_id: "product_1".to_string(),
                movement_type: MovementType::In,
                quantity: 0,
                sale_price: None,
                purchase_cost: Some(dec!(3000)),
                moved_at: None,
                description: None,
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            MovementError::Validation("quantity must be greater than zero".to_string())
        );
    }

    #[test]
    fn entry_without_purchase_cost_is_accepted() {
        // The profit engine falls back to the product's supplier cost.
        let movement = StockMovement::from_create_params(
            1,
            MovementCreate::entry("product_1", 5, dec!(3000)),
        )
        .unwrap();
        assert_eq!(movement.quantity, 5);
        assert_eq!(movement.stock_after, 0);

        let bare = StockMovement::from_create_params(
            2,
            MovementCreate {
                purchase_cost: None,
                ..MovementCreate::entry("product_1", 5, dec!(3000))
            },
        );
        assert!(bare.is_ok());
    }

    #[tokio::test]
    async fn invalid_update_rolls_the_record_back() {
        let mut movement = StockMovement::from_create_params(
            1,
            MovementCreate::entry("product_1", 5, dec!(3000)),
        )
        .unwrap();

        let mock = crate::framework::mock::MockClient::<crate::model::Product>::new();
        let ctx = ProductClient::new(mock.client());

        let err = movement
            .on_update(
                MovementUpdate {
                    movement_type: MovementType::Out,
                    quantity: 0,
                    sale_price: None,
                    purchase_cost: None,
                    description: None,
                },
                &ctx,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, MovementError::Validation(_)));
        // Unchanged after the failed update.
        assert_eq!(movement.quantity, 5);
        assert_eq!(movement.movement_type, MovementType::In);
    }
}
