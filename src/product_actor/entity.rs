//! Entity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation that enables
//! [`Product`] to be managed by the generic
//! [`crate::framework::ResourceActor`].
//!
//! The product actor is the inventory record store: it owns every product
//! record and is the only place on-hand quantities change. Because the actor
//! processes one message at a time, an `ApplyMovement` action is an exclusive
//! read-modify-write of the counter.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::framework::ActorEntity;
use crate::model::{MovementType, Product, ProductCreate, ProductUpdate};
use async_trait::async_trait;
use rust_decimal::Decimal;

fn validate_supplier_cost(cost: Decimal) -> Result<(), ProductError> {
    if cost <= Decimal::ZERO {
        return Err(ProductError::Validation(
            "supplier cost must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = String;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    /// Creates a new Product from creation parameters, rejecting invalid data
    /// before anything is stored.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        let mut errors = Vec::new();
        if params.code.trim().is_empty() {
            errors.push("code is required");
        }
        if params.description.trim().is_empty() {
            errors.push("description is required");
        }
        if params.supplier_cost <= Decimal::ZERO {
            errors.push("supplier cost must be greater than zero");
        }
        if !errors.is_empty() {
            return Err(ProductError::Validation(errors.join(", ")));
        }

        Ok(Self::new(
            id,
            params.code,
            params.description,
            params.category,
            params.supplier_cost,
            params.stock_quantity,
        ))
    }

    /// The product code is a unique business key across the whole store.
    fn validate_insert(&self, existing: &[&Self]) -> Result<(), ProductError> {
        if existing.iter().any(|p| p.code == self.code) {
            return Err(ProductError::DuplicateCode(self.code.clone()));
        }
        Ok(())
    }

    /// Handles updates to the Product entity.
    ///
    /// Each set field replaces the current value; the revision token is bumped
    /// once for the whole update.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        if let Some(supplier_cost) = update.supplier_cost {
            validate_supplier_cost(supplier_cost)?;
            self.supplier_cost = supplier_cost;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(stock_quantity) = update.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        self.version += 1;
        Ok(())
    }

    /// A product may only be removed once its stock has been fully drawn down.
    async fn on_delete(&self, _ctx: &()) -> Result<(), ProductError> {
        if self.stock_quantity > 0 {
            return Err(ProductError::StockNotEmpty(self.stock_quantity));
        }
        Ok(())
    }

    /// Handles custom actions for the Product entity.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the current stock level
    /// - `ApplyMovement`: Applies a quantity delta, guarding against negative
    ///   stock; on failure the product is left unchanged
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock_quantity)),
            ProductAction::ApplyMovement {
                movement_type,
                quantity,
            } => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                match movement_type {
                    MovementType::In => {
                        self.stock_quantity += quantity;
                    }
                    MovementType::Out => {
                        if self.stock_quantity < quantity {
                            return Err(ProductError::InsufficientStock {
                                requested: quantity,
                                available: self.stock_quantity,
                            });
                        }
                        self.stock_quantity -= quantity;
                    }
                }
                self.version += 1;
                Ok(ProductActionResult::ApplyMovement(self.stock_quantity))
            }
        }
    }
}
