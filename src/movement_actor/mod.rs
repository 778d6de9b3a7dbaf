//! Ledger-specific resource logic and entity implementation.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{MovementClient, ProductClient};
use crate::framework::ResourceActor;
use crate::model::StockMovement;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new StockMovement actor and its client.
///
/// The `ProductClient` is needed twice: the returned [`MovementClient`] uses
/// it for profit and dashboard queries, and a clone must be injected as the
/// actor's context via `actor.run(product_client)` so `on_create` can apply
/// quantity deltas.
pub fn new(product_client: ProductClient) -> (ResourceActor<StockMovement>, MovementClient) {
    let movement_seq = Arc::new(AtomicU64::new(1));
    let next_movement_id = move || movement_seq.fetch_add(1, Ordering::SeqCst);

    let (actor, generic_client) = ResourceActor::new(32, next_movement_id);
    let client = MovementClient::new(generic_client, product_client);

    (actor, client)
}
