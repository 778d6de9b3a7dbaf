use crate::clients::{MovementClient, ProductClient};
use tracing::{error, info};

/// The main runtime orchestrator for the actor-based inventory system.
///
/// `InventorySystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping all actors in the system
/// - **Dependency Wiring**: Injecting the `ProductClient` into the movement
///   actor so ledger appends can apply quantity deltas
///
/// # Architecture
///
/// The system consists of two actors:
/// - **Product Actor**: The inventory record store; owns every product record
///   and serializes all quantity mutations
/// - **Movement Actor**: The ledger store; appends movements and drives the
///   quantity mutation from its `on_create` hook
///
/// # Example
///
/// ```ignore
/// let system = InventorySystem::new();
///
/// let product = system.product_client.create_product(params).await?;
/// let movement = system
///     .movement_client
///     .apply_movement(MovementCreate::entry(&product.id, 10, dec!(3000)))
///     .await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct InventorySystem {
    /// Client for the Product actor (inventory record store)
    pub product_client: ProductClient,

    /// Client for the StockMovement actor (ledger store)
    pub movement_client: MovementClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl InventorySystem {
    /// Creates and initializes a new `InventorySystem` with all actors running.
    ///
    /// The product actor has no dependencies (`Context = ()`); the movement
    /// actor receives a `ProductClient` as context so its `on_create` hook can
    /// apply quantity deltas before a movement is inserted.
    pub fn new() -> Self {
        // 1. Create actors
        let (product_actor, product_client) = crate::product_actor::new();
        let (movement_actor, movement_client) =
            crate::movement_actor::new(product_client.clone());

        // 2. Start actors with injected context
        let product_handle = tokio::spawn(product_actor.run(()));
        let movement_handle = tokio::spawn(movement_actor.run(product_client.clone()));

        Self {
            product_client,
            movement_client,
            handles: vec![product_handle, movement_handle],
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes their channels; each actor drains its
    /// mailbox and exits. The movement actor holds a `ProductClient` as
    /// context, so the product actor only sees its channel close once the
    /// movement actor has exited — shutdown therefore drains ledger work
    /// before the record store goes away.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Close all channels by dropping clients.
        drop(self.movement_client);
        drop(self.product_client);

        // Wait for all actor tasks to complete.
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for InventorySystem {
    fn default() -> Self {
        Self::new()
    }
}
