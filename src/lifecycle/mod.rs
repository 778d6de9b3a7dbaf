//! Orchestration layer: actor startup, wiring and shutdown.

pub mod inventory_system;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use inventory_system::InventorySystem;
