//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate,
//! providing hierarchical spans that show the complete request flow through
//! the system.
//!
//! Log levels are configured via `RUST_LOG`:
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads with debug logs
//! RUST_LOG=debug cargo run
//!
//! # Filter to specific modules
//! RUST_LOG=stockroom::framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a movement creation traces as:
//!
//! ```text
//! INFO Created product_id="product_1" size=1
//! INFO Action ok product_id="product_1"
//! INFO Created movement_id=1 size=1
//! ```
//!
//! The `Action ok` line is the quantity mutation running inside the product
//! actor; at `debug` level the full `ApplyMovement` payload is shown.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "movement_posting:apply_movement")
        .init();
}
