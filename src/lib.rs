#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Stockroom
//!
//! > **An inventory ledger with FIFO cost matching, built on resource-oriented actors.**
//!
//! Stockroom tracks on-hand quantity for products, records stock movements
//! (receipts and sales) in an append-only ledger, and derives realized profit
//! per product by matching each outgoing quantity against the oldest
//! unconsumed incoming cost layers.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why ROA + Actor Model?
//!
//! The system combines two concepts:
//! - **Resource-Oriented Architecture (ROA)**: Standard CRUD operations on
//!   well-defined resources (products, movements).
//! - **Actor Model**: Isolated state with message-passing concurrency.
//!
//! The inventory record store and the ledger store are each one
//! [`framework::ResourceActor`] running in its own Tokio task. An actor
//! processes messages sequentially, so the one operation that truly needs
//! mutual exclusion — the read-modify-write of a product's on-hand quantity —
//! is serialized without any lock, and no caller ever observes a torn update.
//!
//! ### Ledger / Counter Atomicity
//!
//! A stock movement must never exist without its quantity effect, and vice
//! versa. The movement entity's `on_create` hook applies the delta through
//! the product actor *before* the ledger entry is inserted; if the product
//! rejects the delta (insufficient stock, unknown product), the create aborts
//! and neither store changes.
//!
//! ### FIFO Costing
//!
//! Profit is computed by the pure [`profit`] engine: receipts become cost
//! layers in a queue, sales consume the oldest layers first. Money is
//! `rust_decimal::Decimal` throughout — never binary floating point — so cost
//! matching cannot drift.
//!
//! ### Type-Safe Error Handling
//!
//! Each actor defines its own `thiserror` enum (e.g.
//! [`product_actor::ProductError`], [`movement_actor::MovementError`]).
//! Entity errors cross the actor channel boxed inside
//! [`framework::FrameworkError::EntityError`] and are downcast back to the
//! typed enum in the clients, so callers can pattern match on business
//! failures like `InsufficientStock`.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` that powers both stores.
//! - **Key items**: [`framework::ActorEntity`], [`framework::ResourceActor`],
//!   [`framework::mock`].
//!
//! ### 2. The Domain ([`model`], [`product_actor`], [`movement_actor`])
//! Pure data structures and their `ActorEntity` implementations.
//! - **Key items**: [`model::Product`], [`model::StockMovement`],
//!   [`product_actor::ProductAction::ApplyMovement`].
//!
//! ### 3. The Read Side ([`profit`])
//! The FIFO cost-matching engine and its report types. Pure functions over
//! ledger snapshots; takes no locks.
//!
//! ### 4. The Interface ([`clients`])
//! Domain-specific clients wrapping the generic `ResourceClient`.
//! - **Key items**: [`clients::ProductClient`], [`clients::MovementClient`]
//!   (which also hosts `compute_profit` and `dashboard_stats`).
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! Spins the actors up, wires them together and shuts them down.
//! - **Key items**: [`lifecycle::InventorySystem`],
//!   [`lifecycle::setup_tracing`].
//!
//! ## 🚀 Quick Start
//!
//! ```ignore
//! let system = InventorySystem::new();
//!
//! let product = system.product_client.create_product(params).await?;
//! system
//!     .movement_client
//!     .apply_movement(MovementCreate::entry(&product.id, 10, dec!(3000)))
//!     .await?;
//! let report = system.movement_client.compute_profit(&product.id).await?;
//! ```
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod movement_actor;
pub mod product_actor;
pub mod profit;
