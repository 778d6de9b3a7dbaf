//! # Core Actor Framework
//!
//! This module defines the generic building blocks for the actor system.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that all resource types must implement.
//! - [`ResourceActor`]: The generic actor that manages entities.
//! - [`ResourceClient`]: The generic client for communicating with actors.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, NotFound).

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use async_trait::async_trait;

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Architecture Note
/// By defining a contract (`ActorEntity`) that all our resource types (Product,
/// StockMovement) must satisfy, we can write the `ResourceActor` logic *once*
/// and reuse it everywhere.
///
/// We use "Associated Types" (type Id, type Create, etc.) to enforce type safety.
/// A `Product` entity requires a `ProductCreate` payload, and you can't
/// accidentally send it a `MovementCreate` payload. The compiler prevents this
/// class of bugs entirely.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks
/// (e.g., calling other actors). It also defines a `Context` type, which is
/// injected into every hook. This allows "Late Binding" of dependencies
/// (passing clients to `run()` instead of `new()`).
///
/// # Provided Methods (Hooks)
/// [`ActorEntity::validate_insert`], [`ActorEntity::on_create`] and
/// [`ActorEntity::on_delete`] have default implementations that do nothing.
/// Override them only when the resource needs the behavior.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity (e.g., String, Uuid, u64).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `ApplyMovement`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    /// The framework enforces a **Per-Actor Error Type** (one enum for the
    /// whole actor) rather than per-message error types. Clients deal with a
    /// single error enum, making pattern matching easy, at the cost of each
    /// operation's signature admitting the union of all failure modes.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `validate_insert` and `on_create`;
    /// field-level validation belongs here, before any state is touched.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called before a newly created entity is inserted, with every entity
    /// already in the store. Enforce store-wide constraints here (e.g. unique
    /// business keys). The actor processes one message at a time, so the check
    /// is race-free.
    fn validate_insert(&self, _existing: &[&Self]) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called immediately after the entity is created and initialized, before
    /// it is inserted. Use this hook to perform side effects (e.g., calling
    /// other actors). If the hook fails, the entity is never stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
///
/// Entity-level failures travel through [`FrameworkError::EntityError`] as a
/// boxed [`ActorEntity::Error`]; clients downcast it back to the typed error.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// This enum implements a **Resource-Oriented** design pattern where each actor
/// manages a specific type of resource (the [`ActorEntity`]). Instead of
/// defining ad-hoc messages for every operation, we standardize around a set of
/// lifecycle operations that apply to almost any persistent resource.
///
/// - **Create**: Lifecycle start. Uses [`ActorEntity::Create`] to initialize a
///   new resource; responds with the stored entity, including its assigned id.
/// - **Get (Read)**: Retrieval. Fetches the current state of the resource by ID.
/// - **List**: Retrieval. Fetches a snapshot of every resource in the store.
/// - **Update**: State mutation. Uses [`ActorEntity::Update`] to modify an
///   existing resource.
/// - **Delete**: Lifecycle end. Removes the resource.
/// - **Action**: Extensibility. Executes a custom [`ActorEntity::Action`].
///
/// # Entity Interaction
/// This type is generic over `T: ActorEntity`. It uses the associated types
/// defined in the [`ActorEntity`] trait (like `Create`, `Update`, `Action`) to
/// ensure type safety for every operation. This guarantees that you can't send
/// a "Product Create" payload to a "StockMovement" actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`)
/// and the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each `ResourceActor` processes its own messages *sequentially* in a loop.
/// This means we don't need `Mutex` or `RwLock` for the `store`! Every
/// read-modify-write of an entity happens inside a single message handling, so
/// concurrent callers are serialized and no caller ever observes a torn
/// update. Multiple actors still run in parallel with each other.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows
    /// entities to access external dependencies (like other clients) that were
    /// created *after* the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Product" instead of "stockroom::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            let conflict = {
                                let existing: Vec<&T> = self.store.values().collect();
                                item.validate_insert(&existing)
                            };
                            if let Err(e) = conflict {
                                warn!(entity_type, error = %e, "Create rejected");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            // Await the async hook; on failure the entity is
                            // never inserted, so side effects and storage
                            // commit or abort together.
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item.clone());
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self.store.values().cloned().collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        // Await the async hook
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        // Await the async hook
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        // Await the async hook
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update {
                id,
                update,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action {
                id,
                action,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: String,
        label: String,
        bins: u32,
    }

    #[derive(Debug)]
    struct ShelfCreate {
        label: String,
    }

    #[derive(Debug)]
    struct ShelfUpdate {
        label: Option<String>,
    }

    #[derive(Debug)]
    enum ShelfAction {
        AddBin,
    }

    #[derive(Debug, Clone, thiserror::Error, PartialEq)]
    enum ShelfError {
        #[error("label already in use: {0}")]
        DuplicateLabel(String),
        #[error("label must not be empty")]
        EmptyLabel,
    }

    #[async_trait]
    impl ActorEntity for Shelf {
        type Id = String;
        type Create = ShelfCreate;
        type Update = ShelfUpdate;
        type Action = ShelfAction;
        type ActionResult = u32;
        type Context = ();
        type Error = ShelfError;

        fn from_create_params(id: String, params: ShelfCreate) -> Result<Self, ShelfError> {
            if params.label.is_empty() {
                return Err(ShelfError::EmptyLabel);
            }
            Ok(Self {
                id,
                label: params.label,
                bins: 0,
            })
        }

        fn validate_insert(&self, existing: &[&Self]) -> Result<(), ShelfError> {
            if existing.iter().any(|s| s.label == self.label) {
                return Err(ShelfError::DuplicateLabel(self.label.clone()));
            }
            Ok(())
        }

        async fn on_update(&mut self, update: ShelfUpdate, _ctx: &()) -> Result<(), ShelfError> {
            if let Some(label) = update.label {
                self.label = label;
            }
            Ok(())
        }

        async fn handle_action(
            &mut self,
            action: ShelfAction,
            _ctx: &(),
        ) -> Result<u32, ShelfError> {
            match action {
                ShelfAction::AddBin => {
                    self.bins += 1;
                    Ok(self.bins)
                }
            }
        }
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        // ID Generator
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            format!("shelf_{}", id)
        };

        // Start Actor
        let (actor, client) = ResourceActor::<Shelf>::new(10, next_id);
        tokio::spawn(actor.run(()));

        // 1. Create (responds with the stored entity)
        let shelf = client
            .create(ShelfCreate { label: "A1".into() })
            .await
            .unwrap();
        assert_eq!(shelf.id, "shelf_1");
        assert_eq!(shelf.bins, 0);

        // 2. Perform Action
        let bins = client
            .perform_action(shelf.id.clone(), ShelfAction::AddBin)
            .await
            .unwrap();
        assert_eq!(bins, 1);

        // 3. Update
        let updated = client
            .update(
                shelf.id.clone(),
                ShelfUpdate {
                    label: Some("A2".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.label, "A2");
        assert_eq!(updated.bins, 1);

        // 4. List
        let all = client.list().await.unwrap();
        assert_eq!(all.len(), 1);

        // 5. Delete
        client.delete(shelf.id.clone()).await.unwrap();
        let deleted = client.get(shelf.id.clone()).await.unwrap();
        assert!(deleted.is_none());
    }

    #[tokio::test]
    async fn test_store_wide_constraint_rejects_duplicates() {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("shelf_{}", counter.fetch_add(1, Ordering::SeqCst));

        let (actor, client) = ResourceActor::<Shelf>::new(10, next_id);
        tokio::spawn(actor.run(()));

        client
            .create(ShelfCreate { label: "B1".into() })
            .await
            .unwrap();

        // Second create with the same label is rejected with the typed error.
        let err = client
            .create(ShelfCreate { label: "B1".into() })
            .await
            .unwrap_err();
        match err {
            FrameworkError::EntityError(e) => {
                let shelf_err = e.downcast::<ShelfError>().expect("typed entity error");
                assert_eq!(*shelf_err, ShelfError::DuplicateLabel("B1".into()));
            }
            other => panic!("expected EntityError, got {:?}", other),
        }

        // The store still holds exactly one shelf.
        assert_eq!(client.list().await.unwrap().len(), 1);
    }
}
