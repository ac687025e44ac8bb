//! # Roster Runtime
//!
//! Store runtime for the Roster client architecture.
//!
//! This crate provides the [`Store`]: the reactive state container that
//! coordinates reducer execution, effect handling, and state observation.
//!
//! ## Core Components
//!
//! - **Store**: Holds feature state, applies actions through the reducer,
//!   and broadcasts a snapshot after every transition
//! - **Effect Executor**: Runs effect descriptions on spawned tasks and
//!   feeds produced actions back through the reducer
//! - **Teardown**: Releases all subscriptions and invalidates in-flight
//!   effect callbacks via a generation token
//!
//! ## Example
//!
//! ```ignore
//! use roster_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Observe every subsequent transition
//! let mut snapshots = store.subscribe();
//!
//! // Trigger a fetch
//! store.send(Action::Fetch).await?;
//!
//! // Read a projection of current state
//! let loading = store.state(|s| s.is_loading).await;
//! ```

use roster_core::{effect::Effect, reducer::Reducer};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{RwLock, broadcast};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The store was torn down and no longer accepts actions
        ///
        /// Returned by `send()` after `teardown()` has been called.
        /// Effect callbacks arriving after teardown are discarded silently
        /// rather than surfacing this error.
        #[error("Store was torn down")]
        TornDown,
    }
}

pub use error::StoreError;

/// Default capacity of the snapshot broadcast channel
///
/// Presentation layers consume snapshots promptly; a lagging observer loses
/// the oldest snapshots first, never the most recent one.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

struct StoreInner<S, E, R> {
    state: RwLock<S>,
    reducer: R,
    environment: E,
    /// Snapshot broadcast sender. Taken (dropped) on teardown so every
    /// subscriber observes channel closure and no subscription outlives the
    /// container.
    snapshots: Mutex<Option<broadcast::Sender<S>>>,
    /// Bumped once per teardown. Effects capture the value at dispatch time
    /// and their feedback is discarded on mismatch, so a callback can never
    /// mutate a container that was torn down while it was in flight.
    generation: AtomicU64,
    torn_down: AtomicBool,
}

/// The reactive state container
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent access)
/// 2. Reducer (feature logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop)
/// 5. Observation (snapshot broadcast per transition)
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Concurrency
///
/// One store owns one feature's state; there is no cross-store shared
/// mutable state. Concurrent `send` calls serialize at the reducer level.
/// Overlapping effects are not deduplicated: they race to completion and
/// snapshots are applied in completion order (last completed wins).
///
/// # Teardown
///
/// `teardown()` is idempotent. It closes the snapshot channel (releasing
/// all subscriptions) and invalidates in-flight effects; the underlying
/// operations keep running to completion but their results are discarded.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    inner: Arc<StoreInner<S, E, R>>,
    _marker: std::marker::PhantomData<fn(A)>,
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + 'static,
    S: Clone + Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// # Arguments
    ///
    /// - `initial_state`: The starting state for the store
    /// - `reducer`: The reducer implementation (feature logic)
    /// - `environment`: Injected dependencies
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        let (snapshots, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);

        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(initial_state),
                reducer,
                environment,
                snapshots: Mutex::new(Some(snapshots)),
                generation: AtomicU64::new(0),
                torn_down: AtomicBool::new(false),
            }),
            _marker: std::marker::PhantomData,
        }
    }

    /// Send an action to the store
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. Broadcasts a snapshot of the transitioned state
    /// 4. Executes returned effects on spawned tasks; produced actions are
    ///    fed back through the reducer (feedback loop)
    ///
    /// `send()` returns after starting effect execution, not completion, so
    /// callers never block on network I/O.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TornDown`] if the store was torn down.
    #[tracing::instrument(skip_all, name = "store_send")]
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        if self.inner.torn_down.load(Ordering::Acquire) {
            return Err(StoreError::TornDown);
        }
        let generation = self.inner.generation.load(Ordering::Acquire);
        self.apply(action, generation).await;
        Ok(())
    }

    /// Read a projection of the current state
    ///
    /// # Example
    ///
    /// ```ignore
    /// let loading = store.state(|s| s.is_loading).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let guard = self.inner.state.read().await;
        f(&guard)
    }

    /// Subscribe to state snapshots
    ///
    /// Push-based observation: the receiver yields a snapshot for every
    /// subsequent transition until it is dropped or the store is torn down
    /// (at which point it observes channel closure).
    ///
    /// # Panics
    ///
    /// Never panics; the internal lock is only held for trivial sections.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<S> {
        #[allow(clippy::unwrap_used)] // lock can only fail if a holder panicked
        let guard = self.inner.snapshots.lock().unwrap();
        match guard.as_ref() {
            Some(sender) => sender.subscribe(),
            None => {
                // Torn down: hand out an already-closed receiver.
                let (sender, receiver) = broadcast::channel(1);
                drop(sender);
                receiver
            },
        }
    }

    /// Tear the container down
    ///
    /// Idempotent. After teardown:
    /// - `send()` returns [`StoreError::TornDown`]
    /// - every subscription observes channel closure (no leaked callbacks)
    /// - in-flight effects keep running but their feedback is discarded
    ///   (soft cancellation: transport I/O is not aborted)
    pub fn teardown(&self) {
        let already = self.inner.torn_down.swap(true, Ordering::AcqRel);
        self.inner.generation.fetch_add(1, Ordering::AcqRel);

        #[allow(clippy::unwrap_used)] // lock can only fail if a holder panicked
        let sender = self.inner.snapshots.lock().unwrap().take();
        drop(sender);

        if !already {
            tracing::debug!("store torn down");
            metrics::counter!("store.teardown").increment(1);
        }
    }

    /// Whether the store was torn down
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.inner.torn_down.load(Ordering::Acquire)
    }

    /// Apply one action and start its effects
    ///
    /// The write lock covers the reducer call only, so all observable
    /// fields transition as a unit and observers never see a partial
    /// update. Snapshots are broadcast in the order transitions are
    /// applied.
    async fn apply(&self, action: A, generation: u64) {
        let (snapshot, effects) = {
            let mut state = self.inner.state.write().await;
            let effects = self
                .inner
                .reducer
                .reduce(&mut state, action, &self.inner.environment);
            (state.clone(), effects)
        };

        metrics::counter!("store.transitions").increment(1);

        // Broadcast before starting effects so the transition that caused an
        // effect is always observed before the effect's own settlement.
        #[allow(clippy::unwrap_used)] // lock can only fail if a holder panicked
        if let Some(sender) = self.inner.snapshots.lock().unwrap().as_ref() {
            // Err means no live receivers, which is fine.
            let _ = sender.send(snapshot);
        }

        self.spawn_effects(effects, generation);
    }

    /// Spawn effect futures, tagged with the dispatch-time generation
    ///
    /// A completed effect feeds its action back only while the generation
    /// still matches and the store is alive; otherwise the result is
    /// dropped on the floor.
    fn spawn_effects(&self, effects: Vec<Effect<A>>, generation: u64) {
        for effect in effects {
            let Effect::Future(future) = effect else {
                continue;
            };

            let store = self.clone();
            tokio::spawn(async move {
                let Some(feedback) = future.await else {
                    return;
                };

                if store.inner.torn_down.load(Ordering::Acquire)
                    || store.inner.generation.load(Ordering::Acquire) != generation
                {
                    tracing::debug!("discarding effect feedback for torn down store");
                    metrics::counter!("store.effects.discarded").increment(1);
                    return;
                }

                store.apply(feedback, generation).await;
            });
        }
    }
}
