//! # Roster Core
//!
//! Core traits and types for the Roster client architecture.
//!
//! This crate provides the fundamental abstractions shared by the transport
//! layer and the reactive state containers that consume it.
//!
//! ## Core Concepts
//!
//! - **State**: Observable data for one screen-sized feature
//! - **Action**: All possible inputs to a reducer (triggers and outcomes)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//! - **Logger**: Observational diagnostics capability, never affects control flow
//!
//! ## Example
//!
//! ```ignore
//! use roster_core::{effect::Effect, reducer::Reducer};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> Vec<Effect<CounterAction>> {
//!         let CounterAction::Increment = action;
//!         state.count += 1;
//!         vec![Effect::None]
//!     }
//! }
//! ```

/// Reducer module - The core trait for feature logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all state-transition logic and are deterministic and testable.
/// All fields of a state value are updated inside a single `reduce` call, so
/// observers never see a half-applied transition.
pub mod reducer {
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for feature logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The observable state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for UserListReducer {
    ///     type State = UserListState;
    ///     type Action = UserListAction;
    ///     type Environment = UserListEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut UserListState,
    ///         action: UserListAction,
    ///         env: &UserListEnvironment,
    ///     ) -> Vec<Effect<UserListAction>> {
    ///         match action {
    ///             UserListAction::Fetch => {
    ///                 state.is_loading = true;
    ///                 vec![/* fetch effect */]
    ///             }
    ///             _ => vec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action against the current state
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// A vector of effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Vec<Effect<Self::Action>>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution): a reducer returns them, the store
/// executes them and feeds any produced action back through the reducer.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into
        /// the reducer. The store discards the result if the owning
        /// container was torn down before the future completed.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation into an effect
        ///
        /// # Example
        ///
        /// ```ignore
        /// Effect::future(async move {
        ///     let users = repository.list().await;
        ///     Some(UserListAction::from_outcome(users))
        /// })
        /// ```
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Whether this effect performs any work
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Logger module - observational diagnostics capability
///
/// All external diagnostics flow through the [`logger::Logger`] trait so
/// components never bind to a concrete sink. Logging is observational only:
/// implementations must be infallible and must never influence control flow.
pub mod logger {
    /// Severity of a diagnostic line
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum LogLevel {
        /// Verbose diagnostics for development
        Debug,
        /// Normal operational messages
        Info,
        /// Unexpected but recoverable conditions
        Warning,
        /// Failures surfaced to the caller
        Error,
    }

    impl std::fmt::Display for LogLevel {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Debug => write!(f, "debug"),
                Self::Info => write!(f, "info"),
                Self::Warning => write!(f, "warning"),
                Self::Error => write!(f, "error"),
            }
        }
    }

    /// Subsystem a diagnostic line originates from
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LogCategory {
        /// Transport and request/response handling
        Network,
        /// Presentation-layer consumers
        Ui,
        /// Decoding and domain data handling
        Data,
        /// Everything else
        General,
    }

    impl std::fmt::Display for LogCategory {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Network => write!(f, "network"),
                Self::Ui => write!(f, "ui"),
                Self::Data => write!(f, "data"),
                Self::General => write!(f, "general"),
            }
        }
    }

    /// Logger trait - abstracts the diagnostic sink for testability
    ///
    /// Implementations must never fail the caller. The transport client and
    /// the store runtime emit through this trait; tests can substitute a
    /// recording implementation to assert on emitted lines.
    pub trait Logger: Send + Sync {
        /// Record one diagnostic line
        fn log(&self, level: LogLevel, category: LogCategory, message: &str);
    }

    /// Logger backed by the `tracing` ecosystem
    ///
    /// Forwards each line as a `tracing` event at the matching level, with
    /// the category attached as a structured field.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct TracingLogger;

    impl Logger for TracingLogger {
        fn log(&self, level: LogLevel, category: LogCategory, message: &str) {
            match level {
                LogLevel::Debug => tracing::debug!(category = %category, "{message}"),
                LogLevel::Info => tracing::info!(category = %category, "{message}"),
                LogLevel::Warning => tracing::warn!(category = %category, "{message}"),
                LogLevel::Error => tracing::error!(category = %category, "{message}"),
            }
        }
    }

    /// Logger that discards every line
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NoopLogger;

    impl Logger for NoopLogger {
        fn log(&self, _level: LogLevel, _category: LogCategory, _message: &str) {}
    }
}
