//! User detail view-model
//!
//! The detail screen's reactive state container over a single user. The
//! target id is part of the environment, so the container's triggers stay
//! parameterless and idempotent.

use crate::repository::UserRepository;
use crate::user::User;
use roster_core::{effect::Effect, reducer::Reducer};
use roster_transport::ApiError;
use std::sync::Arc;

/// Observable state of the user detail screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDetailState {
    /// The displayed user, once loaded
    pub user: Option<User>,
    /// Whether a fetch is in flight
    pub is_loading: bool,
    /// The most recent settlement error, until dismissed
    pub error: Option<ApiError>,
}

impl UserDetailState {
    /// Whether an error is recorded for display
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Inputs to the user detail reducer
#[derive(Debug, Clone)]
pub enum UserDetailAction {
    /// Start a fetch, clearing any prior error
    Fetch,
    /// Start a fetch, retaining the prior error until settlement
    Refresh,
    /// A fetch settled successfully
    Loaded(User),
    /// A fetch settled with a failure
    Failed(ApiError),
    /// Clear the displayed error, leaving the payload as is
    DismissError,
}

/// Dependencies of the user detail reducer
#[derive(Debug, Clone)]
pub struct UserDetailEnvironment {
    /// Source of user data
    pub repository: Arc<UserRepository>,
    /// Identity of the displayed user
    pub user_id: u64,
}

impl UserDetailEnvironment {
    /// Create an environment over a repository and target user
    #[must_use]
    pub const fn new(repository: Arc<UserRepository>, user_id: u64) -> Self {
        Self {
            repository,
            user_id,
        }
    }
}

/// Reducer for the user detail screen
#[derive(Debug, Clone, Copy, Default)]
pub struct UserDetailReducer;

impl Reducer for UserDetailReducer {
    type State = UserDetailState;
    type Action = UserDetailAction;
    type Environment = UserDetailEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Vec<Effect<Self::Action>> {
        match action {
            UserDetailAction::Fetch => {
                state.is_loading = true;
                state.error = None;
                vec![fetch_effect(env)]
            },
            UserDetailAction::Refresh => {
                state.is_loading = true;
                vec![fetch_effect(env)]
            },
            UserDetailAction::Loaded(user) => {
                state.is_loading = false;
                state.error = None;
                state.user = Some(user);
                vec![Effect::None]
            },
            UserDetailAction::Failed(error) => {
                // Payload keeps its previous value on failure.
                state.is_loading = false;
                state.error = Some(error);
                vec![Effect::None]
            },
            UserDetailAction::DismissError => {
                state.error = None;
                vec![Effect::None]
            },
        }
    }
}

/// Dispatch a detail fetch and feed its settlement back
fn fetch_effect(env: &UserDetailEnvironment) -> Effect<UserDetailAction> {
    let repository = Arc::clone(&env.repository);
    let user_id = env.user_id;
    Effect::future(async move {
        match repository.get(user_id).await {
            Ok(user) => Some(UserDetailAction::Loaded(user)),
            Err(err) => Some(UserDetailAction::Failed(err)),
        }
    })
}
