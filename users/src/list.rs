//! User list view-model
//!
//! The list screen's reactive state container: a reducer over
//! loading/error/payload fields, run by the store. Overlapping fetches are
//! not deduplicated; their effects race and the last completed settlement
//! wins.

use crate::repository::UserRepository;
use crate::user::User;
use roster_core::{effect::Effect, reducer::Reducer};
use roster_transport::ApiError;
use std::sync::Arc;

/// Observable state of the user list screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserListState {
    /// Users currently displayed
    pub users: Vec<User>,
    /// Whether a fetch is in flight
    pub is_loading: bool,
    /// The most recent settlement error, until dismissed
    pub error: Option<ApiError>,
}

impl UserListState {
    /// Whether an error is recorded for display
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Inputs to the user list reducer
#[derive(Debug, Clone)]
pub enum UserListAction {
    /// Start a fetch, clearing any prior error
    Fetch,
    /// Start a fetch, retaining the prior error until settlement
    Refresh,
    /// A fetch settled successfully
    Loaded(Vec<User>),
    /// A fetch settled with a failure
    Failed(ApiError),
    /// Clear the displayed error, leaving the payload as is
    DismissError,
}

/// Dependencies of the user list reducer
#[derive(Debug, Clone)]
pub struct UserListEnvironment {
    /// Source of user data
    pub repository: Arc<UserRepository>,
}

impl UserListEnvironment {
    /// Create an environment over a repository
    #[must_use]
    pub const fn new(repository: Arc<UserRepository>) -> Self {
        Self { repository }
    }
}

/// Reducer for the user list screen
#[derive(Debug, Clone, Copy, Default)]
pub struct UserListReducer;

impl Reducer for UserListReducer {
    type State = UserListState;
    type Action = UserListAction;
    type Environment = UserListEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Vec<Effect<Self::Action>> {
        match action {
            UserListAction::Fetch => {
                state.is_loading = true;
                state.error = None;
                vec![fetch_effect(env)]
            },
            UserListAction::Refresh => {
                state.is_loading = true;
                vec![fetch_effect(env)]
            },
            UserListAction::Loaded(users) => {
                state.is_loading = false;
                state.error = None;
                state.users = users;
                vec![Effect::None]
            },
            UserListAction::Failed(error) => {
                // Payload keeps its previous value on failure.
                state.is_loading = false;
                state.error = Some(error);
                vec![Effect::None]
            },
            UserListAction::DismissError => {
                state.error = None;
                vec![Effect::None]
            },
        }
    }
}

/// Dispatch a list fetch and feed its settlement back
fn fetch_effect(env: &UserListEnvironment) -> Effect<UserListAction> {
    let repository = Arc::clone(&env.repository);
    Effect::future(async move {
        match repository.list().await {
            Ok(users) => Some(UserListAction::Loaded(users)),
            Err(err) => Some(UserListAction::Failed(err)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_transport::{ApiEnvironment, ClientConfig, HttpClient};

    fn env() -> UserListEnvironment {
        // No request is executed in these tests; the address is never dialed.
        let config = ClientConfig::new(ApiEnvironment::Mock("http://127.0.0.1:0".to_string()));
        UserListEnvironment::new(Arc::new(UserRepository::new(HttpClient::new(config))))
    }

    fn ann() -> User {
        User {
            id: 1,
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn fetch_enters_loading_and_clears_the_error() {
        let mut state = UserListState {
            error: Some(ApiError::Timeout),
            ..UserListState::default()
        };

        let effects = UserListReducer.reduce(&mut state, UserListAction::Fetch, &env());

        assert!(state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn refresh_enters_loading_and_retains_the_error() {
        let mut state = UserListState {
            error: Some(ApiError::Timeout),
            ..UserListState::default()
        };

        UserListReducer.reduce(&mut state, UserListAction::Refresh, &env());

        assert!(state.is_loading);
        assert_eq!(state.error, Some(ApiError::Timeout));
    }

    #[test]
    fn loaded_settles_with_the_payload() {
        let mut state = UserListState {
            is_loading: true,
            ..UserListState::default()
        };

        UserListReducer.reduce(&mut state, UserListAction::Loaded(vec![ann()]), &env());

        assert!(!state.is_loading);
        assert!(!state.has_error());
        assert_eq!(state.users, vec![ann()]);
    }

    #[test]
    fn failed_settles_without_clearing_the_payload() {
        let mut state = UserListState {
            users: vec![ann()],
            is_loading: true,
            error: None,
        };

        UserListReducer.reduce(
            &mut state,
            UserListAction::Failed(ApiError::ServerError),
            &env(),
        );

        assert!(!state.is_loading);
        assert_eq!(state.error, Some(ApiError::ServerError));
        assert_eq!(state.users, vec![ann()]);
    }

    #[test]
    fn dismiss_clears_only_the_error() {
        let mut state = UserListState {
            users: vec![ann()],
            is_loading: false,
            error: Some(ApiError::ServerError),
        };

        UserListReducer.reduce(&mut state, UserListAction::DismissError, &env());

        assert_eq!(state.error, None);
        assert_eq!(state.users, vec![ann()]);
    }
}
