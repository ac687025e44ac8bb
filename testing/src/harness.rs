//! Deterministic reducer driver
//!
//! The production store runs effects on spawned tasks, which makes
//! completion order a race. The harness instead settles effects inline:
//! each produced future is awaited to completion and its feedback action is
//! applied before the next effect runs, so tests observe one deterministic
//! transition sequence.

use roster_core::{effect::Effect, reducer::Reducer};

/// Drives a reducer without a store
///
/// # Example
///
/// ```ignore
/// let mut harness = ReducerHarness::new(UserListReducer, environment, UserListState::default());
/// harness.send_and_settle(UserListAction::Fetch).await;
/// assert!(!harness.state().is_loading);
/// ```
pub struct ReducerHarness<R>
where
    R: Reducer,
{
    reducer: R,
    environment: R::Environment,
    state: R::State,
}

impl<R> ReducerHarness<R>
where
    R: Reducer,
{
    /// Create a harness over a reducer, its environment, and initial state
    pub const fn new(reducer: R, environment: R::Environment, initial_state: R::State) -> Self {
        Self {
            reducer,
            environment,
            state: initial_state,
        }
    }

    /// The current state
    pub const fn state(&self) -> &R::State {
        &self.state
    }

    /// Apply one action synchronously, returning the produced effects
    ///
    /// Effects are handed back unexecuted so tests can assert on their
    /// presence without running them.
    pub fn send(&mut self, action: R::Action) -> Vec<Effect<R::Action>> {
        self.reducer
            .reduce(&mut self.state, action, &self.environment)
    }

    /// Apply one action and settle all resulting effects inline
    ///
    /// Every effect future is awaited in order; feedback actions are fed
    /// back through the reducer, and their own effects settle the same
    /// way until no work remains.
    pub async fn send_and_settle(&mut self, action: R::Action) {
        let mut pending = self.send(action);

        while !pending.is_empty() {
            let mut produced = Vec::new();
            for effect in pending {
                let Effect::Future(future) = effect else {
                    continue;
                };
                if let Some(feedback) = future.await {
                    produced.extend(self.send(feedback));
                }
            }
            pending = produced;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default)]
    struct EchoState {
        log: Vec<i64>,
    }

    #[derive(Clone, Debug)]
    enum EchoAction {
        Start(i64),
        Done(i64),
    }

    struct EchoReducer;

    impl Reducer for EchoReducer {
        type State = EchoState;
        type Action = EchoAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut EchoState,
            action: EchoAction,
            _env: &(),
        ) -> Vec<Effect<EchoAction>> {
            match action {
                EchoAction::Start(n) => {
                    state.log.push(n);
                    vec![Effect::future(async move { Some(EchoAction::Done(n * 10)) })]
                },
                EchoAction::Done(n) => {
                    state.log.push(n);
                    vec![Effect::None]
                },
            }
        }
    }

    #[test]
    fn send_applies_without_running_effects() {
        let mut harness = ReducerHarness::new(EchoReducer, (), EchoState::default());
        let effects = harness.send(EchoAction::Start(1));

        assert_eq!(harness.state().log, vec![1]);
        assert_eq!(effects.len(), 1);
    }

    #[tokio::test]
    async fn send_and_settle_feeds_actions_back_deterministically() {
        let mut harness = ReducerHarness::new(EchoReducer, (), EchoState::default());
        harness.send_and_settle(EchoAction::Start(1)).await;

        assert_eq!(harness.state().log, vec![1, 10]);
    }
}
