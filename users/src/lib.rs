//! # Roster Users
//!
//! User directory domain for the Roster client architecture.
//!
//! This crate binds the typed transport to the `User` entity:
//!
//! - [`User`] / [`UserDraft`]: the entity and its wire format
//! - [`UserRepository`]: directory operations over endpoint descriptors
//! - Use cases: one-operation wrappers for narrow interfaces
//! - View-models: list and detail reducers run by the store
//!
//! ## Example
//!
//! ```no_run
//! use roster_runtime::Store;
//! use roster_transport::{ApiEnvironment, ClientConfig, HttpClient};
//! use roster_users::{
//!     UserListAction, UserListEnvironment, UserListReducer, UserListState, UserRepository,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), roster_runtime::StoreError> {
//! let client = HttpClient::new(ClientConfig::new(ApiEnvironment::Production));
//! let repository = Arc::new(UserRepository::new(client));
//!
//! let store = Store::new(
//!     UserListState::default(),
//!     UserListReducer,
//!     UserListEnvironment::new(repository),
//! );
//!
//! let mut snapshots = store.subscribe();
//! store.send(UserListAction::Fetch).await?;
//! # Ok(())
//! # }
//! ```

pub mod detail;
pub mod list;
pub mod repository;
pub mod usecase;
pub mod user;

// Re-export main types for convenience
pub use detail::{
    UserDetailAction, UserDetailEnvironment, UserDetailReducer, UserDetailState,
};
pub use list::{UserListAction, UserListEnvironment, UserListReducer, UserListState};
pub use repository::UserRepository;
pub use usecase::{CreateUser, DeleteUser, GetUser, ListUsers, SearchUsers, UpdateUser};
pub use user::{User, UserDraft};
