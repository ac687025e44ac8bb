//! One-operation use cases
//!
//! Each use case wraps exactly one repository method so consumers can
//! depend on the narrowest possible interface. They add zero logic and
//! pass failures through unchanged.

use crate::repository::UserRepository;
use crate::user::{User, UserDraft};
use roster_transport::ApiError;
use std::sync::Arc;

/// Fetch all users
#[derive(Debug, Clone)]
pub struct ListUsers {
    repository: Arc<UserRepository>,
}

impl ListUsers {
    /// Wrap a repository
    #[must_use]
    pub const fn new(repository: Arc<UserRepository>) -> Self {
        Self { repository }
    }

    /// Run the operation
    ///
    /// # Errors
    ///
    /// Passes the repository's [`ApiError`] through unchanged.
    pub async fn run(&self) -> Result<Vec<User>, ApiError> {
        self.repository.list().await
    }
}

/// Fetch one user by id
#[derive(Debug, Clone)]
pub struct GetUser {
    repository: Arc<UserRepository>,
}

impl GetUser {
    /// Wrap a repository
    #[must_use]
    pub const fn new(repository: Arc<UserRepository>) -> Self {
        Self { repository }
    }

    /// Run the operation
    ///
    /// # Errors
    ///
    /// Passes the repository's [`ApiError`] through unchanged.
    pub async fn run(&self, id: u64) -> Result<User, ApiError> {
        self.repository.get(id).await
    }
}

/// Search users by a free-text query
#[derive(Debug, Clone)]
pub struct SearchUsers {
    repository: Arc<UserRepository>,
}

impl SearchUsers {
    /// Wrap a repository
    #[must_use]
    pub const fn new(repository: Arc<UserRepository>) -> Self {
        Self { repository }
    }

    /// Run the operation
    ///
    /// # Errors
    ///
    /// Passes the repository's [`ApiError`] through unchanged.
    pub async fn run(&self, query: &str) -> Result<Vec<User>, ApiError> {
        self.repository.search(query).await
    }
}

/// Create a user from a draft
#[derive(Debug, Clone)]
pub struct CreateUser {
    repository: Arc<UserRepository>,
}

impl CreateUser {
    /// Wrap a repository
    #[must_use]
    pub const fn new(repository: Arc<UserRepository>) -> Self {
        Self { repository }
    }

    /// Run the operation
    ///
    /// # Errors
    ///
    /// Passes the repository's [`ApiError`] through unchanged.
    pub async fn run(&self, draft: &UserDraft) -> Result<User, ApiError> {
        self.repository.create(draft).await
    }
}

/// Replace a user by id
#[derive(Debug, Clone)]
pub struct UpdateUser {
    repository: Arc<UserRepository>,
}

impl UpdateUser {
    /// Wrap a repository
    #[must_use]
    pub const fn new(repository: Arc<UserRepository>) -> Self {
        Self { repository }
    }

    /// Run the operation
    ///
    /// # Errors
    ///
    /// Passes the repository's [`ApiError`] through unchanged.
    pub async fn run(&self, id: u64, draft: &UserDraft) -> Result<User, ApiError> {
        self.repository.update(id, draft).await
    }
}

/// Delete a user by id
#[derive(Debug, Clone)]
pub struct DeleteUser {
    repository: Arc<UserRepository>,
}

impl DeleteUser {
    /// Wrap a repository
    #[must_use]
    pub const fn new(repository: Arc<UserRepository>) -> Self {
        Self { repository }
    }

    /// Run the operation
    ///
    /// # Errors
    ///
    /// Passes the repository's [`ApiError`] through unchanged.
    pub async fn run(&self, id: u64) -> Result<(), ApiError> {
        self.repository.delete(id).await
    }
}
