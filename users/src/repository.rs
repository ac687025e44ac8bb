//! User repository
//!
//! Binds directory operations to endpoint descriptors against the
//! configured base address. Each operation is a direct transport
//! invocation; failures pass through unchanged.

use crate::user::{User, UserDraft};
use roster_transport::{ApiError, Endpoint, HttpClient};

/// Typed facade over the user endpoints
///
/// The base address comes from the client's threaded-in configuration and
/// is read when each descriptor is built, so swapping the environment
/// (mock vs. real) is a construction-time decision of the caller.
#[derive(Debug, Clone)]
pub struct UserRepository {
    client: HttpClient,
}

impl UserRepository {
    /// Create a repository over a transport client
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Fetch all users
    ///
    /// # Errors
    ///
    /// Passes the transport's [`ApiError`] through unchanged.
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let endpoint = Endpoint::get(self.client.config().base_url(), "users");
        self.client.execute(&endpoint).await
    }

    /// Fetch one user by id
    ///
    /// # Errors
    ///
    /// Passes the transport's [`ApiError`] through unchanged.
    pub async fn get(&self, id: u64) -> Result<User, ApiError> {
        let endpoint = Endpoint::get(self.client.config().base_url(), format!("users/{id}"));
        self.client.execute(&endpoint).await
    }

    /// Search users by a free-text query
    ///
    /// # Errors
    ///
    /// Passes the transport's [`ApiError`] through unchanged.
    pub async fn search(&self, query: &str) -> Result<Vec<User>, ApiError> {
        let endpoint =
            Endpoint::get(self.client.config().base_url(), "users").with_query("q", query);
        self.client.execute(&endpoint).await
    }

    /// Create a user from a draft
    ///
    /// # Errors
    ///
    /// Passes the transport's [`ApiError`] through unchanged, including
    /// [`ApiError::Encoding`] when the draft cannot be serialized.
    pub async fn create(&self, draft: &UserDraft) -> Result<User, ApiError> {
        let endpoint = Endpoint::post(self.client.config().base_url(), "users").json(draft)?;
        self.client.execute(&endpoint).await
    }

    /// Replace a user by id
    ///
    /// # Errors
    ///
    /// Passes the transport's [`ApiError`] through unchanged, including
    /// [`ApiError::Encoding`] when the draft cannot be serialized.
    pub async fn update(&self, id: u64, draft: &UserDraft) -> Result<User, ApiError> {
        let endpoint = Endpoint::put(self.client.config().base_url(), format!("users/{id}"))
            .json(draft)?;
        self.client.execute(&endpoint).await
    }

    /// Delete a user by id
    ///
    /// An empty response body maps to a unit result.
    ///
    /// # Errors
    ///
    /// Passes the transport's [`ApiError`] through unchanged.
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let endpoint = Endpoint::delete(self.client.config().base_url(), format!("users/{id}"));
        self.client.execute_unit(&endpoint).await
    }
}
