//! # Roster Transport
//!
//! Typed HTTP transport for the Roster client architecture.
//!
//! The transport turns immutable [`Endpoint`] descriptors into executed,
//! validated, decoded requests:
//!
//! - **Endpoint descriptor**: one value fully specifying one request
//! - **Request builder**: pure resolution into a transport-ready request
//! - **Client**: execution with bounded retry, status validation, and a
//!   closed typed-error taxonomy
//! - **Configuration**: named base addresses and defaults, threaded in as
//!   explicit values
//!
//! ## Example
//!
//! ```no_run
//! use roster_transport::{ApiEnvironment, ClientConfig, Endpoint, HttpClient};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Status {
//!     ok: bool,
//! }
//!
//! # async fn example() -> Result<(), roster_transport::ApiError> {
//! let client = HttpClient::new(ClientConfig::new(ApiEnvironment::Production));
//! let endpoint = Endpoint::get(client.config().base_url(), "status");
//! let status: Status = client.execute(&endpoint).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod retry;

// Re-export main types for convenience
pub use client::{HttpClient, Progress};
pub use config::{ApiEnvironment, ClientConfig};
pub use endpoint::{CachePolicy, ContentType, Endpoint, Method};
pub use error::ApiError;
pub use retry::RetryPolicy;
