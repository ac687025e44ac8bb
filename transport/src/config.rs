//! Client configuration
//!
//! Configuration is an explicit value threaded into the client and the
//! repositories built on it at construction time. Components never reach
//! into ambient process state; the base address is read from the config at
//! descriptor-build time on every call.

use crate::retry::RetryPolicy;
use std::time::Duration;

/// Named base addresses the client can target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEnvironment {
    /// Local development server
    Development,
    /// Shared staging deployment
    Staging,
    /// Production deployment
    Production,
    /// Mock server at the given address (tests bind this to an ephemeral
    /// local server)
    Mock(String),
}

impl ApiEnvironment {
    /// The base address for this environment
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self {
            Self::Development => "http://localhost:3000",
            Self::Staging => "https://staging.api.roster.example",
            Self::Production => "https://api.roster.example",
            Self::Mock(address) => address,
        }
    }
}

/// Configuration for a transport client
///
/// # Example
///
/// ```
/// use roster_transport::config::{ApiEnvironment, ClientConfig};
/// use std::time::Duration;
///
/// let config = ClientConfig::new(ApiEnvironment::Production)
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.base_url(), "https://api.roster.example");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Target environment
    pub environment: ApiEnvironment,

    /// Default request timeout, applied when a descriptor carries none
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Retry policy for transient failures
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Create a configuration for the given environment
    #[must_use]
    pub const fn new(environment: ApiEnvironment) -> Self {
        Self {
            environment,
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::new(),
        }
    }

    /// Set the default request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The base address requests resolve against
    ///
    /// Read at descriptor-build time on every call, never cached per
    /// descriptor.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.environment.base_url()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ApiEnvironment::Development)
    }
}
