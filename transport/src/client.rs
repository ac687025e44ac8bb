//! Typed HTTP transport client
//!
//! Executes [`Endpoint`] descriptors: builds the request, applies the
//! bounded retry policy, validates status codes, classifies every failure
//! into [`ApiError`], and decodes JSON bodies into typed results.
//!
//! Variant operations share the classification and retry rules and differ
//! only in transport shape: [`HttpClient::upload`] posts a raw byte body,
//! [`HttpClient::download`] streams to a destination path with an atomic
//! replace, and [`HttpClient::execute_with_progress`] wraps `execute` in a
//! two-point progress stream.

use crate::config::ClientConfig;
use crate::endpoint::{ContentType, Endpoint, Method};
use crate::error::ApiError;
use crate::retry::retry_with_policy;
use async_stream::stream;
use futures::StreamExt;
use futures::stream::Stream;
use roster_core::logger::{LogCategory, LogLevel, Logger, TracingLogger};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

/// Progress report emitted by [`HttpClient::execute_with_progress`]
///
/// Exactly two reports are emitted per request: `fraction: 0.0` with no
/// outcome immediately on dispatch, and `fraction: 1.0` carrying the
/// terminal outcome. No intermediate fractions are computed from transfer
/// bytes.
#[derive(Debug)]
pub struct Progress<T> {
    /// Completed fraction of the operation (0.0 or 1.0)
    pub fraction: f64,
    /// Terminal outcome; `None` until the operation settles
    pub outcome: Option<Result<T, ApiError>>,
}

impl<T> Progress<T> {
    /// Whether this is the terminal report
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.outcome.is_some()
    }
}

/// HTTP transport client
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// let client = HttpClient::new(ClientConfig::new(ApiEnvironment::Production));
/// let users: Vec<User> = client.execute(&endpoint).await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
    logger: Arc<dyn Logger>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a client with the given configuration
    ///
    /// Diagnostics go to the `tracing`-backed logger; substitute a custom
    /// sink with [`HttpClient::with_logger`].
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            inner: reqwest::Client::new(),
            config,
            logger: Arc::new(TracingLogger),
        }
    }

    /// Replace the diagnostic logger
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// The configuration this client was constructed with
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a descriptor and decode the response body
    ///
    /// 1. Build the request; a build failure surfaces immediately without
    ///    any network attempt.
    /// 2. Send, classifying transport-level failures.
    /// 3. Validate the status code.
    /// 4. Decode the body; decode failures are never retried.
    ///
    /// Steps 2–3 are retried under the configured [`RetryPolicy`] for
    /// retryable classifications.
    ///
    /// [`RetryPolicy`]: crate::retry::RetryPolicy
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for the failure.
    pub async fn execute<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        let bytes = self.fetch_bytes(endpoint).await?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(err) => {
                let decoding = ApiError::Decoding(err.to_string());
                self.logger.log(
                    LogLevel::Error,
                    LogCategory::Data,
                    &format!("response decoding failed: {err}"),
                );
                Err(decoding)
            },
        }
    }

    /// Execute a descriptor whose success carries no payload
    ///
    /// An empty or whitespace-only body maps to a unit result; any other
    /// body must still be valid JSON.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for the failure.
    pub async fn execute_unit(&self, endpoint: &Endpoint) -> Result<(), ApiError> {
        let bytes = self.fetch_bytes(endpoint).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        serde_json::from_slice::<serde::de::IgnoredAny>(&bytes)
            .map_err(|e| ApiError::Decoding(e.to_string()))?;
        Ok(())
    }

    /// Upload a raw byte body
    ///
    /// Forces the method to POST and sets the explicit content type; the
    /// classification and retry rules are identical to [`execute`].
    ///
    /// [`execute`]: HttpClient::execute
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for the failure.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Vec<u8>,
        content_type: ContentType,
    ) -> Result<T, ApiError> {
        let endpoint = endpoint
            .with_method(Method::Post)
            .with_content_type(content_type)
            .with_body(body);
        self.execute(&endpoint).await
    }

    /// Download the response body to a destination path
    ///
    /// Streams to `<dest>.part` and atomically renames over `dest` on
    /// success. On any failure the partial file is removed and any
    /// pre-existing content at `dest` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`]; filesystem failures while
    /// persisting surface as [`ApiError::Unknown`].
    pub async fn download(&self, endpoint: &Endpoint, dest: &Path) -> Result<(), ApiError> {
        let url = endpoint.resolved_url()?;

        let result = retry_with_policy(
            &self.config.retry,
            || self.attempt_download(endpoint, dest),
            ApiError::is_retryable,
        )
        .await;

        self.log_terminal("download", &url, &result);
        result
    }

    /// Execute a descriptor, reporting two-point progress
    ///
    /// The stream yields `(fraction: 0.0, outcome: None)` immediately on
    /// dispatch and a terminal `(fraction: 1.0, outcome: Some(..))` when
    /// the operation settles; classification and retry rules match
    /// [`execute`].
    ///
    /// [`execute`]: HttpClient::execute
    pub fn execute_with_progress<T>(
        &self,
        endpoint: Endpoint,
    ) -> Pin<Box<dyn Stream<Item = Progress<T>> + Send>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        Box::pin(stream! {
            yield Progress { fraction: 0.0, outcome: None };
            let outcome = client.execute::<T>(&endpoint).await;
            yield Progress { fraction: 1.0, outcome: Some(outcome) };
        })
    }

    /// Fetch the raw response bytes for a descriptor
    ///
    /// Build failures surface before any network attempt; send and status
    /// validation run under the retry policy.
    async fn fetch_bytes(&self, endpoint: &Endpoint) -> Result<Vec<u8>, ApiError> {
        let url = endpoint.resolved_url()?;

        let result = retry_with_policy(
            &self.config.retry,
            || self.attempt(endpoint),
            ApiError::is_retryable,
        )
        .await;

        self.log_terminal(&endpoint.method.to_string(), &url, &result);
        result
    }

    /// One transport attempt: send, classify, validate, read
    async fn attempt(&self, endpoint: &Endpoint) -> Result<Vec<u8>, ApiError> {
        let response = self.send(endpoint).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_body_error(&e))?;
        Ok(bytes.to_vec())
    }

    /// One download attempt: send, classify, validate, stream to disk
    async fn attempt_download(&self, endpoint: &Endpoint, dest: &Path) -> Result<(), ApiError> {
        let response = self.send(endpoint).await?;

        let part = part_path(dest);
        match stream_to_file(response, &part).await {
            Ok(()) => tokio::fs::rename(&part, dest).await.map_err(|e| {
                // Rename failed; don't leave the partial file behind.
                let err = ApiError::Unknown(e.to_string());
                cleanup_part(&part);
                err
            }),
            Err(err) => {
                cleanup_part(&part);
                Err(err)
            },
        }
    }

    /// Send one request and validate its status code
    ///
    /// Returns the response ready for body consumption; every failure path
    /// is classified.
    async fn send(&self, endpoint: &Endpoint) -> Result<reqwest::Response, ApiError> {
        let request = endpoint.build(self.config.timeout)?;

        self.logger.log(
            LogLevel::Debug,
            LogCategory::Network,
            &format!("{} {}", endpoint.method, request.url()),
        );
        metrics::counter!("transport.attempts").increment(1);

        let response = self
            .inner
            .execute(request)
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let code = status.as_u16();
        // Only the catch-all classification carries the body.
        let body = if code == 401 || status.is_server_error() {
            None
        } else {
            response.text().await.ok().filter(|b| !b.is_empty())
        };
        Err(ApiError::from_status(code, body))
    }

    /// Emit the per-operation terminal diagnostic
    fn log_terminal<T>(&self, operation: &str, url: &reqwest::Url, result: &Result<T, ApiError>) {
        match result {
            Ok(_) => {
                metrics::counter!("transport.completed").increment(1);
                self.logger.log(
                    LogLevel::Debug,
                    LogCategory::Network,
                    &format!("{operation} {url} completed"),
                );
            },
            Err(err) => {
                metrics::counter!("transport.failed").increment(1);
                self.logger.log(
                    LogLevel::Error,
                    LogCategory::Network,
                    &format!("{operation} {url} failed: {err}"),
                );
            },
        }
    }
}

/// Classify a failure while reading a validated response body
///
/// A deadline elapsing mid-read is still a timeout; anything else means the
/// response could not be consumed.
fn classify_body_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::InvalidResponse
    }
}

/// Partial-download path alongside the destination
fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Best-effort removal of a partial download
fn cleanup_part(part: &Path) {
    if std::fs::remove_file(part).is_err() {
        tracing::debug!(part = %part.display(), "partial download already removed");
    }
}

/// Stream a response body into a file
async fn stream_to_file(response: reqwest::Response, path: &Path) -> Result<(), ApiError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| ApiError::Unknown(e.to_string()))?;

    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| classify_body_error(&e))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| ApiError::Unknown(e.to_string()))?;
    }

    file.sync_all()
        .await
        .map_err(|e| ApiError::Unknown(e.to_string()))?;
    Ok(())
}
