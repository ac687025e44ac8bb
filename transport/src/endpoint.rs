//! Endpoint descriptors and request construction
//!
//! An [`Endpoint`] is an immutable value fully specifying one HTTP request.
//! Derivations (`with_*`) consume the value and return a new one; nothing is
//! mutated in place. [`Endpoint::build`] turns the descriptor into a
//! transport-ready `reqwest::Request` without performing any I/O.

use crate::error::ApiError;
use reqwest::Url;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, HeaderName, HeaderValue};
use serde::Serialize;
use std::time::Duration;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Idempotent read
    Get,
    /// Create / submit
    Post,
    /// Replace
    Put,
    /// Remove
    Delete,
    /// Partial update
    Patch,
    /// Headers only
    Head,
    /// Capability probe
    Options,
}

impl Method {
    /// The corresponding `reqwest` method
    #[must_use]
    pub const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
            Self::Patch => reqwest::Method::PATCH,
            Self::Head => reqwest::Method::HEAD,
            Self::Options => reqwest::Method::OPTIONS,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_reqwest().as_str())
    }
}

/// Content type of a request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    /// `application/json` (the default wire format)
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`
    FormUrlEncoded,
    /// `multipart/form-data`
    Multipart,
    /// `text/plain`
    Text,
    /// `application/xml`
    Xml,
}

impl ContentType {
    /// The header value for this content type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::Multipart => "multipart/form-data",
            Self::Text => "text/plain",
            Self::Xml => "application/xml",
        }
    }
}

/// Cache behavior requested from intermediaries
///
/// Rendered as a `Cache-Control` request header at build time; the
/// transport itself performs no caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Let the protocol decide (no header emitted)
    #[default]
    ProtocolDefault,
    /// Revalidate with the origin before using a cached copy
    NoCache,
    /// Serve from cache only, never hit the origin
    OnlyIfCached,
}

impl CachePolicy {
    /// The `Cache-Control` value to emit, if any
    #[must_use]
    pub const fn header_value(self) -> Option<&'static str> {
        match self {
            Self::ProtocolDefault => None,
            Self::NoCache => Some("no-cache"),
            Self::OnlyIfCached => Some("only-if-cached"),
        }
    }
}

/// Immutable value describing one HTTP request
///
/// # Example
///
/// ```ignore
/// let endpoint = Endpoint::get("https://api.example.com", "users")
///     .with_query("q", "ann")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Base address, e.g. `https://api.example.com`
    pub base_url: String,
    /// Path below the base; a leading slash is optional
    pub path: String,
    /// HTTP method
    pub method: Method,
    /// Extra headers; these override the defaults on name collision
    pub headers: Vec<(String, String)>,
    /// Ordered query parameters, percent-encoded at build time
    pub query: Vec<(String, String)>,
    /// Raw request body
    pub body: Option<Vec<u8>>,
    /// Body content type
    pub content_type: ContentType,
    /// Per-request timeout; falls back to the client default when `None`
    pub timeout: Option<Duration>,
    /// Requested cache behavior
    pub cache_policy: CachePolicy,
}

impl Endpoint {
    /// Create a descriptor with the given method
    #[must_use]
    pub fn new(base_url: impl Into<String>, path: impl Into<String>, method: Method) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            method,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            content_type: ContentType::default(),
            timeout: None,
            cache_policy: CachePolicy::default(),
        }
    }

    /// Create a GET descriptor
    #[must_use]
    pub fn get(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_url, path, Method::Get)
    }

    /// Create a POST descriptor
    #[must_use]
    pub fn post(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_url, path, Method::Post)
    }

    /// Create a PUT descriptor
    #[must_use]
    pub fn put(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_url, path, Method::Put)
    }

    /// Create a DELETE descriptor
    #[must_use]
    pub fn delete(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_url, path, Method::Delete)
    }

    /// Derive a descriptor with a different method
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Derive a descriptor with an extra header
    ///
    /// Descriptor headers override the default `Content-Type` and `Accept`
    /// headers on name collision.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Derive a descriptor with an extra query parameter
    ///
    /// Parameters keep their insertion order on the wire.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Derive a descriptor with a raw byte body
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Derive a descriptor with an explicit content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Derive a descriptor with a per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Derive a descriptor with a cache policy
    #[must_use]
    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    /// Derive a descriptor carrying a JSON-encoded structured body
    ///
    /// Field names serialize as `snake_case` (serde's default for Rust
    /// fields) and `chrono` date fields serialize as ISO-8601 strings.
    /// The content type is set to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encoding`] when the value cannot be serialized.
    pub fn json<B: Serialize>(self, body: &B) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Encoding(e.to_string()))?;
        Ok(self
            .with_body(bytes)
            .with_content_type(ContentType::Json))
    }

    /// Resolve the absolute request URL
    ///
    /// Base and path join with exactly one separating slash regardless of
    /// trailing/leading slashes on either side; query parameter values are
    /// percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the composed address does not
    /// parse as an absolute URL.
    pub fn resolved_url(&self) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/'),
        );
        let mut url = Url::parse(&joined).map_err(|_| ApiError::InvalidUrl)?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Build a transport-ready request
    ///
    /// Pure request construction, no I/O. Defaults `Content-Type` and
    /// `Accept` to `application/json`; descriptor headers override them.
    /// The effective timeout is the descriptor's own, falling back to
    /// `default_timeout`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidUrl`] when base+path is not a valid absolute URL
    /// - [`ApiError::Encoding`] when a header name or value is malformed
    pub fn build(&self, default_timeout: Duration) -> Result<reqwest::Request, ApiError> {
        let url = self.resolved_url()?;
        let mut request = reqwest::Request::new(self.method.as_reqwest(), url);

        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(self.content_type.as_str()));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(value) = self.cache_policy.header_value() {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static(value));
        }
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::Encoding(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::Encoding(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        if let Some(body) = &self.body {
            *request.body_mut() = Some(reqwest::Body::from(body.clone()));
        }
        *request.timeout_mut() = Some(self.timeout.unwrap_or(default_timeout));

        Ok(request)
    }
}
