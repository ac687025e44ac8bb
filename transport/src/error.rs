//! Typed error taxonomy for the transport layer
//!
//! The set is closed: every failure a request can produce maps to exactly
//! one [`ApiError`] variant, and the mapping from raw transport errors and
//! status codes is total. Causes are captured as strings so errors stay
//! `Clone + PartialEq` and can live inside broadcast state snapshots.

use thiserror::Error;

/// Errors produced by request construction, transport, and decoding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The composed base+path did not parse as an absolute URL
    #[error("invalid request URL")]
    InvalidUrl,

    /// Transport-level failure other than connectivity loss or timeout
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The response arrived but its body could not be read
    #[error("invalid response")]
    InvalidResponse,

    /// Non-2xx status outside the dedicated classifications
    #[error("HTTP status {status}")]
    HttpStatus {
        /// The response status code
        status: u16,
        /// Response body text, when it could be read
        body: Option<String>,
    },

    /// The response body could not be decoded into the expected type
    #[error("decoding failed: {0}")]
    Decoding(String),

    /// The request payload could not be encoded
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// HTTP 401
    #[error("unauthorized")]
    Unauthorized,

    /// Connectivity loss before a status code was obtained
    #[error("no connectivity")]
    NoConnectivity,

    /// The configured request deadline elapsed
    #[error("request timed out")]
    Timeout,

    /// HTTP 5xx
    #[error("server error")]
    ServerError,

    /// Anything not otherwise classified
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Classify a transport-level failure
    ///
    /// Total over `reqwest::Error`: deadline exceeded maps to [`Timeout`],
    /// connectivity loss to [`NoConnectivity`], everything else to
    /// [`RequestFailed`].
    ///
    /// [`Timeout`]: ApiError::Timeout
    /// [`NoConnectivity`]: ApiError::NoConnectivity
    /// [`RequestFailed`]: ApiError::RequestFailed
    #[must_use]
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::NoConnectivity
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Classify a non-2xx status code
    ///
    /// 401 maps to [`Unauthorized`], 500–599 to [`ServerError`], everything
    /// else to [`HttpStatus`] carrying the status and any readable body.
    ///
    /// [`Unauthorized`]: ApiError::Unauthorized
    /// [`ServerError`]: ApiError::ServerError
    /// [`HttpStatus`]: ApiError::HttpStatus
    #[must_use]
    pub fn from_status(status: u16, body: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized,
            500..=599 => Self::ServerError,
            _ => Self::HttpStatus { status, body },
        }
    }

    /// Whether a bounded retry may be attempted for this error
    ///
    /// Transport-level and server-level failures are retryable; build,
    /// validation, and decoding failures are deterministic given the same
    /// response and are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed(_) | Self::NoConnectivity | Self::Timeout | Self::ServerError
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification_is_total() {
        for status in 100..600u16 {
            let classified = ApiError::from_status(status, None);
            match status {
                401 => assert_eq!(classified, ApiError::Unauthorized),
                500..=599 => assert_eq!(classified, ApiError::ServerError),
                other => assert_eq!(
                    classified,
                    ApiError::HttpStatus {
                        status: other,
                        body: None,
                    }
                ),
            }
        }
    }

    #[test]
    fn status_body_is_carried() {
        let err = ApiError::from_status(404, Some("missing".to_string()));
        assert_eq!(
            err,
            ApiError::HttpStatus {
                status: 404,
                body: Some("missing".to_string()),
            }
        );
    }

    #[test]
    fn transport_and_server_failures_are_retryable() {
        assert!(ApiError::RequestFailed("reset".into()).is_retryable());
        assert!(ApiError::NoConnectivity.is_retryable());
        assert!(ApiError::Timeout.is_retryable());
        assert!(ApiError::ServerError.is_retryable());
    }

    #[test]
    fn deterministic_failures_are_not_retryable() {
        assert!(!ApiError::InvalidUrl.is_retryable());
        assert!(!ApiError::InvalidResponse.is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(!ApiError::Decoding("bad".into()).is_retryable());
        assert!(!ApiError::Encoding("bad".into()).is_retryable());
        assert!(
            !ApiError::HttpStatus {
                status: 404,
                body: None,
            }
            .is_retryable()
        );
        assert!(!ApiError::Unknown("weird".into()).is_retryable());
    }
}
