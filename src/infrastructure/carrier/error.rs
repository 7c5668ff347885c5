//! # Carrier Errors
//!
//! Failures of the carrier's catalog, service detail and rating calls.
//!
//! Transport trouble (timeouts, dropped connections, rate limits) is
//! transient and retried by the call policy. Everything else is the
//! carrier's final answer for that call.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::infrastructure::carrier::error::CarrierError;
//!
//! assert!(CarrierError::timeout("catalog lookup timed out").is_retryable());
//! assert!(!CarrierError::authentication("invalid API key").is_retryable());
//! ```

use thiserror::Error;

/// Error returned by a [`CarrierGateway`](super::CarrierGateway) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarrierError {
    /// The call did not complete in time.
    #[error("carrier timeout: {message}")]
    Timeout {
        /// What timed out.
        message: String,
        /// The deadline that elapsed, in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// The carrier could not be reached.
    #[error("carrier connection error: {0}")]
    Connection(String),

    /// The API key was refused.
    #[error("carrier authentication error: {0}")]
    Authentication(String),

    /// Too many calls; the carrier may say when to come back.
    #[error("carrier rate limit exceeded: {message}")]
    RateLimited {
        /// Carrier message.
        message: String,
        /// Suggested wait before the next call, in milliseconds.
        retry_after_ms: Option<u64>,
    },

    /// The carrier declined the request, e.g. a service that does not
    /// reach the destination or a parcel over its limits.
    #[error("carrier rejected request: {message}")]
    Rejected {
        /// Carrier message.
        message: String,
        /// Carrier message code, when given.
        code: Option<String>,
    },

    /// No service detail exists for the reference.
    #[error("carrier service not found: {reference}")]
    ServiceNotFound {
        /// The detail reference that was looked up.
        reference: String,
    },

    /// The carrier answered with something that is not a valid reply.
    #[error("malformed carrier response: {0}")]
    MalformedResponse(String),
}

impl CarrierError {
    /// A timeout without a known deadline.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// A timeout after `timeout_ms`.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// A dropped or refused connection.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Refused credentials.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// A rate limit with the carrier's suggested wait.
    #[must_use]
    pub fn rate_limited_with_retry(message: impl Into<String>, retry_after_ms: u64) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_ms: Some(retry_after_ms),
        }
    }

    /// A rejection without a message code.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            code: None,
        }
    }

    /// A rejection with the carrier's message code.
    #[must_use]
    pub fn rejected_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// An unknown detail reference.
    #[must_use]
    pub fn service_not_found(reference: impl Into<String>) -> Self {
        Self::ServiceNotFound {
            reference: reference.into(),
        }
    }

    /// An unreadable reply.
    #[must_use]
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Returns true if the same call may succeed when repeated.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection(_) | Self::RateLimited { .. }
        )
    }

    /// The carrier's suggested wait, for rate limits.
    #[must_use]
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms, .. } => *retry_after_ms,
            _ => None,
        }
    }

    /// The carrier's message code, for rejections.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Result type for carrier calls.
pub type CarrierResult<T> = Result<T, CarrierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_are_retryable() {
        assert!(CarrierError::timeout("slow").is_retryable());
        assert!(CarrierError::connection("reset").is_retryable());
        assert!(CarrierError::rate_limited_with_retry("slow down", 1_000).is_retryable());
    }

    #[test]
    fn carrier_answers_are_final() {
        for error in [
            CarrierError::authentication("bad key"),
            CarrierError::rejected("no service to destination"),
            CarrierError::service_not_found("DOM.XX"),
            CarrierError::malformed_response("missing price"),
        ] {
            assert!(!error.is_retryable(), "{error}");
        }
    }

    #[test]
    fn rate_limit_carries_delay() {
        let error = CarrierError::rate_limited_with_retry("slow down", 1_000);
        assert_eq!(error.retry_after_ms(), Some(1_000));
        assert_eq!(CarrierError::timeout("slow").retry_after_ms(), None);
    }

    #[test]
    fn rejection_keeps_code() {
        let error = CarrierError::rejected_with_code("no service to destination", "7292");
        assert_eq!(error.code(), Some("7292"));
        assert_eq!(
            error.to_string(),
            "carrier rejected request: no service to destination"
        );
    }

    #[test]
    fn not_found_names_reference() {
        assert_eq!(
            CarrierError::service_not_found("DOM.XX").to_string(),
            "carrier service not found: DOM.XX"
        );
    }
}
