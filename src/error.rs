//! Typed error handling for dispatch operations.
//!
//! This module provides structured error types that distinguish between:
//! - Permanent failures (provider rejections) - retrying cannot succeed
//! - Transient failures (throttling, outages, transport errors) - a later
//!   attempt may succeed
//!
//! The batch dispatcher retries every failure uniformly regardless of
//! classification; the predicates exist for callers inspecting outcomes.

use thiserror::Error;

/// Failure reported by a delivery gateway for a single send attempt.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Recipient address is missing or was rejected by the provider.
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    /// The provider rejected the message (bad payload, policy violation).
    #[error("Message rejected: {0}")]
    Rejected(String),

    /// The provider throttled the request.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The provider is temporarily unavailable.
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// Network-level failure before a response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request did not complete within the client timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The provider answered with a body this client could not parse.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// Returns `true` if retrying this failure cannot succeed.
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self, Self::InvalidRecipient(_) | Self::Rejected(_))
    }

    /// Returns `true` if this failure may clear on a later attempt.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        !self.is_permanent()
    }
}

/// Convert from `reqwest::Error` to `GatewayError`.
///
/// Errors raised before an HTTP status is available are transport-level:
/// timeouts map to `Timeout`, body-decoding failures to
/// `MalformedResponse`, and everything else (connect, DNS, TLS) to
/// `Transport`. Status-code mapping happens in the gateway itself, where
/// the response body is still available.
impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_decode() {
            Self::MalformedResponse(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// Top-level dispatch error.
///
/// A dispatch call fails as a whole only when its configuration is
/// invalid. Per-item send failures are reported in the dispatch summary,
/// never as an error from the dispatch call.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Invalid dispatch configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
