//! Error types for gateway operations.
//!
//! Every failure a caller can observe is one of three kinds: a bad
//! configuration at construction time, a bad argument before any network
//! activity, or a normalized [`GatewayError`] for everything the transport or
//! the remote service reported.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Result type alias for gateway operations.
pub type WaapiResult<T> = Result<T, WaapiError>;

/// Errors returned by the Waapi client.
#[derive(Debug, Error)]
pub enum WaapiError {
    /// Required configuration was missing or malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation was called with an unusable argument combination.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The transport failed or the gateway reported a failure.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl WaapiError {
    /// The HTTP status attached to a gateway error, if any.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Gateway(err) => err.status_code,
            _ => None,
        }
    }

    /// Borrow the normalized gateway error, if this is one.
    pub const fn as_gateway(&self) -> Option<&GatewayError> {
        match self {
            Self::Gateway(err) => Some(err),
            _ => None,
        }
    }
}

/// Normalized failure reported by the transport or the gateway.
///
/// The client attaches no meaning to `status_code`; callers branch on it for
/// gateway semantics such as 401 (bad keys), 404 (unknown device) or 429
/// (rate limited).
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}{}", .status_code.map(|code| format!(" (HTTP {code})")).unwrap_or_default())]
pub struct GatewayError {
    /// Human-readable failure description
    pub message: String,
    /// HTTP status code, when a response was received
    pub status_code: Option<u16>,
    /// Raw response body, when one was received
    pub data: Option<Value>,
}

impl GatewayError {
    /// Create a gateway error with no response attached.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            data: None,
        }
    }
}
