//! CLI-specific error types and mappings.
//!
//! Maps SDK errors to exit codes and user-facing messages.

use thiserror::Error;
use waapi::WaapiError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid connection settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Argument combination the gateway cannot accept.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The gateway (or the network in front of it) failed the call.
    #[error("Gateway error: {message}")]
    Gateway {
        message: String,
        status: Option<u16>,
    },

    /// Rendering the response failed.
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: The gateway answered with an error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,                            // EX_CONFIG
            Self::Arguments(_) => 2,                          // EX_USAGE
            Self::Gateway { status: None, .. } => 69,         // EX_UNAVAILABLE
            Self::Gateway { status: Some(_), .. } => 1,
            Self::Output(_) => 74,                            // EX_IOERR
        }
    }
}

impl From<WaapiError> for CliError {
    fn from(err: WaapiError) -> Self {
        match err {
            WaapiError::InvalidConfiguration(msg) => Self::Config(msg),
            WaapiError::InvalidArgument(msg) => Self::Arguments(msg),
            WaapiError::Gateway(gateway) => Self::Gateway {
                message: gateway.message,
                status: gateway.status_code,
            },
        }
    }
}
