#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod encoding;
mod error;
mod http;
mod models;
mod parsing;
mod port;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultWaapiClient, WaapiClient};

// Configuration
pub use config::{
    ENV_APP_KEY, ENV_AUTH_KEY, ENV_BASE_URL, ENV_CONNECT_TIMEOUT_SECS, ENV_STATUS_POLICY,
    ENV_TIMEOUT_SECS, ENV_WIRE_FORMAT, StatusPolicy, WaapiConfig, WireFormat,
};

// Errors
pub use error::{GatewayError, WaapiError, WaapiResult};

// Transport boundary
pub use http::{
    FilePart, HttpBackend, HttpMethod, OutboundRequest, RequestBody, ReqwestBackend,
    TransportError, TransportResponse,
};

// Data model
pub use models::{Contact, Envelope, Location, MediaOptions, MediaSource, SUCCESS_STATUS};

// Caller-facing port
pub use port::GatewayPort;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;
