//! Command-line client for the Waapi WhatsApp gateway.
//!
//! `main.rs` is the composition root; everything else is testable library
//! code driven through [`waapi::GatewayPort`].

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

// Used by the binary only
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::build_gateway;
pub use commands::{Commands, MediaArgs};
pub use error::CliError;
pub use parser::{Cli, ConnectionArgs};
