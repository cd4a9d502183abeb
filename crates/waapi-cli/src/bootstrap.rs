//! Composition root helpers.
//!
//! The only place a concrete client is constructed.

use std::sync::Arc;

use waapi::{DefaultWaapiClient, GatewayPort};

use crate::error::CliError;
use crate::parser::ConnectionArgs;

/// Build the production gateway from connection arguments.
pub fn build_gateway(args: &ConnectionArgs) -> Result<Arc<dyn GatewayPort>, CliError> {
    let config = args.to_config()?;
    let client = DefaultWaapiClient::new(&config)?;
    tracing::debug!(base_url = %client.base_url(), "Gateway client ready");
    Ok(Arc::new(client))
}
