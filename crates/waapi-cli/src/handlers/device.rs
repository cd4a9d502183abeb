//! Handlers for device and instance commands.

use waapi::{Envelope, GatewayPort};

use crate::error::CliError;

pub async fn status(gateway: &dyn GatewayPort, device_id: Option<String>) -> Result<Envelope, CliError> {
    Ok(gateway.device_status(device_id).await?)
}

pub async fn qr(gateway: &dyn GatewayPort, device_id: Option<String>) -> Result<Envelope, CliError> {
    Ok(gateway.qr_code(device_id).await?)
}

pub async fn reboot(gateway: &dyn GatewayPort) -> Result<Envelope, CliError> {
    tracing::info!("Requesting gateway reboot");
    Ok(gateway.reboot().await?)
}
