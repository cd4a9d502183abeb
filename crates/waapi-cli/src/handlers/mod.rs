//! Command handlers.
//!
//! Handlers translate parsed commands into [`GatewayPort`] calls. They never
//! print; rendering is left to `presentation`.

pub mod device;
pub mod send;

use waapi::{Envelope, GatewayPort};

use crate::commands::Commands;
use crate::error::CliError;

/// Run one command against the gateway.
pub async fn execute(gateway: &dyn GatewayPort, command: Commands) -> Result<Envelope, CliError> {
    match command {
        Commands::Text { chat_id, message } => send::text(gateway, &chat_id, &message).await,
        Commands::Media {
            chat_id,
            source,
            caption,
            filename,
        } => send::media(gateway, &chat_id, source, caption, filename).await,
        Commands::Sticker { chat_id, source } => send::sticker(gateway, &chat_id, source).await,
        Commands::Voice { chat_id, source } => send::voice(gateway, &chat_id, source).await,
        Commands::Location {
            chat_id,
            latitude,
            longitude,
            name,
            address,
        } => send::location(gateway, &chat_id, latitude, longitude, name, address).await,
        Commands::Contact {
            chat_id,
            name,
            phone,
            organization,
        } => send::contact(gateway, &chat_id, name, phone, organization).await,
        Commands::Template {
            chat_id,
            template_id,
            params,
        } => send::template(gateway, &chat_id, &template_id, &params).await,
        Commands::Status { device_id } => device::status(gateway, device_id).await,
        Commands::Qr { device_id } => device::qr(gateway, device_id).await,
        Commands::Reboot => device::reboot(gateway).await,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{MockGateway, success};
    use super::*;
    use waapi::{GatewayError, WaapiError};

    #[tokio::test]
    async fn test_execute_routes_text() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_send_text()
            .withf(|chat_id, text| chat_id == "1@c.us" && text == "hello")
            .times(1)
            .returning(|_, _| success());

        let command = Commands::Text {
            chat_id: "1@c.us".to_string(),
            message: "hello".to_string(),
        };
        let envelope = execute(&gateway, command).await.unwrap();
        assert!(envelope.is_success());
    }

    #[tokio::test]
    async fn test_execute_routes_qr_with_device() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_qr_code()
            .withf(|device_id| device_id.as_deref() == Some("dev-2"))
            .times(1)
            .returning(|_| success());

        let command = Commands::Qr {
            device_id: Some("dev-2".to_string()),
        };
        execute(&gateway, command).await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_maps_gateway_errors() {
        let mut gateway = MockGateway::new();
        gateway.expect_reboot().times(1).returning(|| {
            Err(WaapiError::Gateway(GatewayError {
                message: "Unauthorized".to_string(),
                status_code: Some(401),
                data: None,
            }))
        });

        let err = execute(&gateway, Commands::Reboot).await.unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("Unauthorized"));
    }
}
