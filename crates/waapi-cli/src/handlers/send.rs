//! Handlers for the message-sending commands.

use waapi::{Contact, Envelope, GatewayPort, Location, MediaOptions};

use crate::commands::MediaArgs;
use crate::error::CliError;

pub async fn text(
    gateway: &dyn GatewayPort,
    chat_id: &str,
    message: &str,
) -> Result<Envelope, CliError> {
    tracing::debug!(chat_id, "Sending text");
    Ok(gateway.send_text(chat_id, message).await?)
}

pub async fn media(
    gateway: &dyn GatewayPort,
    chat_id: &str,
    source: MediaArgs,
    caption: Option<String>,
    filename: Option<String>,
) -> Result<Envelope, CliError> {
    let source = source.into_source()?;
    let options = MediaOptions { caption, filename };
    tracing::debug!(chat_id, ?source, "Sending media");
    Ok(gateway.send_media(chat_id, source, options).await?)
}

pub async fn sticker(
    gateway: &dyn GatewayPort,
    chat_id: &str,
    source: MediaArgs,
) -> Result<Envelope, CliError> {
    let source = source.into_source()?;
    Ok(gateway.send_sticker(chat_id, source).await?)
}

pub async fn voice(
    gateway: &dyn GatewayPort,
    chat_id: &str,
    source: MediaArgs,
) -> Result<Envelope, CliError> {
    let source = source.into_source()?;
    Ok(gateway.send_voice_note(chat_id, source).await?)
}

pub async fn location(
    gateway: &dyn GatewayPort,
    chat_id: &str,
    latitude: f64,
    longitude: f64,
    name: String,
    address: String,
) -> Result<Envelope, CliError> {
    let location = Location::new(latitude, longitude, name, address);
    Ok(gateway.send_location(chat_id, &location).await?)
}

pub async fn contact(
    gateway: &dyn GatewayPort,
    chat_id: &str,
    name: String,
    phone: String,
    organization: Option<String>,
) -> Result<Envelope, CliError> {
    let contact = Contact {
        name,
        phone_number: phone,
        organization,
    };
    Ok(gateway.send_contact(chat_id, &contact).await?)
}

pub async fn template(
    gateway: &dyn GatewayPort,
    chat_id: &str,
    template_id: &str,
    params: &[String],
) -> Result<Envelope, CliError> {
    tracing::debug!(chat_id, template_id, params = params.len(), "Sending template");
    Ok(gateway.send_template(chat_id, template_id, params).await?)
}
