//! Caller-facing port trait.
//!
//! Consumers that only need to *call* the gateway depend on
//! [`GatewayPort`] instead of the generic client, which keeps them testable
//! with mocks.

use async_trait::async_trait;

use crate::client::WaapiClient;
use crate::error::WaapiResult;
use crate::http::HttpBackend;
use crate::models::{Contact, Envelope, Location, MediaOptions, MediaSource};

/// The ten gateway operations.
///
/// Every method returns the gateway's envelope or a `WaapiError`; none of
/// them retries.
#[async_trait]
pub trait GatewayPort: Send + Sync {
    async fn send_text(&self, chat_id: &str, text: &str) -> WaapiResult<Envelope>;

    async fn send_media(
        &self,
        chat_id: &str,
        media: MediaSource,
        options: MediaOptions,
    ) -> WaapiResult<Envelope>;

    async fn send_sticker(&self, chat_id: &str, media: MediaSource) -> WaapiResult<Envelope>;

    async fn send_voice_note(&self, chat_id: &str, media: MediaSource) -> WaapiResult<Envelope>;

    async fn send_location(&self, chat_id: &str, location: &Location) -> WaapiResult<Envelope>;

    async fn send_contact(&self, chat_id: &str, contact: &Contact) -> WaapiResult<Envelope>;

    /// # Arguments
    ///
    /// * `params` - Substitutions for positions 1, 2, ... in order
    async fn send_template(
        &self,
        chat_id: &str,
        template_id: &str,
        params: &[String],
    ) -> WaapiResult<Envelope>;

    /// `device_id` is `None` on single-device deployments.
    async fn device_status(&self, device_id: Option<String>) -> WaapiResult<Envelope>;

    async fn qr_code(&self, device_id: Option<String>) -> WaapiResult<Envelope>;

    async fn reboot(&self) -> WaapiResult<Envelope>;
}

#[async_trait]
impl<B: HttpBackend> GatewayPort for WaapiClient<B> {
    async fn send_text(&self, chat_id: &str, text: &str) -> WaapiResult<Envelope> {
        Self::send_text(self, chat_id, text).await
    }

    async fn send_media(
        &self,
        chat_id: &str,
        media: MediaSource,
        options: MediaOptions,
    ) -> WaapiResult<Envelope> {
        Self::send_media(self, chat_id, media, options).await
    }

    async fn send_sticker(&self, chat_id: &str, media: MediaSource) -> WaapiResult<Envelope> {
        Self::send_sticker(self, chat_id, media).await
    }

    async fn send_voice_note(&self, chat_id: &str, media: MediaSource) -> WaapiResult<Envelope> {
        Self::send_voice_note(self, chat_id, media).await
    }

    async fn send_location(&self, chat_id: &str, location: &Location) -> WaapiResult<Envelope> {
        Self::send_location(self, chat_id, location).await
    }

    async fn send_contact(&self, chat_id: &str, contact: &Contact) -> WaapiResult<Envelope> {
        Self::send_contact(self, chat_id, contact).await
    }

    async fn send_template(
        &self,
        chat_id: &str,
        template_id: &str,
        params: &[String],
    ) -> WaapiResult<Envelope> {
        Self::send_template(self, chat_id, template_id, params).await
    }

    async fn device_status(&self, device_id: Option<String>) -> WaapiResult<Envelope> {
        Self::device_status(self, device_id.as_deref()).await
    }

    async fn qr_code(&self, device_id: Option<String>) -> WaapiResult<Envelope> {
        Self::qr_code(self, device_id.as_deref()).await
    }

    async fn reboot(&self) -> WaapiResult<Envelope> {
        Self::reboot(self).await
    }
}
