//! Waapi gateway client.
//!
//! Every operation follows the same template: validate arguments, describe
//! the body as a [`Payload`], and hand it to [`WaapiClient::dispatch`].

mod device;
mod messaging;

use url::Url;

use crate::config::{StatusPolicy, WaapiConfig, WireFormat};
use crate::encoding::{Payload, encode_request};
use crate::error::{WaapiError, WaapiResult};
use crate::http::{HttpBackend, HttpMethod, ReqwestBackend};
use crate::models::{Credentials, Envelope};
use crate::parsing::{is_success_status, normalize_transport_error, parse_envelope, reject_status};

/// Endpoint paths, relative to the base address.
pub(crate) mod endpoints {
    pub const SEND_MESSAGE: &str = "send-message";
    pub const SEND_MEDIA: &str = "send-media";
    pub const SEND_STICKER: &str = "send-sticker";
    pub const SEND_VOICE: &str = "send-voice";
    pub const SEND_LOCATION: &str = "send-location";
    pub const SEND_CONTACT: &str = "send-contact";
    pub const SEND_TEMPLATE: &str = "send-template";
    pub const DEVICE_STATUS: &str = "device-status";
    pub const QR_CODE: &str = "qr-code";
    pub const REBOOT: &str = "reboot";
}

// ============================================================================
// Type Aliases
// ============================================================================

/// Default client using the reqwest HTTP backend.
pub type DefaultWaapiClient = WaapiClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Waapi gateway.
///
/// Generic over the transport so tests can inject a fake one. The client
/// holds only immutable state, so one instance can serve any number of
/// concurrent calls.
pub struct WaapiClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) credentials: Credentials,
    pub(crate) wire_format: WireFormat,
    pub(crate) status_policy: StatusPolicy,
}

impl DefaultWaapiClient {
    /// Create a client backed by reqwest.
    ///
    /// Performs no network I/O.
    pub fn new(config: &WaapiConfig) -> WaapiResult<Self> {
        let credentials = Credentials::from_config(config)?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self::assemble(config, credentials, backend))
    }
}

impl<B: HttpBackend> WaapiClient<B> {
    /// Create a client on top of a custom transport.
    pub fn with_backend(config: &WaapiConfig, backend: B) -> WaapiResult<Self> {
        let credentials = Credentials::from_config(config)?;
        Ok(Self::assemble(config, credentials, backend))
    }

    fn assemble(config: &WaapiConfig, credentials: Credentials, backend: B) -> Self {
        Self {
            backend,
            credentials,
            wire_format: config.wire_format,
            status_policy: config.status_policy,
        }
    }

    /// Effective base address, always ending in one `/`.
    pub const fn base_url(&self) -> &Url {
        &self.credentials.base_url
    }

    pub const fn wire_format(&self) -> WireFormat {
        self.wire_format
    }

    /// Borrow the transport.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Encode, send and interpret one request.
    pub(crate) async fn dispatch(
        &self,
        method: HttpMethod,
        path: &'static str,
        payload: Payload,
    ) -> WaapiResult<Envelope> {
        let request = encode_request(&self.credentials, self.wire_format, method, path, payload)?;
        tracing::debug!(?method, path, "Dispatching gateway request");

        let response = self
            .backend
            .execute(request)
            .await
            .map_err(normalize_transport_error)?;
        tracing::debug!(path, status = response.status, "Gateway responded");

        if self.status_policy == StatusPolicy::RejectNonSuccess
            && !is_success_status(response.status)
        {
            return Err(reject_status(&response).into());
        }

        Ok(parse_envelope(response.status, &response.body)?)
    }
}

/// Reject a blank required string argument.
pub(crate) fn require(value: &str, what: &str) -> WaapiResult<()> {
    if value.trim().is_empty() {
        return Err(WaapiError::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(())
}
