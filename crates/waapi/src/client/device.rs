//! Device and instance management operations.

use crate::encoding::Payload;
use crate::error::WaapiResult;
use crate::http::{HttpBackend, HttpMethod};
use crate::models::Envelope;

use super::{WaapiClient, endpoints, require};

impl<B: HttpBackend> WaapiClient<B> {
    /// Fetch the connection state of a device.
    ///
    /// Pass `None` on single-device deployments.
    pub async fn device_status(&self, device_id: Option<&str>) -> WaapiResult<Envelope> {
        let payload = device_payload(device_id)?;
        self.dispatch(HttpMethod::Get, endpoints::DEVICE_STATUS, payload)
            .await
    }

    /// Fetch the pairing QR code of a device.
    pub async fn qr_code(&self, device_id: Option<&str>) -> WaapiResult<Envelope> {
        let payload = device_payload(device_id)?;
        self.dispatch(HttpMethod::Get, endpoints::QR_CODE, payload)
            .await
    }

    /// Restart the gateway instance.
    pub async fn reboot(&self) -> WaapiResult<Envelope> {
        self.dispatch(HttpMethod::Post, endpoints::REBOOT, Payload::new())
            .await
    }
}

fn device_payload(device_id: Option<&str>) -> WaapiResult<Payload> {
    if let Some(id) = device_id {
        require(id, "device id")?;
    }
    Ok(Payload::new().optional_text("deviceId", device_id))
}
