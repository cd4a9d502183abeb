//! Response parsing and error normalization.
//!
//! Sync functions that turn raw transport output into an [`Envelope`] or a
//! [`GatewayError`].

use serde_json::Value;

use crate::error::GatewayError;
use crate::http::{TransportError, TransportResponse};
use crate::models::Envelope;

// ============================================================================
// Envelope Parsing
// ============================================================================

/// Parse a response body as a `{status, message?, data?}` envelope.
///
/// A string `status` is kept verbatim and any other scalar is kept as its
/// JSON text. A missing or null `status` is a malformed body.
pub fn parse_envelope(status_code: u16, body: &str) -> Result<Envelope, GatewayError> {
    let malformed = |message: String| GatewayError {
        message,
        status_code: Some(status_code),
        data: raw_data(body),
    };

    let json: Value = serde_json::from_str(body)
        .map_err(|e| malformed(format!("malformed response body: {e}")))?;

    let Value::Object(mut fields) = json else {
        return Err(malformed(
            "malformed response body: expected a JSON object".to_string(),
        ));
    };

    let status = match fields.remove("status") {
        Some(Value::String(status)) => status,
        Some(Value::Null) | None => {
            return Err(malformed(
                "malformed response body: missing 'status'".to_string(),
            ));
        }
        Some(other) => other.to_string(),
    };

    let message = match fields.remove("message") {
        Some(Value::String(message)) => Some(message),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    };

    let data = fields.remove("data").filter(|data| !data.is_null());

    Ok(Envelope {
        status,
        message,
        data,
    })
}

// ============================================================================
// Error Normalization
// ============================================================================

/// Normalize a transport failure.
///
/// The body's `message` wins over the transport's own text.
pub fn normalize_transport_error(err: TransportError) -> GatewayError {
    let data = err.body.as_deref().and_then(raw_data);
    let message = data
        .as_ref()
        .and_then(message_of)
        .unwrap_or(err.message);

    GatewayError {
        message,
        status_code: err.status,
        data,
    }
}

/// Normalize a received response whose status is not 2xx.
pub fn reject_status(response: &TransportResponse) -> GatewayError {
    let data = raw_data(&response.body);
    let message = data.as_ref().and_then(message_of).unwrap_or_else(|| {
        format!("gateway responded with HTTP {}", response.status)
    });

    GatewayError {
        message,
        status_code: Some(response.status),
        data,
    }
}

/// Whether an HTTP status is 2xx.
pub const fn is_success_status(status: u16) -> bool {
    status >= 200 && status < 300
}

/// The raw body as JSON, or as a JSON string when it is not JSON.
fn raw_data(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}

/// The `message` member of a JSON object, when it is a string.
fn message_of(data: &Value) -> Option<String> {
    data.as_object()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
