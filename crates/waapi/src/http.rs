//! HTTP backend abstraction for the Waapi gateway.
//!
//! The client never talks to reqwest directly. It hands a fully-built,
//! convention-neutral [`OutboundRequest`] to an [`HttpBackend`], which makes
//! fake transports trivial in tests. The production implementation is
//! [`ReqwestBackend`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::WaapiConfig;
use crate::error::{WaapiError, WaapiResult};

// ============================================================================
// Request / Response Types
// ============================================================================

/// HTTP method used by a gateway operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name of the part
    pub field: String,
    /// File name reported to the gateway
    pub file_name: String,
    /// MIME type of the content
    pub mime_type: String,
    /// Raw file content
    pub content: Vec<u8>,
}

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded` fields, in order.
    Form(Vec<(String, String)>),
    /// `application/json` document.
    Json(Value),
    /// `multipart/form-data` text fields plus one file part.
    Multipart {
        fields: Vec<(String, String)>,
        file: FilePart,
    },
}

/// A request ready to be sent by an [`HttpBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    /// Absolute URL, including any query parameters
    pub url: Url,
    /// Per-request headers (credentials in header-auth mode)
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl OutboundRequest {
    /// Look up a scalar field by name, wherever the wire format placed it.
    ///
    /// Searches form/multipart fields, top-level JSON members, then query
    /// parameters.
    pub fn field(&self, name: &str) -> Option<String> {
        let from_body = match &self.body {
            RequestBody::Form(fields) | RequestBody::Multipart { fields, .. } => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
            RequestBody::Json(doc) => doc.get(name).and_then(|value| match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            }),
            RequestBody::Empty => None,
        };

        from_body.or_else(|| {
            self.url
                .query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        })
    }

    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The request path relative to the host.
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

/// A response received from the gateway, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Failure reported by the transport itself.
///
/// `status` and `body` are present when the failure happened after a
/// response started arriving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub status: Option<u16>,
    pub body: Option<String>,
}

impl TransportError {
    /// A failure with no response (connect error, timeout, DNS).
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// A failure that carries the response the transport received.
    pub fn with_response(message: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
            body: Some(body.into()),
        }
    }
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Transport capability consumed by the client.
///
/// Implementations must return `Ok` for every response they receive,
/// including non-2xx ones; status interpretation belongs to the client.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Send one request and return the raw response.
    async fn execute(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// Owns a connection pool shared by every call made through the client.
/// Performs no retries.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a backend applying the configured timeouts and headers.
    pub fn new(config: &WaapiConfig) -> WaapiResult<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                WaapiError::InvalidConfiguration(format!("invalid header name '{name}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                WaapiError::InvalidConfiguration(format!("invalid value for header '{name}': {e}"))
            })?;
            default_headers.append(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(default_headers)
            .build()
            .map_err(|e| {
                WaapiError::InvalidConfiguration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }

    fn multipart_form(
        fields: Vec<(String, String)>,
        file: FilePart,
    ) -> Result<reqwest::multipart::Form, TransportError> {
        let part = reqwest::multipart::Part::bytes(file.content)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|e| TransportError::network(format!("invalid attachment type: {e}")))?;

        let form = fields
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (key, value)| {
                form.text(key, value)
            });
        Ok(form.part(file.field, part))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(request.url),
            HttpMethod::Post => self.client.post(request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Json(doc) => builder.json(&doc),
            RequestBody::Multipart { fields, file } => {
                builder.multipart(Self::multipart_form(fields, file)?)
            }
        };

        // Form-mode GET requests carry the keys in the query string, so the
        // URL must never reach an error message.
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::network(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportError {
            message: e.without_url().to_string(),
            status: Some(status),
            body: None,
        })?;

        Ok(TransportResponse { status, body })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn request_with(body: RequestBody, url: &str) -> OutboundRequest {
        OutboundRequest {
            method: HttpMethod::Post,
            url: Url::parse(url).unwrap(),
            headers: vec![("X-App-Key".to_string(), "app".to_string())],
            body,
        }
    }

    #[test]
    fn test_field_lookup_in_form_body() {
        let request = request_with(
            RequestBody::Form(vec![("chatId".to_string(), "123@c.us".to_string())]),
            "https://gateway.test/send-message",
        );
        assert_eq!(request.field("chatId").as_deref(), Some("123@c.us"));
        assert_eq!(request.field("message"), None);
    }

    #[test]
    fn test_field_lookup_in_json_and_query() {
        let request = request_with(
            RequestBody::Json(json!({"latitude": 30.5, "name": "Cairo"})),
            "https://gateway.test/device-status?deviceId=dev-1",
        );
        assert_eq!(request.field("latitude").as_deref(), Some("30.5"));
        assert_eq!(request.field("name").as_deref(), Some("Cairo"));
        assert_eq!(request.field("deviceId").as_deref(), Some("dev-1"));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = request_with(RequestBody::Empty, "https://gateway.test/reboot");
        assert_eq!(request.header("x-app-key"), Some("app"));
        assert_eq!(request.path(), "/reboot");
    }

    #[test]
    fn test_reqwest_backend_creation() {
        let config = WaapiConfig::new("https://gateway.test", "app", "auth")
            .with_timeout(Duration::from_secs(3))
            .with_header("x-tenant", "acme");
        assert!(ReqwestBackend::new(&config).is_ok());
    }

    #[test]
    fn test_reqwest_backend_rejects_invalid_header() {
        let config =
            WaapiConfig::new("https://gateway.test", "app", "auth").with_header("bad header", "v");
        assert!(matches!(
            ReqwestBackend::new(&config),
            Err(WaapiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_multipart_form_accepts_guessed_type() {
        let file = FilePart {
            field: "file".to_string(),
            file_name: "photo.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            content: vec![0xFF, 0xD8],
        };
        let form = ReqwestBackend::multipart_form(
            vec![("chatId".to_string(), "1@c.us".to_string())],
            file,
        );
        assert!(form.is_ok());
    }

    #[test]
    fn test_transport_error_constructors() {
        let network = TransportError::network("connection refused");
        assert_eq!(network.to_string(), "connection refused");
        assert!(network.status.is_none());

        let with_response = TransportError::with_response("bad gateway", 502, "<html>");
        assert_eq!(with_response.status, Some(502));
        assert_eq!(with_response.body.as_deref(), Some("<html>"));
    }

    mod fake_backend_tests {
        use crate::http::testing::FakeBackend;
        use super::*;

        #[tokio::test]
        async fn test_fake_backend_records_requests() {
            let backend = FakeBackend::new();
            let reply = backend
                .execute(request_with(RequestBody::Empty, "https://gateway.test/reboot"))
                .await
                .unwrap();

            assert_eq!(reply.status, 200);
            assert_eq!(backend.only_request().path(), "/reboot");
        }

        #[tokio::test]
        async fn test_fake_backend_routes_by_endpoint() {
            let backend = FakeBackend::new().with_route("qr-code", 404, r#"{"status":"error"}"#);

            let routed = backend
                .execute(request_with(RequestBody::Empty, "https://gateway.test/api/qr-code"))
                .await
                .unwrap();
            let fallback = backend
                .execute(request_with(RequestBody::Empty, "https://gateway.test/api/reboot"))
                .await
                .unwrap();

            assert_eq!(routed.status, 404);
            assert_eq!(fallback.status, 200);
            assert_eq!(backend.requests().len(), 2);
        }

        #[tokio::test]
        async fn test_fake_backend_failing() {
            let backend = FakeBackend::failing(TransportError::network("timed out"));
            let result = backend
                .execute(request_with(RequestBody::Empty, "https://gateway.test/reboot"))
                .await;
            assert_eq!(result, Err(TransportError::network("timed out")));
        }
    }
}
