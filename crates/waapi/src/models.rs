//! Data model for the Waapi gateway.
//!
//! Value objects are created per call and never mutated afterwards.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::WaapiConfig;
use crate::error::{GatewayError, WaapiError, WaapiResult};
use crate::http::FilePart;

/// The `status` value the gateway uses for a successful call.
pub const SUCCESS_STATUS: &str = "success";

// ============================================================================
// Credentials (validated, internal)
// ============================================================================

/// Validated connection settings held by a client.
#[derive(Debug, Clone)]
pub(crate) struct Credentials {
    /// Base address, always ending in exactly one `/`
    pub base_url: Url,
    pub app_key: String,
    pub auth_key: String,
}

impl Credentials {
    pub(crate) fn from_config(config: &WaapiConfig) -> WaapiResult<Self> {
        let app_key = config.app_key.trim();
        if app_key.is_empty() {
            return Err(WaapiError::InvalidConfiguration(
                "app key must not be empty".to_string(),
            ));
        }
        let auth_key = config.auth_key.trim();
        if auth_key.is_empty() {
            return Err(WaapiError::InvalidConfiguration(
                "auth key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url: normalize_base_url(&config.base_url)?,
            app_key: app_key.to_string(),
            auth_key: auth_key.to_string(),
        })
    }
}

/// Parse a base address and force exactly one trailing separator.
pub(crate) fn normalize_base_url(raw: &str) -> WaapiResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WaapiError::InvalidConfiguration(
            "base URL must not be empty".to_string(),
        ));
    }

    let normalized = format!("{}/", trimmed.trim_end_matches('/'));
    let url = Url::parse(&normalized).map_err(|e| {
        WaapiError::InvalidConfiguration(format!("invalid base URL '{trimmed}': {e}"))
    })?;

    if url.cannot_be_a_base() {
        return Err(WaapiError::InvalidConfiguration(format!(
            "base URL '{trimmed}' cannot have paths appended"
        )));
    }
    Ok(url)
}

// ============================================================================
// Response Envelope
// ============================================================================

/// Uniform response shape returned by every gateway endpoint.
///
/// `status` is carried through verbatim; compare it with
/// [`SUCCESS_STATUS`] (or use [`Envelope::is_success`]) to tell outcomes
/// apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Whether the gateway reported `"success"`.
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

impl Envelope<Value> {
    /// Re-read `data` into a caller-specified shape.
    pub fn into_typed<T: DeserializeOwned>(self) -> WaapiResult<Envelope<T>> {
        let data = match self.data {
            None => None,
            Some(raw) => Some(serde_json::from_value(raw.clone()).map_err(|e| GatewayError {
                message: format!("unexpected data shape: {e}"),
                status_code: None,
                data: Some(raw),
            })?),
        };

        Ok(Envelope {
            status: self.status,
            message: self.message,
            data,
        })
    }
}

// ============================================================================
// Location
// ============================================================================

/// A geographic location shared into a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub address: String,
}

impl Location {
    pub fn new(
        latitude: f64,
        longitude: f64,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            name: name.into(),
            address: address.into(),
        }
    }

    /// The four scalar form fields, in declaration order.
    ///
    /// Coordinates use the shortest representation that parses back to the
    /// same `f64`.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            ("latitude".to_string(), self.latitude.to_string()),
            ("longitude".to_string(), self.longitude.to_string()),
            ("name".to_string(), self.name.clone()),
            ("address".to_string(), self.address.clone()),
        ]
    }

    pub(crate) fn validate(&self) -> WaapiResult<()> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(WaapiError::InvalidArgument(
                "location coordinates must be finite numbers".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Contact
// ============================================================================

/// A contact card shared into a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
            organization: None,
        }
    }

    #[must_use]
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Organization, if set and not blank.
    fn organization(&self) -> Option<&str> {
        self.organization
            .as_deref()
            .filter(|org| !org.trim().is_empty())
    }

    /// Render as a vCard 3.0 block, every line newline-terminated.
    pub fn to_vcard(&self) -> String {
        let mut card = String::from("BEGIN:VCARD\nVERSION:3.0\n");
        card.push_str(&format!("FN:{}\n", self.name));
        card.push_str(&format!("TEL;TYPE=CELL:{}\n", self.phone_number));
        if let Some(org) = self.organization() {
            card.push_str(&format!("ORG:{org}\n"));
        }
        card.push_str("END:VCARD\n");
        card
    }

    /// Render as bracketed form fields (`contact[name]`, ...).
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("contact[name]".to_string(), self.name.clone()),
            ("contact[number]".to_string(), self.phone_number.clone()),
        ];
        if let Some(org) = self.organization() {
            fields.push(("contact[organization]".to_string(), org.to_string()));
        }
        fields
    }

    pub(crate) fn validate(&self) -> WaapiResult<()> {
        if self.name.trim().is_empty() {
            return Err(WaapiError::InvalidArgument(
                "contact name must not be empty".to_string(),
            ));
        }
        if self.phone_number.trim().is_empty() {
            return Err(WaapiError::InvalidArgument(
                "contact phone number must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Media
// ============================================================================

/// Where the media for a media-bearing message comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// A URL the gateway downloads itself.
    Url(String),
    /// A local file uploaded with the request.
    Path(PathBuf),
    /// In-memory content uploaded with the request.
    Bytes { file_name: String, content: Vec<u8> },
}

impl MediaSource {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::Bytes {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Pick a source from two optional inputs.
    ///
    /// A local path takes precedence over a URL; having neither is an
    /// `InvalidArgument`.
    pub fn from_parts(url: Option<String>, path: Option<PathBuf>) -> WaapiResult<Self> {
        match (url, path) {
            (_, Some(path)) => Ok(Self::Path(path)),
            (Some(url), None) => Ok(Self::Url(url)),
            (None, None) => Err(WaapiError::InvalidArgument(
                "either a media URL or a local file is required".to_string(),
            )),
        }
    }

    /// Load local content so the request can be built.
    pub(crate) async fn resolve(self, file_name_override: Option<&str>) -> WaapiResult<ResolvedMedia> {
        match self {
            Self::Url(url) => {
                if url.trim().is_empty() {
                    return Err(WaapiError::InvalidArgument(
                        "media URL must not be empty".to_string(),
                    ));
                }
                Ok(ResolvedMedia::Remote(url))
            }
            Self::Path(path) => {
                if path.as_os_str().is_empty() {
                    return Err(WaapiError::InvalidArgument(
                        "media path must not be empty".to_string(),
                    ));
                }
                let content = tokio::fs::read(&path).await.map_err(|e| {
                    WaapiError::InvalidArgument(format!(
                        "cannot read media file '{}': {e}",
                        path.display()
                    ))
                })?;
                let file_name = file_name_override
                    .map(str::to_string)
                    .or_else(|| file_name_of(&path))
                    .unwrap_or_else(|| "upload".to_string());
                Ok(ResolvedMedia::Attachment(attachment(file_name, content)))
            }
            Self::Bytes { file_name, content } => {
                if content.is_empty() {
                    return Err(WaapiError::InvalidArgument(
                        "media content must not be empty".to_string(),
                    ));
                }
                let file_name = file_name_override.map_or(file_name, str::to_string);
                Ok(ResolvedMedia::Attachment(attachment(file_name, content)))
            }
        }
    }
}

/// Media ready to be placed in a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResolvedMedia {
    Remote(String),
    Attachment(FilePart),
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

fn attachment(file_name: String, content: Vec<u8>) -> FilePart {
    let mime_type = mime_guess::from_path(&file_name)
        .first_or_octet_stream()
        .to_string();
    FilePart {
        field: "file".to_string(),
        file_name,
        mime_type,
        content,
    }
}

/// Optional extras for [`crate::WaapiClient::send_media`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaOptions {
    pub caption: Option<String>,
    pub filename: Option<String>,
}

impl MediaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}
