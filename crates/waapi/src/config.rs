//! Public configuration for the Waapi client.
//!
//! `WaapiConfig` is a plain builder; nothing is validated until it is handed
//! to a client constructor, which reports problems as
//! [`WaapiError::InvalidConfiguration`].

use std::str::FromStr;
use std::time::Duration;

use crate::error::{WaapiError, WaapiResult};

/// Environment variable holding the gateway base address.
pub const ENV_BASE_URL: &str = "WAAPI_BASE_URL";
/// Environment variable holding the application key.
pub const ENV_APP_KEY: &str = "WAAPI_APP_KEY";
/// Environment variable holding the authentication key.
pub const ENV_AUTH_KEY: &str = "WAAPI_AUTH_KEY";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "WAAPI_TIMEOUT_SECS";
/// Environment variable holding the connect timeout in seconds.
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "WAAPI_CONNECT_TIMEOUT_SECS";
/// Environment variable selecting the wire format.
pub const ENV_WIRE_FORMAT: &str = "WAAPI_WIRE_FORMAT";
/// Environment variable selecting the non-2xx status policy.
pub const ENV_STATUS_POLICY: &str = "WAAPI_STATUS_POLICY";

/// How requests are encoded and authenticated.
///
/// This is a deployment decision: a given gateway accepts exactly one of
/// these conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WireFormat {
    /// `appkey`/`authkey` form fields, form or multipart bodies.
    #[default]
    FormBodyAuth,
    /// `x-app-key`/`x-auth-key` headers, JSON bodies.
    JsonHeaderAuth,
}

impl FromStr for WireFormat {
    type Err = WaapiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "form" | "form-body-auth" => Ok(Self::FormBodyAuth),
            "json" | "json-header-auth" => Ok(Self::JsonHeaderAuth),
            other => Err(WaapiError::InvalidConfiguration(format!(
                "unknown wire format '{other}' (expected 'form' or 'json')"
            ))),
        }
    }
}

/// What to do with a response whose HTTP status is not 2xx.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Turn the response into a `GatewayError`.
    #[default]
    RejectNonSuccess,
    /// Parse the envelope and return it like any other response.
    Passthrough,
}

impl FromStr for StatusPolicy {
    type Err = WaapiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" | "reject-non-success" => Ok(Self::RejectNonSuccess),
            "passthrough" => Ok(Self::Passthrough),
            other => Err(WaapiError::InvalidConfiguration(format!(
                "unknown status policy '{other}' (expected 'reject' or 'passthrough')"
            ))),
        }
    }
}

/// Configuration for the Waapi client.
///
/// # Example
///
/// ```
/// use waapi::{WaapiConfig, WireFormat};
/// use std::time::Duration;
///
/// let config = WaapiConfig::new("https://gateway.example.com/api", "app", "auth")
///     .with_timeout(Duration::from_secs(60))
///     .with_wire_format(WireFormat::JsonHeaderAuth);
/// ```
#[derive(Debug, Clone)]
pub struct WaapiConfig {
    /// Gateway base address
    pub(crate) base_url: String,
    /// Application key
    pub(crate) app_key: String,
    /// Authentication key
    pub(crate) auth_key: String,
    /// Whole-request timeout
    pub(crate) timeout: Duration,
    /// Connection establishment timeout
    pub(crate) connect_timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Extra headers sent with every request
    pub(crate) headers: Vec<(String, String)>,
    /// Request encoding and credential placement
    pub(crate) wire_format: WireFormat,
    /// Handling of non-2xx responses
    pub(crate) status_policy: StatusPolicy,
}

impl WaapiConfig {
    /// Create a configuration with default transport settings.
    pub fn new(
        base_url: impl Into<String>,
        app_key: impl Into<String>,
        auth_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            app_key: app_key.into(),
            auth_key: auth_key.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("waapi/", env!("CARGO_PKG_VERSION")).to_string(),
            headers: Vec::new(),
            wire_format: WireFormat::default(),
            status_policy: StatusPolicy::default(),
        }
    }

    /// Build a configuration from `WAAPI_*` environment variables.
    pub fn from_env() -> WaapiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Base URL and both keys are required; timeouts, wire format and
    /// status policy fall back to their defaults when unset.
    pub fn from_lookup<F>(lookup: F) -> WaapiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                WaapiError::InvalidConfiguration(format!("{key} is not set"))
            })
        };

        let mut config = Self::new(
            required(ENV_BASE_URL)?,
            required(ENV_APP_KEY)?,
            required(ENV_AUTH_KEY)?,
        );

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = parse_secs(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CONNECT_TIMEOUT_SECS) {
            config.connect_timeout = parse_secs(ENV_CONNECT_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_WIRE_FORMAT) {
            config.wire_format = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_STATUS_POLICY) {
            config.status_policy = raw.parse()?;
        }

        Ok(config)
    }

    /// Set the whole-request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Select the request encoding and credential placement.
    #[must_use]
    pub const fn with_wire_format(mut self, wire_format: WireFormat) -> Self {
        self.wire_format = wire_format;
        self
    }

    /// Select how non-2xx responses are handled.
    #[must_use]
    pub const fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// The configured wire format.
    pub const fn wire_format(&self) -> WireFormat {
        self.wire_format
    }

    /// The configured request timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The configured connect timeout.
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// The configured non-2xx handling.
    pub const fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// Extra headers sent with every request.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

fn parse_secs(key: &str, raw: &str) -> WaapiResult<Duration> {
    raw.trim().parse().map(Duration::from_secs).map_err(|_| {
        WaapiError::InvalidConfiguration(format!(
            "{key} must be a whole number of seconds, got '{raw}'"
        ))
    })
}
