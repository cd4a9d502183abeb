//! Main CLI parser and connection arguments.

use clap::{Args, Parser};
use waapi::{
    ENV_APP_KEY, ENV_AUTH_KEY, ENV_BASE_URL, ENV_CONNECT_TIMEOUT_SECS, ENV_STATUS_POLICY,
    ENV_TIMEOUT_SECS, ENV_WIRE_FORMAT, StatusPolicy, WaapiConfig, WireFormat,
};

use crate::commands::Commands;
use crate::error::CliError;

/// Command-line interface for a Waapi gateway instance.
#[derive(Parser, Debug)]
#[command(name = "waapi")]
#[command(about = "Send WhatsApp messages through a Waapi gateway")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Print the raw response envelope as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the gateway lives and how to authenticate.
///
/// Every value can also come from the environment (or a `.env` file). The
/// resolved values are handed to [`WaapiConfig::from_lookup`], so flags and
/// environment variables share one loader with the library.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Gateway base URL
    #[arg(long, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// Application key
    #[arg(long, env = ENV_APP_KEY, hide_env_values = true)]
    pub app_key: Option<String>,

    /// Authentication key
    #[arg(long, env = ENV_AUTH_KEY, hide_env_values = true)]
    pub auth_key: Option<String>,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<u64>,

    /// Connect timeout in seconds [default: 10]
    #[arg(long, env = ENV_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_secs: Option<u64>,

    /// Wire format accepted by the gateway ("form" or "json") [default: form]
    #[arg(long, env = ENV_WIRE_FORMAT, value_parser = parse_wire_format)]
    pub wire_format: Option<WireFormat>,

    /// Non-2xx handling ("reject" or "passthrough") [default: reject]
    #[arg(long, env = ENV_STATUS_POLICY, value_parser = parse_status_policy)]
    pub status_policy: Option<StatusPolicy>,

    /// Extra header sent with every request, as NAME=VALUE (repeatable)
    #[arg(long = "header", value_name = "NAME=VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,
}

impl ConnectionArgs {
    /// Build the client configuration, reporting which value is missing.
    pub fn to_config(&self) -> Result<WaapiConfig, CliError> {
        let required = [
            (&self.base_url, "--base-url", ENV_BASE_URL),
            (&self.app_key, "--app-key", ENV_APP_KEY),
            (&self.auth_key, "--auth-key", ENV_AUTH_KEY),
        ];
        if let Some((_, flag, env)) = required.iter().find(|(value, _, _)| value.is_none()) {
            return Err(CliError::Config(format!("{flag} (or {env}) is required")));
        }

        let config = WaapiConfig::from_lookup(|key| self.lookup(key))?;
        let config = self
            .headers
            .iter()
            .fold(config, |config, (name, value)| config.with_header(name, value));
        Ok(config)
    }

    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            ENV_BASE_URL => self.base_url.clone(),
            ENV_APP_KEY => self.app_key.clone(),
            ENV_AUTH_KEY => self.auth_key.clone(),
            ENV_TIMEOUT_SECS => self.timeout_secs.map(|secs| secs.to_string()),
            ENV_CONNECT_TIMEOUT_SECS => self.connect_timeout_secs.map(|secs| secs.to_string()),
            ENV_WIRE_FORMAT => self.wire_format.map(|format| {
                match format {
                    WireFormat::FormBodyAuth => "form",
                    WireFormat::JsonHeaderAuth => "json",
                }
                .to_string()
            }),
            ENV_STATUS_POLICY => self.status_policy.map(|policy| {
                match policy {
                    StatusPolicy::RejectNonSuccess => "reject",
                    StatusPolicy::Passthrough => "passthrough",
                }
                .to_string()
            }),
            _ => None,
        }
    }
}

fn parse_wire_format(raw: &str) -> Result<WireFormat, String> {
    raw.parse().map_err(|e: waapi::WaapiError| e.to_string())
}

fn parse_status_policy(raw: &str) -> Result<StatusPolicy, String> {
    raw.parse().map_err(|e: waapi::WaapiError| e.to_string())
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::time::Duration;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_connection_flags() {
        let cli = Cli::parse_from([
            "waapi",
            "--base-url",
            "https://gateway.test/api",
            "--app-key",
            "app",
            "--auth-key",
            "auth",
            "--timeout-secs",
            "5",
            "--wire-format",
            "json",
            "--verbose",
            "reboot",
        ]);
        assert!(cli.verbose);
        assert!(!cli.json);

        let config = cli.connection.to_config().unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.wire_format(), WireFormat::JsonHeaderAuth);
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let args = ConnectionArgs {
            base_url: Some("https://gateway.test".to_string()),
            auth_key: Some("auth".to_string()),
            ..ConnectionArgs::default()
        };
        match args.to_config() {
            Err(CliError::Config(msg)) => assert!(msg.contains("--app-key")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_flags_reach_config() {
        let cli = Cli::parse_from([
            "waapi",
            "--base-url",
            "https://gateway.test/api",
            "--app-key",
            "app",
            "--auth-key",
            "auth",
            "--connect-timeout-secs",
            "4",
            "--status-policy",
            "passthrough",
            "--header",
            "x-tenant=acme",
            "--header",
            "x-trace = 1",
            "reboot",
        ]);

        let config = cli.connection.to_config().unwrap();
        assert_eq!(config.connect_timeout(), Duration::from_secs(4));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.status_policy(), StatusPolicy::Passthrough);
        assert_eq!(config.wire_format(), WireFormat::FormBodyAuth);
        assert_eq!(
            config.headers(),
            [
                ("x-tenant".to_string(), "acme".to_string()),
                ("x-trace".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_header_rejected() {
        let result = Cli::try_parse_from(["waapi", "--header", "no-separator", "reboot"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_wire_format_rejected() {
        let result = Cli::try_parse_from(["waapi", "--wire-format", "xml", "reboot"]);
        assert!(result.is_err());
    }
}
