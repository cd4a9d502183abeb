//! CLI entry point - the composition root.
//!
//! Wires logging, `.env` loading and the production gateway together, then
//! hands the parsed command to the handlers.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use waapi_cli::{Cli, CliError, build_gateway, handlers, presentation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match run(cli).await {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("waapi=debug,waapi_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

/// Execute the command; `Ok(false)` means the gateway answered but did not
/// report success.
async fn run(cli: Cli) -> Result<bool, CliError> {
    let gateway = build_gateway(&cli.connection)?;
    let envelope = handlers::execute(gateway.as_ref(), cli.command).await?;
    println!("{}", presentation::render_envelope(&envelope, cli.json)?);
    Ok(envelope.is_success())
}
