//! portpool - a concurrent TCP port scanner.

use anyhow::Context;
use clap::Parser;
use portpool::cli::Cli;
use portpool::config::AppSettings;
use portpool::{output, signal};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli)?;

    let cancel = CancellationToken::new();
    signal::spawn_listener(cancel.clone());

    cli.scan.execute(&settings, cli.quiet, cancel).await?;
    Ok(())
}

fn load_settings(cli: &Cli) -> anyhow::Result<AppSettings> {
    match &cli.config {
        Some(path) => AppSettings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(AppSettings::load().unwrap_or_else(|err| {
            output::print_warning(&format!("ignoring settings: {}", err));
            AppSettings::default()
        })),
    }
}

/// Log to stderr so the report on stdout stays clean. `RUST_LOG` wins over
/// the verbosity flag.
fn init_logging(verbose: bool) {
    let default = if verbose { "portpool=debug" } else { "portpool=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
