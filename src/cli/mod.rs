//! Command-line interface definitions.
//!
//! Uses `clap` derive macros for declarative argument parsing. The CLI is
//! a single scan command; options left unset fall back to the settings file
//! and then to built-in defaults.

mod scan;

pub use scan::ScanCommand;

use clap::Parser;
use std::path::PathBuf;

/// portpool - a concurrent TCP connect port scanner.
///
/// Probes every port in a range on one host using a fixed number of
/// concurrent workers, then prints the open ports in ascending order.
/// Ctrl+C stops the scan early and prints the ports found so far.
#[derive(Parser, Debug)]
#[command(name = "portpool")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP port scanner", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanCommand,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress per-port CLOSED lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to custom settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "portpool", "--host", "10.0.0.1", "--ports", "22-100", "--workers", "8", "-q",
        ]);
        assert_eq!(cli.scan.host.as_deref(), Some("10.0.0.1"));
        assert_eq!(cli.scan.ports.as_deref(), Some("22-100"));
        assert_eq!(cli.scan.workers, Some(8));
        assert!(cli.quiet);
        assert_eq!(cli.scan.output, OutputFormat::Plain);
    }

    #[test]
    fn test_zero_workers_rejected_by_parser() {
        assert!(Cli::try_parse_from(["portpool", "--workers", "0"]).is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
