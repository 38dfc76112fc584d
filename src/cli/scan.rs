//! Scan command implementation.
//!
//! Merges command-line options with the settings file, runs the
//! coordinator and prints the report.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output;
use crate::scanner::{Coordinator, ScanConfig, ScanReport};
use clap::Args;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Scan a host for open TCP ports.
#[derive(Args, Debug)]
pub struct ScanCommand {
    /// Host to scan [default: 127.0.0.1]
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port(s) to scan, e.g. "80" or "22-100" [default: 5400-5500]
    #[arg(short, long, value_name = "SPEC")]
    pub ports: Option<String>,

    /// Number of concurrent workers [default: number of CPUs]
    #[arg(short, long, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Connection timeout in milliseconds [default: OS default]
    #[arg(short = 't', long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,
}

fn parse_workers(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("worker count must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl ScanCommand {
    /// Build the scan configuration, with command-line options taking
    /// precedence over settings.
    pub fn scan_config(&self, settings: &AppSettings, quiet: bool) -> ScanConfig {
        let host = self.host.clone().unwrap_or_else(|| settings.host.clone());
        let ports = self.ports.clone().unwrap_or_else(|| settings.ports.clone());
        let workers = self.workers.unwrap_or_else(|| settings.worker_count());
        let timeout = self
            .timeout
            .map(Duration::from_millis)
            .or_else(|| settings.timeout());

        ScanConfig::new(host, ports, workers)
            .with_timeout(timeout)
            .with_live_feedback(settings.live_feedback && !quiet)
    }

    /// Execute the scan and print the report.
    pub async fn execute(
        &self,
        settings: &AppSettings,
        quiet: bool,
        cancel: CancellationToken,
    ) -> CliResult<ScanReport> {
        let config = self.scan_config(settings, quiet);
        let coordinator = Coordinator::new(config);

        let report = coordinator.run(cancel).await?;

        if !report.is_complete() {
            output::print_warning(&format!(
                "scan interrupted after {} of {} ports",
                report.ports_scanned, report.ports_requested
            ));
        }

        output::print_results(&report, self.output)?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, ScanError};
    use crate::types::ParseError;

    fn command() -> ScanCommand {
        ScanCommand {
            host: None,
            ports: None,
            workers: None,
            timeout: None,
            output: OutputFormat::Plain,
        }
    }

    #[test]
    fn test_settings_fill_unset_options() {
        let settings = AppSettings {
            host: "192.0.2.1".to_string(),
            ports: "80".to_string(),
            workers: Some(3),
            timeout_ms: Some(750),
            live_feedback: true,
        };

        let config = command().scan_config(&settings, false);
        assert_eq!(config.host, "192.0.2.1");
        assert_eq!(config.ports, "80");
        assert_eq!(config.workers, 3);
        assert_eq!(config.timeout, Some(Duration::from_millis(750)));
        assert!(config.live_feedback);
    }

    #[test]
    fn test_flags_override_settings() {
        let cmd = ScanCommand {
            host: Some("10.0.0.1".to_string()),
            ports: Some("22-25".to_string()),
            workers: Some(16),
            timeout: Some(100),
            output: OutputFormat::Json,
        };

        let config = cmd.scan_config(&AppSettings::default(), true);
        assert_eq!(config.host, "10.0.0.1");
        assert_eq!(config.ports, "22-25");
        assert_eq!(config.workers, 16);
        assert_eq!(config.timeout, Some(Duration::from_millis(100)));
        assert!(!config.live_feedback);
    }

    #[test]
    fn test_default_workers_follow_cpu_count() {
        let config = command().scan_config(&AppSettings::default(), false);
        assert_eq!(config.workers, num_cpus::get());
        assert_eq!(config.timeout, None);
    }

    #[tokio::test]
    async fn test_malformed_ports_fail_before_scanning() {
        let cmd = ScanCommand {
            ports: Some("1-2-3".to_string()),
            ..command()
        };

        let err = cmd
            .execute(&AppSettings::default(), true, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Scan(ScanError::Parse(ParseError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_parse_workers() {
        assert_eq!(parse_workers("4"), Ok(4));
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("-1").is_err());
    }
}
