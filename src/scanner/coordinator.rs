//! Scan coordinator.
//!
//! Owns the lifecycle of one scan run: expands the port specification,
//! starts the worker pool, feeds it from a producer task, and collects
//! exactly one outcome per submitted port unless cancelled first.

use crate::error::ScanResult;
use crate::scanner::pool::{PoolConfig, WorkerPool};
use crate::scanner::tcp::TcpConnector;
use crate::scanner::traits::{ProbeOutcome, SharedConnector};
use crate::types::{expand, OpenPortSet, Port};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Immutable configuration for one scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Target host (IP address or hostname).
    pub host: String,
    /// Port specification, e.g. "80" or "22-100".
    pub ports: String,
    /// Number of concurrent workers.
    pub workers: usize,
    /// Per-connection timeout; `None` keeps the OS default.
    pub timeout: Option<Duration>,
    /// Print a `CLOSED` line for every failed probe.
    pub live_feedback: bool,
}

impl ScanConfig {
    /// Create a new scan configuration.
    pub fn new(host: impl Into<String>, ports: impl Into<String>, workers: usize) -> Self {
        Self {
            host: host.into(),
            ports: ports.into(),
            workers,
            timeout: None,
            live_feedback: false,
        }
    }

    /// Set the connect timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable per-port `CLOSED` lines.
    pub fn with_live_feedback(mut self, enabled: bool) -> Self {
        self.live_feedback = enabled;
        self
    }
}

/// How a scan run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// Every submitted port produced a result.
    Completed,
    /// Cancelled before collection finished; the open set is partial.
    Interrupted,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Result of a scan run.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub host: String,
    pub status: ScanStatus,
    pub ports_requested: usize,
    pub ports_scanned: usize,
    pub open_ports: OpenPortSet,
    pub duration_ms: u64,
}

impl ScanReport {
    pub fn is_complete(&self) -> bool {
        self.status == ScanStatus::Completed
    }
}

/// Drives one scan run from port specification to open-port report.
pub struct Coordinator {
    config: ScanConfig,
    connector: SharedConnector,
}

impl Coordinator {
    /// Create a coordinator probing over real TCP.
    pub fn new(config: ScanConfig) -> Self {
        let mut connector = TcpConnector::new();
        if let Some(timeout) = config.timeout {
            connector = connector.with_timeout(timeout);
        }
        Self::with_connector(config, Arc::new(connector))
    }

    /// Create a coordinator probing through a custom connector.
    pub fn with_connector(config: ScanConfig, connector: SharedConnector) -> Self {
        Self { config, connector }
    }

    /// Run the scan to completion or until `cancel` fires.
    ///
    /// A malformed port specification or a zero worker count fails before
    /// any worker starts. Connection failures never fail the run. On
    /// cancellation the producer and workers are aborted and the open ports
    /// collected so far are returned with [`ScanStatus::Interrupted`].
    pub async fn run(&self, cancel: CancellationToken) -> ScanResult<ScanReport> {
        let ports = expand(&self.config.ports)?;
        let total = ports.len();
        let start = Instant::now();

        let pool_config = PoolConfig::new(self.config.host.clone(), self.config.workers)
            .with_live_feedback(self.config.live_feedback);
        let (mut pool, tasks) = WorkerPool::spawn(pool_config, Arc::clone(&self.connector))?;

        info!(
            host = %self.config.host,
            ports = total,
            workers = pool.size(),
            "scan started"
        );

        let producer = tokio::spawn(feed(tasks, ports));

        let mut open_ports = OpenPortSet::new();
        let mut collected = 0usize;

        let status = loop {
            if collected == total {
                break ScanStatus::Completed;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break ScanStatus::Interrupted,
                outcome = pool.next_result() => match outcome {
                    Some(ProbeOutcome::Open(port)) => {
                        collected += 1;
                        open_ports.insert(port);
                    }
                    Some(ProbeOutcome::Closed { .. }) => collected += 1,
                    // Every worker is gone; joining below reports why.
                    None => break ScanStatus::Completed,
                },
            }
        };

        match status {
            ScanStatus::Completed => {
                producer.await?;
                pool.join().await?;
            }
            ScanStatus::Interrupted => {
                warn!(collected, total, "scan interrupted, reporting partial results");
                producer.abort();
                pool.abort().await;
                if let Err(err) = producer.await {
                    debug!(error = %err, "producer stopped");
                }
            }
        }

        let open_ports = open_ports.finalize();
        let duration = start.elapsed();

        info!(
            open = open_ports.len(),
            scanned = collected,
            elapsed_ms = duration.as_millis() as u64,
            "scan finished"
        );

        Ok(ScanReport {
            host: self.config.host.clone(),
            status,
            ports_requested: total,
            ports_scanned: collected,
            open_ports,
            duration_ms: duration.as_millis() as u64,
        })
    }
}

/// Feed every port into the task channel, blocking while it is full.
async fn feed(tasks: async_channel::Sender<Port>, ports: Vec<Port>) {
    for port in ports {
        if tasks.send(port).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ScanError};
    use crate::scanner::mock::MockConnector;
    use crate::types::ParseError;

    fn coordinator(spec: &str, workers: usize, mock: MockConnector) -> Coordinator {
        Coordinator::with_connector(ScanConfig::new("target", spec, workers), Arc::new(mock))
    }

    #[tokio::test]
    async fn test_parse_error_before_scanning() {
        let mock = Arc::new(MockConnector::new().open_by_default());
        let coord = Coordinator::with_connector(ScanConfig::new("target", "1-2-3", 2), mock.clone());

        let err = coord.run(CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, ScanError::Parse(ParseError::InvalidFormat(_))));
        assert_eq!(mock.attempts(), 0);
    }

    #[tokio::test]
    async fn test_zero_workers_is_config_error() {
        let coord = coordinator("80", 0, MockConnector::new());
        let err = coord.run(CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, ScanError::Config(ConfigError::InvalidWorkers(0))));
    }

    #[tokio::test]
    async fn test_collects_one_result_per_port() {
        let coord = coordinator("1-50", 4, MockConnector::new().with_open_ports("target", [7u16, 3, 42]));
        let report = coord.run(CancellationToken::new()).await.unwrap();

        assert_eq!(report.status, ScanStatus::Completed);
        assert_eq!(report.ports_requested, 50);
        assert_eq!(report.ports_scanned, 50);
        assert_eq!(
            report.open_ports.as_slice(),
            &[Port::new(3), Port::new(7), Port::new(42)]
        );
    }

    #[tokio::test]
    async fn test_cancelled_before_start_reports_empty() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let coord = coordinator("1-100", 2, MockConnector::new().open_by_default());
        let report = coord.run(cancel).await.unwrap();

        assert_eq!(report.status, ScanStatus::Interrupted);
        assert!(!report.is_complete());
        assert!(report.open_ports.is_empty());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ScanStatus::Completed.to_string(), "completed");
        assert_eq!(ScanStatus::Interrupted.to_string(), "interrupted");
    }
}
