//! Fixed-size worker pool.
//!
//! Exactly `workers` tasks pull ports from a shared bounded task channel,
//! probe them through the connector and push one [`ProbeOutcome`] per port
//! onto the results channel. Workers never talk to each other; the two
//! channels are the only shared state.

use crate::error::{ConfigError, ConfigResult};
use crate::output::{SharedFeedback, StdoutFeedback};
use crate::scanner::traits::{ProbeOutcome, SharedConnector};
use crate::types::Port;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, trace};

/// Configuration for a worker pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Host every worker probes.
    pub host: String,
    /// Number of concurrent workers (at least 1).
    pub workers: usize,
    /// Where closed ports are reported as they happen; `None` is silent.
    pub feedback: Option<SharedFeedback>,
}

impl PoolConfig {
    pub fn new(host: impl Into<String>, workers: usize) -> Self {
        Self {
            host: host.into(),
            workers,
            feedback: None,
        }
    }

    /// Print a `CLOSED` line to stdout for every closed port.
    pub fn with_live_feedback(mut self, enabled: bool) -> Self {
        self.feedback = if enabled {
            Some(Arc::new(StdoutFeedback))
        } else {
            None
        };
        self
    }

    /// Report closed ports to a custom sink.
    pub fn with_feedback(mut self, feedback: SharedFeedback) -> Self {
        self.feedback = Some(feedback);
        self
    }
}

/// A running pool of probe workers.
///
/// Dropping the task sender returned by [`spawn`](Self::spawn) closes the
/// task channel; each worker exits once the channel is closed and drained.
pub struct WorkerPool {
    results: mpsc::Receiver<ProbeOutcome>,
    workers: JoinSet<()>,
    size: usize,
}

impl WorkerPool {
    /// Start `config.workers` workers.
    ///
    /// Returns the pool together with the sending half of the task channel,
    /// whose capacity equals the worker count.
    pub fn spawn(
        config: PoolConfig,
        connector: SharedConnector,
    ) -> ConfigResult<(Self, async_channel::Sender<Port>)> {
        if config.workers == 0 {
            return Err(ConfigError::InvalidWorkers(config.workers));
        }

        let (task_tx, task_rx) = async_channel::bounded::<Port>(config.workers);
        let (result_tx, result_rx) = mpsc::channel::<ProbeOutcome>(config.workers);

        let host: Arc<str> = Arc::from(config.host);
        let mut workers = JoinSet::new();

        for id in 0..config.workers {
            workers.spawn(worker(
                id,
                Arc::clone(&host),
                task_rx.clone(),
                result_tx.clone(),
                Arc::clone(&connector),
                config.feedback.clone(),
            ));
        }

        debug!(workers = config.workers, host = %host, "worker pool started");

        let pool = Self {
            results: result_rx,
            workers,
            size: config.workers,
        };
        Ok((pool, task_tx))
    }

    /// Number of workers the pool was started with.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Wait for the next probe outcome, in completion order.
    ///
    /// Returns `None` once every worker has exited and the results channel
    /// is drained.
    pub async fn next_result(&mut self) -> Option<ProbeOutcome> {
        self.results.recv().await
    }

    /// Wait for every worker to exit. The task sender must already be dropped.
    pub async fn join(mut self) -> Result<(), JoinError> {
        self.results.close();
        while let Some(res) = self.workers.join_next().await {
            res?;
        }
        Ok(())
    }

    /// Abort every worker without waiting for in-flight probes.
    pub async fn abort(mut self) {
        self.results.close();
        self.workers.shutdown().await;
    }
}

async fn worker(
    id: usize,
    host: Arc<str>,
    tasks: async_channel::Receiver<Port>,
    results: mpsc::Sender<ProbeOutcome>,
    connector: SharedConnector,
    feedback: Option<SharedFeedback>,
) {
    while let Ok(port) = tasks.recv().await {
        let outcome = match connector.dial(&host, port).await {
            Ok(conn) => {
                conn.close().await;
                debug!(worker = id, port = %port, "port open");
                ProbeOutcome::Open(port)
            }
            Err(reason) => {
                trace!(worker = id, port = %port, error = %reason, "port closed");
                if let Some(feedback) = &feedback {
                    feedback.port_closed(port, &reason);
                }
                ProbeOutcome::Closed { port, reason }
            }
        };

        if results.send(outcome).await.is_err() {
            break;
        }
    }

    trace!(worker = id, "worker exiting");
}
