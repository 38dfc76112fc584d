//! In-memory connector for exercising the worker pool without a network.

use crate::error::ConnectError;
use crate::scanner::traits::{Connection, Connector};
use crate::types::Port;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Connector whose outcomes are configured per `(host, port)` pair.
///
/// Pairs marked open connect successfully; every other pair fails with
/// `ConnectError::Refused` unless the default is flipped with
/// [`open_by_default`](Self::open_by_default).
#[derive(Debug, Default)]
pub struct MockConnector {
    open: HashSet<(String, Port)>,
    closed: HashSet<(String, Port)>,
    open_by_default: bool,
    latency: Duration,
    port_latency: HashMap<Port, Duration>,
    attempts: AtomicUsize,
    closes: Arc<AtomicUsize>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `host:port` as accepting connections.
    pub fn with_open(mut self, host: impl Into<String>, port: impl Into<Port>) -> Self {
        self.open.insert((host.into(), port.into()));
        self
    }

    /// Mark every port in `ports` on `host` as accepting connections.
    pub fn with_open_ports<I, P>(mut self, host: &str, ports: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Port>,
    {
        for port in ports {
            self.open.insert((host.to_string(), port.into()));
        }
        self
    }

    /// Mark `host:port` as refusing connections, overriding the default.
    pub fn with_closed(mut self, host: impl Into<String>, port: impl Into<Port>) -> Self {
        self.closed.insert((host.into(), port.into()));
        self
    }

    /// Accept connections on every pair not explicitly closed.
    pub fn open_by_default(mut self) -> Self {
        self.open_by_default = true;
        self
    }

    /// Delay every dial by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Delay dials to `port` by `latency` instead of the global latency.
    pub fn with_port_latency(mut self, port: impl Into<Port>, latency: Duration) -> Self {
        self.port_latency.insert(port.into(), latency);
        self
    }

    /// Number of dial attempts made so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Number of connections closed so far.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    fn accepts(&self, host: &str, port: Port) -> bool {
        let key = (host.to_string(), port);
        if self.closed.contains(&key) {
            return false;
        }
        self.open_by_default || self.open.contains(&key)
    }
}

struct MockConnection {
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl Connection for MockConnection {
    async fn close(self: Box<Self>) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn dial(&self, host: &str, port: Port) -> Result<Box<dyn Connection>, ConnectError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let delay = self.port_latency.get(&port).copied().unwrap_or(self.latency);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.accepts(host, port) {
            Ok(Box::new(MockConnection {
                closes: Arc::clone(&self.closes),
            }))
        } else {
            Err(ConnectError::Refused)
        }
    }
}
