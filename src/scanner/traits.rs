//! Connector trait abstraction.
//!
//! Defines the connection capability the worker pool probes through,
//! so the real TCP client and test doubles can be used interchangeably.

use crate::error::ConnectError;
use crate::types::Port;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// An established connection returned by a successful dial.
#[async_trait]
pub trait Connection: Send {
    /// Close the connection. Probes close immediately after connecting.
    async fn close(self: Box<Self>);
}

/// Capability to open a TCP connection to `host:port`.
///
/// # Example
///
/// ```ignore
/// use portpool::scanner::{Connector, ProbeOutcome};
///
/// async fn probe<C: Connector + ?Sized>(connector: &C, host: &str, port: Port) -> ProbeOutcome {
///     match connector.dial(host, port).await {
///         Ok(conn) => {
///             conn.close().await;
///             ProbeOutcome::Open(port)
///         }
///         Err(reason) => ProbeOutcome::Closed { port, reason },
///     }
/// }
/// ```
#[async_trait]
pub trait Connector: Send + Sync {
    /// Attempt a single connection. Failures are not retried.
    async fn dial(&self, host: &str, port: Port) -> Result<Box<dyn Connection>, ConnectError>;
}

/// A shared connector for use across workers.
pub type SharedConnector = Arc<dyn Connector>;

/// Outcome of probing one port.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The port accepted a connection.
    Open(Port),
    /// The connection attempt failed.
    Closed { port: Port, reason: ConnectError },
}

impl ProbeOutcome {
    pub fn port(&self) -> Port {
        match self {
            Self::Open(port) | Self::Closed { port, .. } => *port,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(port) => write!(f, "{} - OPEN", port),
            Self::Closed { port, reason } => write!(f, "{} CLOSED ({})", port, reason),
        }
    }
}
