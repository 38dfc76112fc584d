//! Scanner module - the worker-pool scanning engine.
//!
//! The [`Coordinator`] expands a port specification, starts a fixed-size
//! [`WorkerPool`] and collects one [`ProbeOutcome`] per port. Probes go
//! through the [`Connector`] capability: [`TcpConnector`] for real scans,
//! [`MockConnector`] for tests.

pub mod coordinator;
pub mod mock;
pub mod pool;
pub mod tcp;
pub mod traits;

pub use coordinator::{Coordinator, ScanConfig, ScanReport, ScanStatus};
pub use mock::MockConnector;
pub use pool::{PoolConfig, WorkerPool};
pub use tcp::{TcpConnection, TcpConnector};
pub use traits::{Connection, Connector, ProbeOutcome, SharedConnector};
