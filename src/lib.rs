//! # portpool - A Concurrent TCP Port Scanner
//!
//! portpool probes a range of TCP ports on one host through a fixed-size
//! pool of concurrent workers and reports the ports that accept a
//! connection.
//!
//! ## Features
//!
//! - **Bounded Parallelism**: exactly `workers` probes in flight at once
//! - **Early Termination**: cancellation reports the open ports found so far
//! - **Pluggable Connector**: real TCP or an in-memory test double
//! - **Output Formats**: plain text and JSON
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portpool::scanner::{Coordinator, ScanConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScanConfig::new("127.0.0.1", "20-1024", 64);
//!     let report = Coordinator::new(config)
//!         .run(CancellationToken::new())
//!         .await
//!         .unwrap();
//!
//!     for port in report.open_ports.as_slice() {
//!         println!("{} - OPEN", port);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Port, port specification parsing and the open-port set
//! - [`scanner`] - Connector capability, worker pool and coordinator
//! - [`config`] - Settings file management
//! - [`cli`] - Command-line surface
//! - [`output`] - Report rendering and live feedback
//! - [`signal`] - Ctrl+C / SIGTERM cancellation
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod signal;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConnectError, ScanError};
pub use scanner::{Coordinator, ProbeOutcome, ScanConfig, ScanReport, ScanStatus};
pub use types::{expand, OpenPortSet, ParseError, Port, PortSpec};
