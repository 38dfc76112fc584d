//! Error types for portpool.
//!
//! Uses `thiserror` for ergonomic error definitions.

use crate::types::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Per-port connection failure.
///
/// Never aborts a scan: the worker pool turns it into a closed probe
/// outcome and the message becomes the live feedback detail.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("connection refused")]
    Refused,

    #[error("connection timed out")]
    Timeout,

    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("failed to resolve host: {0}")]
    Resolve(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ConnectError {
    /// Classify an I/O error returned by a connect attempt.
    pub fn from_io(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Self::Refused,
            io::ErrorKind::TimedOut => Self::Timeout,
            io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
                Self::Unreachable(err.to_string())
            }
            _ => {
                let msg = err.to_string().to_lowercase();
                if msg.contains("lookup") || msg.contains("resolve") || msg.contains("not known") {
                    Self::Resolve(err.to_string())
                } else if msg.contains("unreachable") {
                    Self::Unreachable(err.to_string())
                } else {
                    Self::Io(err)
                }
            }
        }
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),

    #[error("worker count must be at least 1 (got {0})")]
    InvalidWorkers(usize),
}

/// Run-aborting scan errors.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to parse ports to scan")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("scan task failed")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors surfaced by the command layer.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
