//! Live feedback emitted by workers while a scan is running.

use super::plain::print_closed;
use crate::error::ConnectError;
use crate::types::Port;
use std::fmt;
use std::sync::Arc;

/// Receives a notification for every failed connection attempt, as it fails.
pub trait Feedback: Send + Sync + fmt::Debug {
    fn port_closed(&self, port: Port, reason: &ConnectError);
}

/// A feedback sink shared across workers.
pub type SharedFeedback = Arc<dyn Feedback>;

/// Prints `<port> CLOSED (<detail>)` to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutFeedback;

impl Feedback for StdoutFeedback {
    fn port_closed(&self, port: Port, reason: &ConnectError) {
        print_closed(port, reason);
    }
}
