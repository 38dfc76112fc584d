//! Accumulator for ports confirmed open during a scan.

use super::Port;
use serde::{Deserialize, Serialize};

/// Ports confirmed open, in arrival order until [`finalize`](Self::finalize)
/// sorts them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenPortSet(Vec<Port>);

impl OpenPortSet {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, port: Port) {
        self.0.push(port);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, port: Port) -> bool {
        self.0.contains(&port)
    }

    pub fn as_slice(&self) -> &[Port] {
        &self.0
    }

    /// Sort ascending. Results arrive in completion order, so this must run
    /// before the set is reported.
    pub fn finalize(mut self) -> Self {
        self.0.sort_unstable();
        self
    }
}

impl FromIterator<Port> for OpenPortSet {
    fn from_iter<I: IntoIterator<Item = Port>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
