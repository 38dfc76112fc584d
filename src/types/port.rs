//! Port types with validation and parsing.
//!
//! `Port` is a plain newtype over `u16`. Probe results are tagged
//! (see [`ProbeOutcome`](crate::scanner::ProbeOutcome)), so no port value is
//! reserved and every `u16` is a valid port.
//!
//! `PortSpec` handles the compact `"80"` / `"22-100"` specification and its
//! expansion into the ordered list of ports to probe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A TCP port number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Wrap a raw port number.
    #[inline]
    pub const fn new(port: u16) -> Self {
        Self(port)
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for Port {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Which token of a port specification failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The lower bound of `"from-to"`.
    From,
    /// The upper bound of `"from-to"`.
    To,
    /// The only token of a single-port specification.
    Single,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => write!(f, "from"),
            Self::To => write!(f, "to"),
            Self::Single => write!(f, "single"),
        }
    }
}

/// Error type for port specification parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid port specification '{0}' (expected e.g. 80 or 22-100)")]
    InvalidFormat(String),
    #[error("invalid '{which}' port: '{token}'")]
    InvalidPort { which: Endpoint, token: String },
}

/// An inclusive range of ports, always stored with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a range from two endpoints in either order.
    pub fn new(a: Port, b: Port) -> Self {
        if a > b {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    pub const fn start(&self) -> Port {
        self.start
    }

    pub const fn end(&self) -> Port {
        self.end
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    /// A range always holds at least one port.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in this range, ascending.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A parsed port specification.
///
/// Supports exactly two shapes:
/// - Single port: "80"
/// - Inclusive range: "22-100" (swapped endpoints such as "100-22" are normalized)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSpec {
    Single(Port),
    Range(PortRange),
}

impl PortSpec {
    /// Expand into the ordered list of ports to probe.
    pub fn ports(&self) -> Vec<Port> {
        match self {
            Self::Single(port) => vec![*port],
            Self::Range(range) => range.iter().collect(),
        }
    }
}

fn parse_token(token: &str, which: Endpoint) -> Result<Port, ParseError> {
    token
        .parse::<u16>()
        .map(Port)
        .map_err(|_| ParseError::InvalidPort {
            which,
            token: token.to_string(),
        })
}

impl FromStr for PortSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.trim().split('-').collect();

        match tokens.as_slice() {
            [single] => Ok(Self::Single(parse_token(single, Endpoint::Single)?)),
            [from, to] => {
                let from = parse_token(from, Endpoint::From)?;
                let to = parse_token(to, Endpoint::To)?;
                Ok(Self::Range(PortRange::new(from, to)))
            }
            _ => Err(ParseError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(port) => write!(f, "{}", port),
            Self::Range(range) => write!(f, "{}-{}", range.start(), range.end()),
        }
    }
}

/// Expand a port specification into an ascending list of unique ports.
pub fn expand(spec: &str) -> Result<Vec<Port>, ParseError> {
    Ok(spec.parse::<PortSpec>()?.ports())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ports: Vec<Port>) -> Vec<u16> {
        ports.into_iter().map(u16::from).collect()
    }

    #[test]
    fn test_every_u16_is_a_port() {
        assert_eq!(Port::new(0).as_u16(), 0);
        assert_eq!(u16::from(Port::from(65535)), 65535);
        assert_eq!(Port::new(8080).to_string(), "8080");
    }

    #[test]
    fn test_expand_single() {
        assert_eq!(raw(expand("80").unwrap()), vec![80]);
        assert_eq!(raw(expand("65535").unwrap()), vec![65535]);
    }

    #[test]
    fn test_expand_range() {
        assert_eq!(raw(expand("20-22").unwrap()), vec![20, 21, 22]);
        assert_eq!(expand("1-100").unwrap().len(), 100);
        assert_eq!(raw(expand("7-7").unwrap()), vec![7]);
    }

    #[test]
    fn test_expand_reversed_range() {
        let ports = raw(expand("100-90").unwrap());
        assert_eq!(ports, (90..=100).collect::<Vec<u16>>());
    }

    #[test]
    fn test_expand_full_space_has_no_duplicates() {
        let ports = expand("65535-0").unwrap();
        assert_eq!(ports.len(), 65536);
        assert!(ports.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_expand_is_idempotent() {
        assert_eq!(expand("5400-5500").unwrap(), expand("5400-5500").unwrap());
    }

    #[test]
    fn test_invalid_format() {
        assert!(matches!(expand("1-2-3"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(expand("--"), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_invalid_port_identifies_endpoint() {
        assert!(matches!(
            expand(""),
            Err(ParseError::InvalidPort { which: Endpoint::Single, .. })
        ));
        assert!(matches!(
            expand("abc"),
            Err(ParseError::InvalidPort { which: Endpoint::Single, .. })
        ));
        assert!(matches!(
            expand("abc-10"),
            Err(ParseError::InvalidPort { which: Endpoint::From, .. })
        ));
        assert!(matches!(
            expand("1-abc"),
            Err(ParseError::InvalidPort { which: Endpoint::To, .. })
        ));
        assert!(matches!(
            expand("70000"),
            Err(ParseError::InvalidPort { which: Endpoint::Single, .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = expand("1-abc").unwrap_err();
        assert_eq!(err.to_string(), "invalid 'to' port: 'abc'");
    }

    #[test]
    fn test_spec_display() {
        let spec: PortSpec = "100-90".parse().unwrap();
        assert_eq!(spec.to_string(), "90-100");
        assert_eq!(spec.ports().len(), 11);

        let spec: PortSpec = " 8080 ".parse().unwrap();
        assert_eq!(spec, PortSpec::Single(Port::new(8080)));
    }

    #[test]
    fn test_range_normalizes_endpoints() {
        let range = PortRange::new(Port::new(30), Port::new(10));
        assert_eq!(range.start(), Port::new(10));
        assert_eq!(range.end(), Port::new(30));
        assert_eq!(range.len(), 21);
        assert_eq!(range.to_string(), "10-30");
    }
}
