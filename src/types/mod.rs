//! Core type definitions.
//!
//! Newtypes and parsed specifications shared by the scanner and the CLI.

mod open_ports;
mod port;

pub use open_ports::OpenPortSet;
pub use port::{expand, Endpoint, ParseError, Port, PortRange, PortSpec};
