//! Plain text output formatting.
//!
//! The final report is the `Results` heading followed by one
//! `<port> - OPEN` line per open port, ascending. Diagnostics go to stderr
//! so stdout only carries scan output.

use crate::error::ConnectError;
use crate::scanner::ScanReport;
use crate::types::Port;
use console::style;
use std::io::{self, Write};

const RESULTS_HEADING: &str = "Results";
const RESULTS_RULE: &str = "------------------";

/// Write the open-port report.
pub fn write_plain<W: Write>(out: &mut W, open_ports: &[Port]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", RESULTS_HEADING)?;
    writeln!(out, "{}", RESULTS_RULE)?;
    for port in open_ports {
        writeln!(out, "{} - OPEN", port)?;
    }
    Ok(())
}

/// Print the open-port report to stdout.
pub fn print_plain(report: &ScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_plain(&mut out, report.open_ports.as_slice())?;
    out.flush()
}

/// Live feedback line for a failed probe.
pub fn closed_line(port: Port, reason: &ConnectError) -> String {
    format!("{} CLOSED ({})", port, reason)
}

/// Print the live feedback line for a failed probe.
pub fn print_closed(port: Port, reason: &ConnectError) {
    println!("{}", closed_line(port, reason));
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
