//! Output formatting module.
//!
//! Provides plain text and JSON renderers for scan reports, plus the live
//! feedback sink workers report closed ports to.

mod feedback;
mod json_format;
mod plain;

pub use feedback::{Feedback, SharedFeedback, StdoutFeedback};
pub use json_format::{print_json, write_json};
pub use plain::{
    closed_line, print_closed, print_error, print_plain, print_warning, write_plain,
};

use crate::cli::OutputFormat;
use crate::scanner::ScanReport;
use std::io;

/// Format and print a scan report according to the specified format.
pub fn print_results(report: &ScanReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => print_plain(report),
        OutputFormat::Json => print_json(report),
    }
}
