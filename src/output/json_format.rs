//! JSON output formatting.

use crate::scanner::ScanReport;
use std::io::{self, Write};

/// Write the report as pretty JSON.
pub fn write_json<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// Print the report as pretty JSON to stdout.
pub fn print_json(report: &ScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_json(&mut out, report)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanStatus;
    use crate::types::{OpenPortSet, Port};

    #[test]
    fn test_json_shape() {
        let report = ScanReport {
            host: "127.0.0.1".to_string(),
            status: ScanStatus::Interrupted,
            ports_requested: 10,
            ports_scanned: 4,
            open_ports: [Port::new(22)].into_iter().collect::<OpenPortSet>(),
            duration_ms: 12,
        };

        let mut buf = Vec::new();
        write_json(&mut buf, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["status"], "interrupted");
        assert_eq!(value["open_ports"], serde_json::json!([22]));
        assert_eq!(value["ports_scanned"], 4);
    }
}
