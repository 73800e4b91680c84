//! Output module.
//!
//! Provides the result table, the progress line, and a few status
//! message helpers used by the command-line driver.

mod progress;
mod report;

pub use progress::{ProgressReporter, SilentProgress, TerminalProgress};
pub use report::{sorted_by_port, ReportStyle, Reporter};

use crate::types::{PortRange, ScanTarget};
use console::style;

/// Render the scan header line, emphasizing the target with `report_style.header`.
pub fn scan_header(target: &ScanTarget, range: PortRange, report_style: &ReportStyle) -> String {
    format!(
        "Starting scan on {} (ports {} to {})",
        report_style.header.apply_to(target),
        range.start(),
        range.end()
    )
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(target: &ScanTarget, range: PortRange, report_style: &ReportStyle) {
    println!("{}", scan_header(target, range, report_style));
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").for_stderr().red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").for_stderr().yellow().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> ScanTarget {
        ScanTarget::new("localhost", "127.0.0.1")
    }

    #[test]
    fn test_plain_header_has_no_escape_codes() {
        let header = scan_header(&target(), PortRange::new(1, 5), &ReportStyle::plain());
        assert_eq!(
            header,
            "Starting scan on localhost (127.0.0.1) (ports 1 to 5)"
        );
        assert!(!header.contains('\x1b'));
    }

    #[test]
    fn test_colored_header_emphasizes_target() {
        let header = scan_header(&target(), PortRange::new(1, 5), &ReportStyle::colored());
        assert!(header.contains('\x1b'));
        assert!(header.contains("localhost (127.0.0.1)"));
    }
}
