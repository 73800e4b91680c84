//! Tabular result report.
//!
//! Results are re-sorted by port before display, so completion order never
//! leaks into the output.

use crate::config::ColorChoice;
use crate::scanner::{PortStatus, ProbeResult};
use console::Style;
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

/// Placeholder for empty fields.
const EMPTY_FIELD: &str = "-";

/// Placeholder for an open port whose service is not in the table.
const UNKNOWN_SERVICE: &str = "unknown";

/// Styles applied by the reporter.
#[derive(Debug, Clone)]
pub struct ReportStyle {
    pub open: Style,
    pub closed: Style,
    pub header: Style,
}

impl ReportStyle {
    /// Green/red status colors, always emitted.
    pub fn colored() -> Self {
        Self {
            open: Style::new().green().bold().force_styling(true),
            closed: Style::new().red().force_styling(true),
            header: Style::new().bold().force_styling(true),
        }
    }

    /// No escape codes at all.
    pub fn plain() -> Self {
        Self {
            open: Style::new().force_styling(false),
            closed: Style::new().force_styling(false),
            header: Style::new().force_styling(false),
        }
    }

    /// Pick colored or plain output for stdout.
    pub fn for_stdout(choice: ColorChoice) -> Self {
        let enabled = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => console::colors_enabled(),
        };
        if enabled {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self::for_stdout(ColorChoice::Auto)
    }
}

/// Renders scan results as a fixed-width table.
#[derive(Debug, Clone)]
pub struct Reporter {
    style: ReportStyle,
    banner_width: usize,
}

impl Reporter {
    /// Default maximum banner characters shown per row.
    pub const DEFAULT_BANNER_WIDTH: usize = 60;

    /// Create a reporter with the given style.
    pub fn new(style: ReportStyle) -> Self {
        Self {
            style,
            banner_width: Self::DEFAULT_BANNER_WIDTH,
        }
    }

    /// Set the maximum banner width in characters.
    pub fn with_banner_width(mut self, width: usize) -> Self {
        self.banner_width = width;
        self
    }

    /// Write the report for `results` to `out`.
    pub fn report(&self, results: &[ProbeResult], out: &mut impl Write) -> io::Result<()> {
        out.write_all(self.render(results).as_bytes())?;
        out.flush()
    }

    /// Write the report to stdout.
    pub fn print(&self, results: &[ProbeResult]) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.report(results, &mut out)
    }

    /// Render the report as text.
    pub fn render(&self, results: &[ProbeResult]) -> String {
        let rows = sorted_by_port(results);
        let mut text = String::new();

        text.push_str("\nScan results:\n");
        let header = format!("{:<8}{:<10}{:<15}{}", "PORT", "STATUS", "SERVICE", "BANNER");
        text.push_str(&self.style.header.apply_to(header).to_string());
        text.push('\n');
        text.push_str(&"-".repeat(RULE_WIDTH));
        text.push('\n');

        for result in &rows {
            text.push_str(&self.render_row(result));
            text.push('\n');
        }

        let open = rows.iter().filter(|r| r.is_open()).count();
        text.push('\n');
        text.push_str(&format!(
            "{} open, {} closed ({} ports)\n",
            open,
            rows.len() - open,
            rows.len()
        ));

        text
    }

    fn render_row(&self, result: &ProbeResult) -> String {
        let status_style = match result.status {
            PortStatus::Open => &self.style.open,
            PortStatus::Closed => &self.style.closed,
        };
        // Pad before styling so escape codes do not count toward the width.
        let status = status_style.apply_to(format!("{:<10}", result.status.to_string()));

        format!(
            "{:<8}{}{:<15}{}",
            result.port,
            status,
            display_service(result),
            display_banner(&result.banner, self.banner_width)
        )
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(ReportStyle::default())
    }
}

/// Stable sort of results by ascending port number.
pub fn sorted_by_port(results: &[ProbeResult]) -> Vec<&ProbeResult> {
    let mut rows: Vec<&ProbeResult> = results.iter().collect();
    rows.sort_by_key(|r| r.port);
    rows
}

fn display_service(result: &ProbeResult) -> &str {
    match (result.status, result.service.is_empty()) {
        (_, false) => result.service.as_str(),
        (PortStatus::Open, true) => UNKNOWN_SERVICE,
        (PortStatus::Closed, true) => EMPTY_FIELD,
    }
}

/// Flatten a banner onto one line and truncate it on a character boundary.
fn display_banner(banner: &str, max_chars: usize) -> String {
    if banner.is_empty() {
        return EMPTY_FIELD.to_string();
    }

    let flat: String = banner
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    if flat.chars().count() <= max_chars {
        flat
    } else {
        let kept: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_reporter() -> Reporter {
        Reporter::new(ReportStyle::plain())
    }

    #[test]
    fn test_rows_sorted_by_port() {
        let results = vec![
            ProbeResult::closed(5),
            ProbeResult::open(3, "", "hi"),
            ProbeResult::closed(1),
            ProbeResult::closed(4),
            ProbeResult::closed(2),
        ];

        let text = plain_reporter().render(&results);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "Scan results:");
        assert_eq!(lines[2], "PORT    STATUS    SERVICE        BANNER");
        assert_eq!(lines[3], "-".repeat(60));
        assert_eq!(lines[4], "1       CLOSED    -              -");
        assert_eq!(lines[5], "2       CLOSED    -              -");
        assert_eq!(lines[6], "3       OPEN      unknown        hi");
        assert_eq!(lines[7], "4       CLOSED    -              -");
        assert_eq!(lines[8], "5       CLOSED    -              -");
        assert_eq!(lines[10], "1 open, 4 closed (5 ports)");
    }

    #[test]
    fn test_service_shown_for_open_port() {
        let text = plain_reporter().render(&[ProbeResult::open(22, "ssh", "")]);
        assert!(text.contains("22      OPEN      ssh            -"));
    }

    #[test]
    fn test_sort_is_stable() {
        let results = vec![
            ProbeResult::open(7, "first", ""),
            ProbeResult::closed(1),
            ProbeResult::open(7, "second", ""),
        ];
        let rows = sorted_by_port(&results);
        assert_eq!(rows[0].port, 1);
        assert_eq!(rows[1].service, "first");
        assert_eq!(rows[2].service, "second");
    }

    #[test]
    fn test_display_banner() {
        assert_eq!(display_banner("", 10), "-");
        assert_eq!(display_banner("220 ready\r\nmore", 60), "220 ready  more");
        assert_eq!(display_banner("abcdefghijkl", 8), "abcde...");
        assert_eq!(display_banner("\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}", 4), "\u{e9}...");
    }

    #[test]
    fn test_colored_style_distinguishes_status() {
        let reporter = Reporter::new(ReportStyle::colored());
        let text = reporter.render(&[ProbeResult::open(80, "http", ""), ProbeResult::closed(81)]);
        assert!(text.contains('\u{1b}'));

        let plain = plain_reporter().render(&[ProbeResult::open(80, "http", "")]);
        assert!(!plain.contains('\u{1b}'));
    }

    #[test]
    fn test_empty_results() {
        let text = plain_reporter().render(&[]);
        assert!(text.contains("0 open, 0 closed (0 ports)"));
    }

    #[test]
    fn test_report_writes_to_buffer() {
        let mut buf = Vec::new();
        plain_reporter()
            .report(&[ProbeResult::closed(1)], &mut buf)
            .unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("1       CLOSED"));
    }
}
