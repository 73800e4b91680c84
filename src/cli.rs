//! Command-line interface definitions for portsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing. The three
//! positional arguments are mandatory; clap prints usage and exits with a
//! non-zero status when they are missing or not valid port numbers.

use crate::config::{ColorChoice, ScanSettings};
use crate::error::CliResult;
use crate::output::{self, ProgressReporter, ReportStyle, Reporter, SilentProgress, TerminalProgress};
use crate::scanner::Coordinator;
use crate::types::{PortRange, ScanTarget};
use clap::Parser;
use std::path::PathBuf;

/// A concurrent TCP port scanner with banner grabbing.
#[derive(Parser, Debug)]
#[command(name = "scan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan a range of TCP ports and grab service banners", long_about = None)]
#[command(after_help = "Example: scan 127.0.0.1 1 1024")]
pub struct Cli {
    /// Target hostname or IP address
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// First port of the range (inclusive)
    #[arg(value_name = "START_PORT")]
    pub start_port: u16,

    /// Last port of the range (inclusive)
    #[arg(value_name = "END_PORT")]
    pub end_port: u16,

    /// Path to a JSON settings file
    #[arg(long, value_name = "PATH", env = "PORTSWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Do not show the progress line
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The requested port range.
    pub fn range(&self) -> PortRange {
        PortRange::new(self.start_port, self.end_port)
    }
}

/// Run a scan as described by the parsed arguments and print the report.
pub async fn run(cli: &Cli) -> CliResult<()> {
    let mut settings = ScanSettings::resolve(cli.config.as_deref())?;
    if cli.no_color {
        settings.color = ColorChoice::Never;
    }

    let range = cli.range();
    let target = ScanTarget::resolve(&cli.target).await;

    let report_style = ReportStyle::for_stdout(settings.color);
    output::print_scan_header(&target, range, &report_style);
    if range.is_reversed() {
        output::print_warning(&format!(
            "start port {} is greater than end port {}; no ports will be scanned",
            range.start(),
            range.end()
        ));
    }

    let worker_limit = settings.worker_limit_for(range.len());
    let coordinator = Coordinator::from_settings(&settings);

    let mut progress: Box<dyn ProgressReporter> = if cli.quiet {
        Box::new(SilentProgress)
    } else {
        Box::new(TerminalProgress::new())
    };

    let session = coordinator
        .scan(target, range, worker_limit, progress.as_mut())
        .await;
    println!();

    Reporter::new(report_style)
        .with_banner_width(settings.banner_width)
        .print(&session.sorted_results())?;

    Ok(())
}
