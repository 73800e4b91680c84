use anyhow::Context;
use clap::Parser;
use portsweep::cli::{self, Cli};
use portsweep::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log to stderr so the report on stdout stays clean. `RUST_LOG` wins over
/// the verbosity flag.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "portsweep=debug,info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn try_main(cli: Cli) -> anyhow::Result<()> {
    cli::run(&cli)
        .await
        .with_context(|| format!("scan of {} failed", cli.target))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match try_main(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
