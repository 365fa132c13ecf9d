use anyhow::Result;
use appengine_deploy::cli::{print_report, run_command, AppEngineDeployCli};
use clap::Parser;
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = AppEngineDeployCli::parse();

    // Initialize tracing
    let level = if cli.quiet {
        tracing::Level::WARN
    } else {
        match cli.verbosity {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting appengine-deploy v{}", env!("CARGO_PKG_VERSION"));

    match run_command(&cli) {
        Ok(report) => {
            print_report(&report, cli.format);
            Ok(())
        }
        Err(e) => {
            error!("❌ {} failed", cli.command.operation());
            Err(e)
        }
    }
}
