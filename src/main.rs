//! faro - Cross-ecosystem dependency update checker CLI
//!
//! Lists outdated dependencies for Go, npm, yarn, pnpm, pip, Poetry and uv
//! projects, and upgrades them on request.

use clap::Parser;
use faro::cli::CliArgs;
use faro::detector;
use faro::orchestrator::{Orchestrator, RunConfig};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.log_level());

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let manager = detector::resolve(&args.path, args.manager)?;
    debug!(%manager, path = %args.path.display(), "resolved package manager");

    let mut config = RunConfig::from_args(&args, manager);
    config.color = io::stdout().is_terminal();
    config.progress = config.progress && io::stderr().is_terminal();

    let mut orchestrator = Orchestrator::from_config(config)?;
    let mut stdout = io::stdout();
    let outcome = orchestrator.run(&mut stdout).await?;
    stdout.flush()?;

    debug!(?outcome, "run finished");
    Ok(ExitCode::SUCCESS)
}
