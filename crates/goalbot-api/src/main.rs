//! GoalBot entry point.
//!
//! Binary name: `goalbot`
//!
//! Parses CLI arguments, loads configuration, wires the adapters, then
//! dispatches to the requested command (run / check / list).

mod cli;
mod command;
mod runner;
mod state;

use clap::Parser;
use clap_complete::generate;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,goalbot=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "goalbot", &mut std::io::stdout());
        return Ok(());
    }

    // Load config and wire adapters; a missing credential is fatal here.
    let state = AppState::init().await?;

    match cli.command {
        Commands::Run => {
            let cancel = CancellationToken::new();
            let ctrl_c_cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("shutdown requested");
                    ctrl_c_cancel.cancel();
                }
            });

            runner::run(state, cancel).await?;
        }

        Commands::Check => {
            cli::check::run_check(&state).await?;
        }

        Commands::List => {
            cli::goals::list_goals(&state).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
