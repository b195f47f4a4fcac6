//! CLI command definitions for the `goalbot` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod check;
pub mod goals;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// AI goal-planning bot for Telegram.
#[derive(Parser)]
#[command(name = "goalbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the bot and poll Telegram for updates.
    Run,

    /// Verify connectivity to Telegram and the completion API.
    Check,

    /// List goal pages previously saved to Notion.
    #[command(alias = "ls")]
    List,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
