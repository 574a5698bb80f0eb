//! CLI argument parsing for the call-scheduler binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "call-scheduler", about = "Generates weekly on-call schedule options")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate schedule options from a roster CSV
    Generate(GenerateArgs),
    /// Start the HTTP server
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Roster CSV with id, name and group columns
    #[arg(long)]
    pub roster: PathBuf,
    /// First week, a Friday (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,
    /// Last day of the schedule period (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,
    /// Blackout CSV with name and week columns
    #[arg(long)]
    pub blackouts: Option<PathBuf>,
    /// Number of distinct options to look for
    #[arg(long)]
    pub quota: Option<usize>,
    /// Maximum number of attempts
    #[arg(long)]
    pub attempt_budget: Option<usize>,
    /// Write the options as CSV to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Write the options as text to this file
    #[arg(long)]
    pub text: Option<String>,
}
