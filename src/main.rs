mod cli;
mod config;
mod display;
mod error;
mod export;
mod parser;
mod schedule;
mod web;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use cli::{Cli, Command, GenerateArgs};
use config::GeneratorConfig;
use display::{print_result_set, write_result_set_to_file};
use error::ScheduleError;
use export::export_result_set_to_csv;
use parser::{load_blackouts, load_roster};
use schedule::{generate_with, parse_date, unmatched_blackouts, week_range, Blackouts, CancelToken};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = GeneratorConfig::from_env().context("loading configuration")?;

    match cli.command {
        Command::Serve { port } => {
            web::start_server(port, config).await?;
        }
        Command::Generate(args) => {
            run_generate(args, config).await?;
        }
    }

    Ok(())
}

async fn run_generate(args: GenerateArgs, config: GeneratorConfig) -> Result<()> {
    let config = config.with_overrides(args.quota, args.attempt_budget)?;

    let personnel = load_roster(&args.roster)
        .with_context(|| format!("loading roster from {}", args.roster.display()))?;
    if personnel.is_empty() {
        return Err(ScheduleError::EmptyRoster.into());
    }
    info!("Loaded {} personnel", personnel.len());

    let blackouts = match &args.blackouts {
        Some(path) => load_blackouts(path)
            .with_context(|| format!("loading blackouts from {}", path.display()))?,
        None => Blackouts::new(),
    };

    let weeks = week_range(parse_date(&args.start)?, parse_date(&args.end)?)?;
    for (name, week) in unmatched_blackouts(&weeks, &blackouts) {
        warn!(name = %name, week = %week, "Blackout outside the schedule period is ignored");
    }

    // Search runs off the async runtime so Ctrl-C can stop it between attempts
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();
    let run_weeks = weeks.clone();
    let mut handle = tokio::task::spawn_blocking(move || {
        generate_with(
            &personnel,
            &run_weeks,
            &blackouts,
            &config,
            &mut rand::thread_rng(),
            Some(&worker_cancel),
        )
    });

    let result = tokio::select! {
        joined = &mut handle => joined?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, keeping the options found so far");
            cancel.cancel();
            handle.await?
        }
    };

    print_result_set(&result, &weeks);

    if let Some(path) = &args.output {
        export_result_set_to_csv(&result, &weeks, path)?;
        println!("Schedules exported to {}", path.display());
    }
    if let Some(filename) = &args.text {
        write_result_set_to_file(&result, &weeks, filename)?;
        println!("Schedules saved to {}", filename);
    }

    Ok(())
}
