//! logseek - CLI client for a remote log-database service.
//!
//! A thin wrapper over the `logseek-core` and `logseek-http` crates for
//! searching time-indexed log repositories from the terminal.

mod cli;
mod commands;
mod config;
mod context;
mod output;
mod profile;
mod render;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let config = cli.config.clone();
    match cli.command {
        Commands::Login(args) => commands::login::run(args, config.as_deref()).await,
        Commands::Accounts(args) => commands::accounts::run(args, config.as_deref()).await,
        Commands::Switch(args) => commands::switch::run(args, config.as_deref()).await,
        Commands::Deluser(args) => commands::deluser::run(args, config.as_deref()).await,
        Commands::Clear(args) => commands::clear::run(args, config.as_deref()).await,
        Commands::List(args) => commands::list::run(args, config.as_deref()).await,
        Commands::Repo(args) => commands::repo::run(args, config.as_deref()).await,
        Commands::Sample(args) => commands::sample::run(args, config.as_deref()).await,
        Commands::Range(args) => commands::range::run(args, config.as_deref()).await,
        Commands::Query(args) => commands::query::run(args, config.as_deref()).await,
        Commands::Reqid(args) => commands::reqid::run(args, config.as_deref()).await,
        Commands::Histogram(args) => commands::histogram::run(args, config.as_deref()).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
