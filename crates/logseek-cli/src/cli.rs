//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;

/// Search time-indexed log repositories from the terminal.
#[derive(Parser, Debug)]
#[command(name = "logseek")]
#[command(author, about, long_about = None)]
#[command(version = env!("LOGSEEK_VERSION"))]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// JSON config file overriding stored credentials for this run
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store an account's keys and select a repository
    Login(commands::login::LoginArgs),

    /// List stored accounts
    Accounts(commands::accounts::AccountsArgs),

    /// Switch to another stored account
    Switch(commands::switch::SwitchArgs),

    /// Remove a stored account
    Deluser(commands::deluser::DeluserArgs),

    /// Remove the whole profile file
    Clear(commands::clear::ClearArgs),

    /// List repositories visible to the current account
    List(commands::list::ListArgs),

    /// Select and/or describe a repository
    Repo(commands::repo::RepoArgs),

    /// Show one sample record from the current repository
    Sample(commands::sample::SampleArgs),

    /// Set the default time range in minutes
    Range(commands::range::RangeArgs),

    /// Search the current repository
    Query(commands::query::QueryArgs),

    /// Look up the log lines for a request id
    Reqid(commands::reqid::ReqidArgs),

    /// Log-count histogram over a time window
    #[command(hide = true)]
    Histogram(commands::histogram::HistogramArgs),
}
