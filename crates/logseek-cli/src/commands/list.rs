//! List command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use logseek_core::LogStore;

use crate::context::CommandContext;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Also show created/updated times
    #[arg(long)]
    pub detail: bool,
}

pub async fn run(args: ListArgs, config: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::load(config)?;
    let profile = ctx.profile()?;
    let store = ctx.store(&profile)?;

    let repos = store
        .list_repos()
        .await
        .context("Failed to list repositories")?;

    if repos.is_empty() {
        output::note("No repositories.");
        return Ok(());
    }

    let width = repos.iter().map(|r| r.name.len()).max().unwrap_or(0) + 2;

    for repo in &repos {
        let current = profile.repo_name() == Some(repo.name.as_str());
        let marker = if current { "**" } else { "  " };
        // Pad before coloring so escape codes do not skew the columns.
        let name = format!("{:<width$}", repo.name);
        let name = if current {
            name.green().to_string()
        } else {
            name
        };
        if args.detail {
            println!(
                "{} {} {:<8} {:<8} created {}  updated {}",
                marker, name, repo.region, repo.retention, repo.created_at, repo.updated_at
            );
        } else {
            println!("{} {} {:<8} {}", marker, name, repo.region, repo.retention);
        }
    }

    Ok(())
}
