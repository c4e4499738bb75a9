//! Login command implementation.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use logseek_core::LogStore;

use crate::context::CommandContext;
use crate::output;
use crate::profile::{RepoCache, storage};
use crate::commands::sample::fetch_sample;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Access key
    pub access_key: String,

    /// Secret key
    pub secret_key: String,

    /// Alias to store the account under
    #[arg(long, default_value = "default")]
    pub alias: String,

    /// Service base URL
    #[arg(long)]
    pub endpoint: Option<String>,
}

pub async fn run(args: LoginArgs, config: Option<&Path>) -> Result<()> {
    let mut ctx = CommandContext::load(config)?;

    {
        let account = ctx.book.accounts.entry(args.alias.clone()).or_default();
        account.access_key = args.access_key;
        account.secret_key = args.secret_key;
        if let Some(endpoint) = &args.endpoint {
            account.endpoint = endpoint.clone();
        }
    }
    ctx.book.current = args.alias.clone();

    let profile = ctx.profile()?;
    let store = ctx.store(&profile)?;

    output::note("Checking credentials...");
    let repos = store
        .list_repos()
        .await
        .context("Failed to list repositories")?;

    storage::save(&ctx.book).context("Failed to save profile")?;
    output::success(&format!("Account '{}' stored", args.alias));

    if repos.is_empty() {
        output::note("No repositories visible to this account.");
        return Ok(());
    }

    println!();
    for (i, repo) in repos.iter().enumerate() {
        println!("{:>3}  {}", i + 1, repo.name);
    }
    println!();

    eprint!("Select repository (name or number, empty to skip): ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let choice = line.trim();
    if choice.is_empty() {
        return Ok(());
    }

    let name = match choice.parse::<usize>() {
        Ok(n) if (1..=repos.len()).contains(&n) => repos[n - 1].name.clone(),
        Ok(n) => bail!("No repository numbered {}", n),
        Err(_) => {
            if !repos.iter().any(|r| r.name == choice) {
                bail!("Unknown repository '{}'", choice);
            }
            choice.to_string()
        }
    };

    let descriptor = store
        .get_repo(&name)
        .await
        .with_context(|| format!("Failed to describe repository '{}'", name))?;
    let sample = fetch_sample(&store, &descriptor).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch sample record");
        None
    });

    if let Some(account) = ctx.book.current_account_mut() {
        account.repo = name.clone();
        account.repos.insert(
            name.clone(),
            RepoCache {
                repo: descriptor,
                sample,
            },
        );
    }
    storage::save(&ctx.book).context("Failed to save profile")?;
    output::success(&format!("Selected repository '{}'", name));

    Ok(())
}
