//! Accounts command implementation.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::context::CommandContext;
use crate::output;

#[derive(Args, Debug)]
pub struct AccountsArgs {}

pub async fn run(_args: AccountsArgs, config: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::load(config)?;

    if ctx.book.accounts.is_empty() {
        output::note("No stored accounts. Run 'logseek login <ak> <sk>' first.");
        return Ok(());
    }

    let width = ctx
        .book
        .accounts
        .keys()
        .map(|a| a.len())
        .max()
        .unwrap_or(0)
        + 2;

    // BTreeMap keeps aliases sorted.
    for (alias, account) in &ctx.book.accounts {
        let marker = if *alias == ctx.book.current { "**" } else { "  " };
        let repo = if account.repo.is_empty() {
            "-".to_string()
        } else {
            account.repo.clone()
        };
        println!(
            "{} {:<width$} {}",
            marker,
            alias,
            repo.dimmed(),
            width = width
        );
    }

    Ok(())
}
