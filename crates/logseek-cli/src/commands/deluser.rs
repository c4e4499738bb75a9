//! Deluser command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::context::CommandContext;
use crate::output;
use crate::profile::storage;

#[derive(Args, Debug)]
pub struct DeluserArgs {
    /// Alias of the account to remove
    pub alias: String,
}

pub async fn run(args: DeluserArgs, config: Option<&Path>) -> Result<()> {
    let mut ctx = CommandContext::load(config)?;

    if ctx.book.accounts.remove(&args.alias).is_none() {
        bail!("No stored account '{}'", args.alias);
    }
    if ctx.book.current == args.alias {
        ctx.book.current.clear();
    }

    storage::save(&ctx.book).context("Failed to save profile")?;
    output::success(&format!("Removed account '{}'", args.alias));
    Ok(())
}
