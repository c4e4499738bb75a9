//! Switch command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::context::CommandContext;
use crate::output;
use crate::profile::storage;

#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// Alias of the account to switch to
    pub alias: String,
}

pub async fn run(args: SwitchArgs, config: Option<&Path>) -> Result<()> {
    let mut ctx = CommandContext::load(config)?;

    if !ctx.book.accounts.contains_key(&args.alias) {
        bail!("No stored account '{}'", args.alias);
    }

    ctx.book.current = args.alias.clone();
    storage::save(&ctx.book).context("Failed to save profile")?;

    output::success(&format!("Switched to account '{}'", args.alias));
    Ok(())
}
