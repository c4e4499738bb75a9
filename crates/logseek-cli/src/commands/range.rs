//! Range command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::context::CommandContext;
use crate::output;
use crate::profile::storage;

#[derive(Args, Debug)]
pub struct RangeArgs {
    /// Default time range in minutes
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub minutes: u32,
}

pub async fn run(args: RangeArgs, config: Option<&Path>) -> Result<()> {
    let mut ctx = CommandContext::load(config)?;

    let Some(account) = ctx.book.current_account_mut() else {
        bail!("No account configured. Run 'logseek login <ak> <sk>' first.");
    };
    account.range = args.minutes;

    storage::save(&ctx.book).context("Failed to save profile")?;
    output::success(&format!("Default range set to {} minutes", args.minutes));
    Ok(())
}
