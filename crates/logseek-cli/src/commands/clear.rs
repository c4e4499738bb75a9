//! Clear command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::profile::storage;

#[derive(Args, Debug)]
pub struct ClearArgs {}

pub async fn run(_args: ClearArgs, _config: Option<&Path>) -> Result<()> {
    storage::clear().context("Failed to clear profile")?;
    output::success("Profile cleared");
    Ok(())
}
