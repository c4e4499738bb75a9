//! Sample command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;

use logseek_core::query::{self, TimeArgs};
use logseek_core::{LogStore, QueryRequest, Record, RepoDescriptor};
use logseek_http::HttpStore;

use crate::context::CommandContext;
use crate::output;
use crate::render;

/// How far back to look for a sample record, in minutes.
const SAMPLE_WINDOW_MINUTES: f64 = 60.0;

#[derive(Args, Debug)]
pub struct SampleArgs {}

/// Fetch one recent record from the repository, if any.
pub(crate) async fn fetch_sample(
    store: &HttpStore,
    descriptor: &RepoDescriptor,
) -> Result<Option<Record>> {
    let args = TimeArgs {
        minute: SAMPLE_WINDOW_MINUTES,
        ..Default::default()
    };
    let window = query::resolve_window(&args, 0, Local::now())?;
    let built = query::build("", &window, descriptor, None);

    let request = QueryRequest {
        repo: descriptor.name.clone(),
        query: built.query,
        sort: built.sort,
        from: 0,
        size: 1,
        scroll: None,
    };
    let result = store.query(&request).await?;
    Ok(result.records.into_iter().next())
}

pub async fn run(_args: SampleArgs, config: Option<&Path>) -> Result<()> {
    let mut ctx = CommandContext::load(config)?;
    let profile = ctx.profile()?;
    let store = ctx.store(&profile)?;
    let descriptor = ctx.descriptor(&profile, &store, false).await?;

    let sample = fetch_sample(&store, &descriptor)
        .await
        .context("Failed to fetch sample record")?;

    let Some(record) = sample else {
        output::note("No records in the last hour.");
        return Ok(());
    };

    let fields = render::select_fields("*", &descriptor.schema);
    print!("{}", render::format_verbose(&record, &fields));

    if let Some(account) = ctx.book.current_account_mut() {
        if let Some(cache) = account.repos.get_mut(&descriptor.name) {
            cache.sample = Some(record);
        }
    }
    ctx.save();

    Ok(())
}
