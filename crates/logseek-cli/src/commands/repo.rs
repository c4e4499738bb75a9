//! Repo command implementation.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::commands::sample::fetch_sample;
use crate::context::CommandContext;
use crate::output;
use crate::profile::RepoCache;
use crate::render;

#[derive(Args, Debug)]
pub struct RepoArgs {
    /// Repository to select; omit to show the current one
    pub name: Option<String>,

    /// Re-fetch the descriptor and sample record
    #[arg(long)]
    pub refresh: bool,
}

pub async fn run(args: RepoArgs, config: Option<&Path>) -> Result<()> {
    let mut ctx = CommandContext::load(config)?;

    if let Some(name) = &args.name {
        if let Some(account) = ctx.book.current_account_mut() {
            account.repo = name.clone();
        }
    }

    let selecting = args.name.is_some();
    let profile = ctx.profile()?;
    let store = ctx.store(&profile)?;

    // Selecting a repo always validates it against the service.
    let descriptor = ctx
        .descriptor(&profile, &store, selecting || args.refresh)
        .await?;

    let cached_sample = profile.cache.as_ref().and_then(|c| c.sample.clone());
    let sample = if selecting || args.refresh || cached_sample.is_none() {
        fetch_sample(&store, &descriptor).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to fetch sample record");
            cached_sample
        })
    } else {
        cached_sample
    };

    output::field("Repository", &descriptor.name);
    output::field("Region", &descriptor.region);
    output::field("Retention", &descriptor.retention.to_string());
    if let Some(date_field) = descriptor.date_field() {
        output::field("Default sort", &format!("{}:desc", date_field));
    }

    println!();
    for field in &descriptor.schema {
        if field.is_date() && descriptor.date_field() == Some(field.key.as_str()) {
            println!("  {}  {}", field.key.green(), field.value_type.dimmed());
        } else {
            println!("  {}  {}", field.key, field.value_type.dimmed());
        }
    }

    if let Some(record) = &sample {
        println!();
        output::note("Sample record:");
        let fields = render::select_fields("*", &descriptor.schema);
        print!("{}", render::format_verbose(record, &fields));
    }

    if let Some(account) = ctx.book.current_account_mut() {
        account.repos.insert(
            descriptor.name.clone(),
            RepoCache {
                repo: descriptor.clone(),
                sample,
            },
        );
    }
    ctx.save();

    if selecting {
        output::success(&format!("Selected repository '{}'", descriptor.name));
    }

    Ok(())
}
