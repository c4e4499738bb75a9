//! Histogram command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use chrono::{DateTime, Local};
use clap::Args;

use logseek_core::{HistogramRequest, LogStore};
use logseek_core::query::{self, TimeArgs};

use crate::context::CommandContext;
use crate::output;

#[derive(Args, Debug)]
pub struct HistogramArgs {
    /// Window start
    #[arg(short, long)]
    pub start: Option<String>,

    /// Window end; defaults to now
    #[arg(short, long)]
    pub end: Option<String>,

    /// Relative window: days back from now
    #[arg(short, long, default_value_t = 0.0)]
    pub day: f64,

    /// Relative window: hours back from now
    #[arg(short = 'H', long, default_value_t = 0.0)]
    pub hour: f64,

    /// Relative window: minutes back from now
    #[arg(short, long, default_value_t = 0.0)]
    pub minute: f64,

    /// Date field to bucket over; defaults to the schema's date field
    #[arg(long)]
    pub field: Option<String>,

    /// Filter expression; positional words are joined instead if absent
    #[arg(short = 'w', long = "where")]
    pub where_clause: Option<String>,

    /// Filter expression words
    #[arg(trailing_var_arg = true)]
    pub filter: Vec<String>,
}

pub async fn run(args: HistogramArgs, config: Option<&Path>) -> Result<()> {
    let mut ctx = CommandContext::load(config)?;
    let profile = ctx.profile()?;
    let store = ctx.store(&profile)?;
    let descriptor = ctx.descriptor(&profile, &store, false).await?;
    ctx.save();

    let field = match &args.field {
        Some(f) => f.clone(),
        None => match descriptor.date_field() {
            Some(f) => f.to_string(),
            None => bail!(
                "No date-typed field in the schema of '{}'; pass --field",
                descriptor.name
            ),
        },
    };

    let time_args = TimeArgs {
        start: args.start.clone(),
        end: args.end.clone(),
        day: args.day,
        hour: args.hour,
        minute: args.minute,
    };
    let window = query::resolve_window(&time_args, profile.range_minutes, Local::now())?;
    let Some(start) = window.start else {
        bail!("Histogram needs a bounded window; pass --start");
    };

    let request = HistogramRequest {
        repo: descriptor.name.clone(),
        query: args
            .where_clause
            .clone()
            .unwrap_or_else(|| args.filter.join(" ")),
        field,
        from_ms: start.timestamp_millis(),
        to_ms: window.end.timestamp_millis(),
    };
    let result = store.query_histogram(&request).await?;

    for bucket in &result.buckets {
        let label = DateTime::from_timestamp_millis(bucket.key_ms)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%dT%H:%M:%S").to_string())
            .unwrap_or_else(|| bucket.key_ms.to_string());
        println!("{}\t{}", label, bucket.count);
    }

    output::note(&format!("total: {}", result.total));
    if result.partial_success {
        output::note("Scan was cut short; counts are a lower bound.");
    }
    Ok(())
}
