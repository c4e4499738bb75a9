//! Query command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use chrono::Local;
use clap::Args;

use logseek_core::query::{self, TimeArgs};
use logseek_core::{Pager, PagingMode, QueryRequest};

use crate::context::CommandContext;
use crate::output;
use crate::render;

/// Page size when paging by offset.
const DEFAULT_PAGE_SIZE: usize = 100;
/// Page size when scrolling.
const SCROLL_PAGE_SIZE: usize = 2000;
/// Ceiling on any requested page size.
const MAX_PAGE_SIZE: usize = 10_000;
/// Scroll keep-alive window.
const SCROLL_WINDOW: &str = "3m";

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Window start (e.g. "2024-05-10 11:00:00")
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

    /// Sort expression, e.g. "timestamp:asc"
    #[arg(short, long)]
    pub order: Option<String>,

    /// Comma-separated fields to show; "*" means all schema fields
    #[arg(short = 'f', long, default_value = "*")]
    pub showfields: String,

    /// Separator between fields
    #[arg(long, default_value = "\t")]
    pub split: String,

    /// Stop after this many rows
    #[arg(short = 'l', long)]
    pub head: Option<usize>,

    /// Rows fetched per request (scroll default 2000, otherwise 100)
    #[arg(long)]
    pub pre_size: Option<usize>,

    /// Pull every matching row via scroll paging
    #[arg(long)]
    pub scroll: bool,

    /// Suppress the leading row index
    #[arg(long)]
    pub no_index: bool,

    /// Filter expression; positional words are joined instead if absent
    #[arg(short = 'w', long = "where")]
    pub where_clause: Option<String>,

    /// Filter expression words
    #[arg(trailing_var_arg = true)]
    pub filter: Vec<String>,
}

pub async fn run(args: QueryArgs, config: Option<&Path>) -> Result<()> {
    let mut ctx = CommandContext::load(config)?;
    let profile = ctx.profile()?;
    let store = ctx.store(&profile)?;
    let descriptor = ctx.descriptor(&profile, &store, false).await?;
    ctx.save();

    let user_query = args
        .where_clause
        .clone()
        .unwrap_or_else(|| args.filter.join(" "));

    let time_args = TimeArgs {
        start: args.start.clone(),
        end: args.end.clone(),
        day: args.day,
        hour: args.hour,
        minute: args.minute,
    };
    let window = query::resolve_window(&time_args, profile.range_minutes, Local::now())?;
    let built = query::build(&user_query, &window, &descriptor, args.order.as_deref());

    let fields = render::select_fields(&args.showfields, &descriptor.schema);
    if fields.is_empty() {
        bail!("No schema fields match '{}'", args.showfields);
    }

    let default_size = if args.scroll {
        SCROLL_PAGE_SIZE
    } else {
        DEFAULT_PAGE_SIZE
    };
    let size = args.pre_size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE);

    let request = QueryRequest {
        repo: descriptor.name.clone(),
        query: built.query,
        sort: built.sort,
        from: 0,
        size,
        scroll: None,
    };
    let mode = if args.scroll {
        PagingMode::Scroll(SCROLL_WINDOW.to_string())
    } else {
        PagingMode::Offset
    };

    let mut pager = Pager::new(&store, request, mode, args.head);
    let mut index = 1usize;
    while let Some(page) = pager.next_page().await? {
        for record in &page.records {
            let idx = (!args.no_index).then_some(index);
            println!("{}", render::format_line(record, &fields, &args.split, idx));
            index += 1;
        }
    }

    output::note(&format!(
        "{} of {} rows",
        pager.emitted(),
        pager.total()
    ));
    Ok(())
}
