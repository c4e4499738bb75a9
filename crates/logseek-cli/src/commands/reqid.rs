//! Reqid command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Args;

use logseek_core::query::{self, TimeWindow, time};
use logseek_core::{Pager, PagingMode, QueryRequest, reqid};

use crate::context::CommandContext;
use crate::output;
use crate::render;

const PAGE_SIZE: usize = 100;

#[derive(Args, Debug)]
pub struct ReqidArgs {
    /// Schema field to match the id against (default: reqid, then respheader)
    #[arg(long)]
    pub field: Option<String>,

    /// Comma-separated fields to show; "*" means all schema fields
    #[arg(short = 'f', long, default_value = "*")]
    pub showfields: String,

    /// Separator between fields
    #[arg(long, default_value = "\t")]
    pub split: String,

    /// Request id, optionally prefixed with the match field as "field:<id>"
    pub reqid: String,
}

pub async fn run(args: ReqidArgs, config: Option<&Path>) -> Result<()> {
    let (field_prefix, id) = reqid::normalize(&args.reqid);
    let issued = reqid::issue_time(id)
        .with_context(|| format!("'{}' is not a valid request id", id))?;
    output::field("Request time", &time::format_local(issued));

    let mut ctx = CommandContext::load(config)?;
    let profile = ctx.profile()?;
    let store = ctx.store(&profile)?;
    let descriptor = ctx.descriptor(&profile, &store, false).await?;
    ctx.save();

    if reqid::outside_retention(issued, &descriptor.retention, Local::now()) {
        output::note(&format!(
            "Request predates the repository's retention ({}); results may be empty.",
            descriptor.retention
        ));
    }

    let field = match &args.field {
        Some(f) => f.as_str(),
        None => match reqid::resolve_field(field_prefix, &descriptor) {
            Some(f) => f,
            None => bail!(
                "No reqid-bearing field in the schema of '{}'; pass --field",
                descriptor.name
            ),
        },
    };

    let (start, end) = reqid::search_window(issued);
    let window = TimeWindow {
        start: Some(start),
        end,
    };
    let built = query::build(&format!("{}:{}", field, id), &window, &descriptor, None);

    let fields = render::select_fields(&args.showfields, &descriptor.schema);
    if fields.is_empty() {
        bail!("No schema fields match '{}'", args.showfields);
    }

    let request = QueryRequest {
        repo: descriptor.name.clone(),
        query: built.query,
        sort: built.sort,
        from: 0,
        size: PAGE_SIZE,
        scroll: None,
    };

    let mut pager = Pager::new(&store, request, PagingMode::Offset, None);
    let mut found = false;
    while let Some(page) = pager.next_page().await? {
        for record in &page.records {
            println!("{}", render::format_line(record, &fields, &args.split, None));
            found = true;
        }
    }

    if !found {
        output::note("No matching log lines.");
    }
    Ok(())
}
