//! Search subcommand - find novels by title

use anyhow::{Context, Result};
use clap::Args;

use akito_core::Source;

use super::{Site, table};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Title (or part of it) to search for
    pub query: String,

    /// Website to search
    #[arg(short, long, value_enum, default_value_t)]
    pub site: Site,

    /// Show at most this many results
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,
}

pub fn run<S: Source>(args: &SearchArgs, source: &S) -> Result<()> {
    let results = source
        .search(&args.query)
        .with_context(|| format!("Search on {} failed", source.meta().name))?;

    if results.is_empty() {
        log::warn!("No results for {:?}", args.query);
        return Ok(());
    }

    let shown = args.limit.unwrap_or(results.len()).min(results.len());
    let mut table = table(&["#", "Name", "URL"]);
    for (i, novel) in results.iter().take(shown).enumerate() {
        table.add_row(vec![(i + 1).to_string(), novel.name.clone(), novel.novel_url.clone()]);
    }

    println!("{table}");
    if shown < results.len() {
        eprintln!("({} of {} results shown)", shown, results.len());
    }
    Ok(())
}
