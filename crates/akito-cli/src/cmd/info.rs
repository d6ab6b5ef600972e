//! Info subcommand - show novel metadata and chapter count

use anyhow::{Context, Result};
use clap::Args;

use akito_core::{NovelBasic, Source};

use super::{Site, table};

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Novel page URL (as printed by `search`)
    pub novel_url: String,

    /// Website the URL belongs to
    #[arg(short, long, value_enum, default_value_t)]
    pub site: Site,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run<S: Source>(args: &InfoArgs, source: &S) -> Result<()> {
    let info = source
        .novel_info(&NovelBasic::from_url(&args.novel_url))
        .with_context(|| format!("Failed to read novel page {}", args.novel_url))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let mut table = table(&["Field", "Value"]);
    table.add_row(vec!["URL", info.basic.novel_url.as_str()]);
    table.add_row(vec!["Author", info.author.as_str()]);
    table.add_row(vec!["Status", info.status.as_str()]);
    table.add_row(vec!["Language", info.language.as_str()]);
    table.add_row(vec!["Chapters", &info.chapter_urls.len().to_string()]);
    table.add_row(vec!["Source", source.meta().name]);

    println!("{table}");
    Ok(())
}
