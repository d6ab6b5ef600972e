//! Download subcommand - fetch a range of chapters in parallel

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use akito_core::{
    Batch, BatchError, Chapter, Fetch, NovelBasic, ProgressContext, Source, download_all,
    download_range,
};

use super::Site;
use crate::config::DownloadConfig;

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Novel page URL (as printed by `search`)
    pub novel_url: String,

    /// Website the URL belongs to
    #[arg(short, long, value_enum, default_value_t)]
    pub site: Site,

    /// First chapter to download (1-based, inclusive)
    #[arg(long, value_parser = parse_chapter_number)]
    pub start: Option<usize>,

    /// Last chapter to download (1-based, inclusive)
    #[arg(long, value_parser = parse_chapter_number)]
    pub end: Option<usize>,

    /// Print chapters as a JSON array instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Keep the worker slot until a chapter is parsed, not just downloaded
    #[arg(long)]
    pub no_early_release: bool,
}

fn parse_chapter_number(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("invalid chapter number: {s}"))?;
    if n == 0 {
        return Err("chapter numbers start at 1".to_string());
    }
    Ok(n)
}

/// Zero-based inclusive bounds for the requested chapters, or `None` for all.
fn zero_based(start: Option<usize>, end: Option<usize>, total: usize) -> Option<(usize, usize)> {
    if start.is_none() && end.is_none() {
        return None;
    }
    let start = start.unwrap_or(1);
    let end = end.unwrap_or(total);
    Some((start.saturating_sub(1), end.saturating_sub(1)))
}

fn batch_error<E>(e: BatchError<E>) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    match e.index() {
        Some(index) => {
            anyhow::Error::new(e).context(format!("Failed to download chapter {}", index + 1))
        }
        None => anyhow::Error::new(e).context("Invalid chapter range"),
    }
}

pub fn run<S>(
    args: &DownloadArgs,
    source: &S,
    settings: &DownloadConfig,
    progress: &ProgressContext,
) -> Result<()>
where
    S: Source + Fetch<Descriptor = String, Item = Chapter>,
{
    let info = source
        .novel_info(&NovelBasic::from_url(&args.novel_url))
        .with_context(|| format!("Failed to read novel page {}", args.novel_url))?;

    let total = info.chapter_urls.len();
    if total == 0 {
        log::warn!("No chapters listed at {}", args.novel_url);
        return Ok(());
    }

    let bounds = zero_based(args.start, args.end, total);
    let count = match bounds {
        Some((start, end)) => (end + 1).saturating_sub(start).min(total),
        None => total,
    };

    let name = if info.basic.name.is_empty() {
        source.meta().name
    } else {
        info.basic.name.as_str()
    };
    let pb = progress.batch_bar(name, count);
    let batch = Batch::new(settings.workers)
        .early_release(settings.early_release && !args.no_early_release)
        .progress(pb.clone());

    let start = Instant::now();
    let result = match bounds {
        Some((first, last)) => download_range(&batch, source, &info, first, last),
        None => download_all(&batch, source, &info),
    };
    pb.finish_and_clear();
    let chapters = result.map_err(batch_error)?;

    log::info!(
        "Downloaded {} chapters in {:.1}s",
        chapters.len(),
        start.elapsed().as_secs_f64()
    );

    write_chapters(&mut std::io::stdout().lock(), &chapters, args.json)
}

fn write_chapters(out: &mut impl Write, chapters: &[Chapter], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, chapters)?;
        writeln!(out)?;
        return Ok(());
    }
    for chapter in chapters {
        writeln!(out, "{}\n\n{}\n", chapter.title, chapter.content)?;
    }
    out.flush()?;
    Ok(())
}
