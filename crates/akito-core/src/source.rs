//! Site module contract: novel metadata, search, and chapter download

use serde::Serialize;

use crate::batch::Batch;
use crate::error::BatchError;
use crate::fetch::Fetch;

/// How a site obtains its novels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Publishes its own translations
    Translator,
    /// Re-hosts content from other sites
    Aggregate,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Translator => "translator",
            Self::Aggregate => "aggregate",
        }
    }
}

/// Static description of a site module.
#[derive(Debug, Clone, Serialize)]
pub struct SourceMeta {
    pub name: &'static str,
    /// Host without scheme, e.g. `wuxiaworld.co`
    pub url: &'static str,
    pub kind: SourceKind,
    pub languages: &'static [&'static str],
    /// Date the module's selectors were last checked against the site
    pub last_updated: &'static str,
}

/// Search hit: enough to identify a novel and fetch its details later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NovelBasic {
    pub name: String,
    /// Lowercase alphanumeric form of `name` for matching across sites
    pub name_trim: String,
    pub novel_url: String,
}

impl NovelBasic {
    pub fn new(name: impl Into<String>, novel_url: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name_trim: trim_name(&name),
            name,
            novel_url: novel_url.into(),
        }
    }

    /// Placeholder for a novel known only by its URL.
    pub fn from_url(novel_url: impl Into<String>) -> Self {
        Self::new(String::new(), novel_url)
    }
}

/// Novel details including the ordered chapter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NovelInfo {
    #[serde(flatten)]
    pub basic: NovelBasic,
    pub author: String,
    /// Ongoing, Completed, ...
    pub status: String,
    pub language: String,
    pub chapter_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub title: String,
    pub content: String,
}

/// A website the downloader can read novels from.
///
/// Chapter download goes through [`Fetch`]; see [`download_range`].
pub trait Source: Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn meta(&self) -> &SourceMeta;

    /// All search results for `query`, across every result page.
    fn search(&self, query: &str) -> Result<Vec<NovelBasic>, Self::Error>;

    fn novel_info(&self, basic: &NovelBasic) -> Result<NovelInfo, Self::Error>;
}

/// Lowercase `name` and drop everything that is not alphanumeric.
///
/// Sites disagree on capitalization and punctuation of the same title.
pub fn trim_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Download chapters `start..=end` (zero-based) of `info`.
pub fn download_range<S>(
    batch: &Batch,
    source: &S,
    info: &NovelInfo,
    start: usize,
    end: usize,
) -> Result<Vec<Chapter>, BatchError<S::Error>>
where
    S: Fetch<Descriptor = String, Item = Chapter>,
{
    log::info!(
        "Downloading chapters {}-{} of {:?}",
        start + 1,
        end + 1,
        info.basic.name
    );
    batch.fetch_range(source, &info.chapter_urls, start, end)
}

/// Download every chapter of `info`; no chapters means an empty result.
pub fn download_all<S>(
    batch: &Batch,
    source: &S,
    info: &NovelInfo,
) -> Result<Vec<Chapter>, BatchError<S::Error>>
where
    S: Fetch<Descriptor = String, Item = Chapter>,
{
    if info.chapter_urls.is_empty() {
        log::warn!("{:?} has no chapters", info.basic.name);
        return Ok(Vec::new());
    }
    log::info!(
        "Downloading all {} chapters of {:?}",
        info.chapter_urls.len(),
        info.basic.name
    );
    batch.fetch_all(source, &info.chapter_urls)
}
