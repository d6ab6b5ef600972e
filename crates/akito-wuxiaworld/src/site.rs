//! WuxiaWorld.co source: search, novel info and chapter fetch

use akito_core::http::get_text;
use akito_core::{Chapter, Fetch, NovelBasic, NovelInfo, Source, SourceKind, SourceMeta};

use crate::config::Config;
use crate::error::SourceError;
use crate::parse;

static META: SourceMeta = SourceMeta {
    name: "WuxiaWorld.co",
    url: "wuxiaworld.co",
    kind: SourceKind::Aggregate,
    languages: &["Chinese"],
    last_updated: "11/5/2020",
};

/// Reader for wuxiaworld.co, a Chinese web novel aggregator.
#[derive(Debug, Clone, Default)]
pub struct WuxiaWorldCo {
    config: Config,
}

impl WuxiaWorldCo {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// URL of result page `page` (1-based) for `query`.
    pub fn search_url(&self, query: &str, page: usize) -> String {
        format!(
            "{}/search/{}/{page}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }
}

impl Source for WuxiaWorldCo {
    type Error = SourceError;

    fn meta(&self) -> &SourceMeta {
        &META
    }

    fn search(&self, query: &str) -> Result<Vec<NovelBasic>, SourceError> {
        let mut results = Vec::new();
        for page in 1..=self.config.max_search_pages {
            let html = get_text(&self.search_url(query, page), &self.config.request)?;
            let hits = parse::parse_search_page(&html, &self.config.base_url)?;
            if hits.is_empty() {
                log::debug!(
                    "search {query:?}: {} results over {} pages",
                    results.len(),
                    page - 1
                );
                return Ok(results);
            }
            results.extend(hits);
        }
        log::warn!(
            "search {query:?}: stopped after {} pages",
            self.config.max_search_pages
        );
        Ok(results)
    }

    fn novel_info(&self, basic: &NovelBasic) -> Result<NovelInfo, SourceError> {
        let html = get_text(&basic.novel_url, &self.config.request)?;
        let info = parse::parse_novel_page(&html, basic.clone(), &self.config.base_url)?;
        log::debug!(
            "{}: {} chapters, {}",
            basic.novel_url,
            info.chapter_urls.len(),
            info.status
        );
        Ok(info)
    }
}

impl Fetch for WuxiaWorldCo {
    type Descriptor = String;
    type Response = String;
    type Item = Chapter;
    type Error = SourceError;

    fn retrieve(&self, url: &String, _index: usize) -> Result<String, SourceError> {
        Ok(get_text(url, &self.config.request)?)
    }

    fn extract(&self, html: String, _index: usize) -> Result<Chapter, SourceError> {
        parse::parse_chapter_page(&html)
    }
}
