//! WuxiaWorld.co module configuration

use akito_core::RequestOptions;

/// Site root, including scheme and `www.` prefix
pub const DEFAULT_BASE_URL: &str = "https://www.wuxiaworld.co";

/// Upper bound on search result pages walked per query
pub const DEFAULT_MAX_SEARCH_PAGES: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// Headers, cookies and timeout for every request to the site
    pub request: RequestOptions,
    pub max_search_pages: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request: RequestOptions::default(),
            max_search_pages: DEFAULT_MAX_SEARCH_PAGES,
        }
    }
}
