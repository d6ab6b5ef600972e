//! Akito WuxiaWorld.co - site module for wuxiaworld.co
//!
//! Implements [`akito_core::Source`] for search and novel details, and
//! [`akito_core::Fetch`] so chapters can be downloaded in parallel batches.
//!
//! # Example
//!
//! ```no_run
//! use akito_core::{Batch, Source, download_range};
//! use akito_wuxiaworld::WuxiaWorldCo;
//!
//! let site = WuxiaWorldCo::default();
//! let results = site.search("coiling dragon").expect("search failed");
//! let info = site.novel_info(&results[0]).expect("info failed");
//!
//! // First three chapters (zero-based, inclusive)
//! let chapters = download_range(&Batch::default(), &site, &info, 0, 2).expect("download failed");
//! println!("{}", chapters[0].title);
//! ```

pub mod config;
pub mod error;
pub mod parse;
pub mod site;

// Re-exports for convenience
pub use config::Config;
pub use error::SourceError;
pub use site::WuxiaWorldCo;
