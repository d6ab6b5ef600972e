//! Akito Core - bounded-parallel chapter fetching
//!
//! This crate provides the batch orchestrator that downloads a range of
//! chapters in parallel under an admission limit, the site module contract,
//! and shared HTTP, logging, and progress infrastructure.
//!
//! # Example
//!
//! ```
//! use akito_core::{Batch, Fetch};
//!
//! struct Upper;
//!
//! impl Fetch for Upper {
//!     type Descriptor = &'static str;
//!     type Response = String;
//!     type Item = String;
//!     type Error = std::io::Error;
//!
//!     fn retrieve(&self, d: &&'static str, _index: usize) -> std::io::Result<String> {
//!         Ok(d.to_string())
//!     }
//!
//!     fn extract(&self, r: String, _index: usize) -> std::io::Result<String> {
//!         Ok(r.to_uppercase())
//!     }
//! }
//!
//! let items = ["a", "b", "c", "d"];
//! let out = Batch::new(2).fetch_range(&Upper, &items, 1, 2).unwrap();
//! assert_eq!(out, ["B", "C"]);
//! ```

pub mod batch;
pub mod error;
pub mod failure;
pub mod fetch;
pub mod gate;
pub mod http;
pub mod logging;
pub mod progress;
pub mod range;
pub mod source;
mod task;

// Re-exports for convenience
pub use batch::{Batch, fetch_all, fetch_range};
pub use error::BatchError;
pub use failure::FirstFailure;
pub use fetch::Fetch;
pub use gate::{AdmissionGate, DEFAULT_CAPACITY, Permit};
pub use http::{HttpError, RequestOptions, SHARED_RUNTIME, get_text, http_client, post_text};
pub use logging::{IndicatifLogger, Verbosity, init_logging};
pub use progress::ProgressContext;
pub use range::{FetchRange, InvalidRange};
pub use source::{
    Chapter, NovelBasic, NovelInfo, Source, SourceKind, SourceMeta, download_all, download_range,
    trim_name,
};
