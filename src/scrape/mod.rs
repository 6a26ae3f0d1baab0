//! Scrape pipeline
//!
//! The crawl-extract-aggregate-dispatch pipeline: pagination across salary
//! buckets, bounded retry around every render-context operation,
//! deterministic extraction, per-bucket keyword tallies, and fire-and-forget
//! dispatch to the collector.

// Sub-modules
pub mod aggregator;
pub mod dispatcher;
pub mod extractor;
pub mod js_scripts;
pub mod navigator;
pub mod orchestrator;
pub mod retry;
pub mod types;

// Re-exports for public API
pub use aggregator::{Aggregator, normalize};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use extractor::{Extractor, PageExtraction};
pub use navigator::Navigator;
pub use orchestrator::{crawl_buckets, run_scrape};
pub use retry::{RetryError, is_transient, with_retry};
pub use types::{
    CombinedRecord, JobDetail, JobSummary, PageCursor, RangeAggregate, RunSummary, ScrapeError,
};
