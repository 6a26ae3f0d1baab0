pub mod collector;
pub mod config;
pub mod render;
pub mod scrape;

pub use config::{Bucket, Keyword, PAGE_SIZE, ScrapeConfig};
pub use render::{BrowserSession, ChromiumRenderContext, RenderContext};
pub use scrape::{
    CombinedRecord, DispatchOutcome, Dispatcher, RangeAggregate, RetryError, RunSummary,
    ScrapeError,
};

/// Run one full scrape with the given configuration.
///
/// Launches a browser session, crawls every configured bucket, dispatches
/// records and aggregates to the collector, and releases the session on
/// every exit path. Only setup failures are errors; degraded runs (aborted
/// buckets, dropped batches) complete with the damage recorded in the
/// returned [`RunSummary`].
pub async fn run_scrape(config: &ScrapeConfig) -> Result<RunSummary, ScrapeError> {
    scrape::run_scrape(config).await
}
