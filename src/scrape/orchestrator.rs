//! Scrape orchestration
//!
//! Drives the outer loop over salary buckets and the inner loop over pages:
//! navigate, extract, aggregate, dispatch, repeat until the cursor passes
//! the observed page count. A page fetch that fails after its retry budget
//! aborts the remainder of that bucket only; the bucket's aggregate is
//! still dispatched so the collector sees whatever the run managed.

use chrono::Local;
use tracing::{info, warn};

use super::aggregator::Aggregator;
use super::dispatcher::{DispatchOutcome, Dispatcher};
use super::extractor::Extractor;
use super::navigator::Navigator;
use super::types::{PageCursor, RunSummary, ScrapeError};
use crate::config::ScrapeConfig;
use crate::render::{BrowserSession, RenderContext};

/// Run one full scrape: launch a browser session, crawl every configured
/// bucket with it, and release the session on every exit path.
pub async fn run_scrape(config: &ScrapeConfig) -> Result<RunSummary, ScrapeError> {
    let dispatcher = Dispatcher::new(config).map_err(ScrapeError::Setup)?;

    let session = BrowserSession::launch(config).await.map_err(ScrapeError::Setup)?;
    let ctx = match session.new_context().await {
        Ok(ctx) => ctx,
        Err(e) => {
            session.shutdown().await;
            return Err(ScrapeError::Setup(e));
        }
    };

    let summary = crawl_buckets(&ctx, config, &dispatcher).await;

    session.shutdown().await;
    Ok(summary)
}

/// Crawl every configured bucket through one render context.
///
/// Separated from [`run_scrape`] so the whole pipeline below the browser
/// launch can run against a fake render context in tests.
pub async fn crawl_buckets(
    ctx: &dyn RenderContext,
    config: &ScrapeConfig,
    dispatcher: &Dispatcher,
) -> RunSummary {
    let capture_date = Local::now().date_naive();
    let navigator = Navigator::new(ctx, config);
    let extractor = Extractor::new(ctx, config);
    let mut summary = RunSummary::default();

    for bucket in config.buckets() {
        info!(%bucket, "starting bucket");
        let mut aggregator = Aggregator::new(bucket.clone(), config.keywords(), capture_date);
        let mut cursor = PageCursor::new();
        let mut aborted = false;

        loop {
            match navigator.load_page(bucket, cursor.current_page()).await {
                Ok(total_pages) => cursor.observe_total(total_pages),
                Err(e) => {
                    warn!(
                        %bucket,
                        page = cursor.current_page(),
                        "page fetch failed, aborting bucket: {e}"
                    );
                    aborted = true;
                    break;
                }
            }

            let extraction = match extractor.extract_records(bucket, capture_date).await {
                Ok(extraction) => extraction,
                Err(e) => {
                    warn!(
                        %bucket,
                        page = cursor.current_page(),
                        "page extraction failed, aborting bucket: {e:#}"
                    );
                    aborted = true;
                    break;
                }
            };

            for record in &extraction.records {
                aggregator.record(&record.job_ad_details);
            }
            summary.records_produced += extraction.records.len();
            summary.items_skipped += extraction.items_skipped;

            match dispatcher
                .send_records(bucket, cursor.current_page(), &extraction.records)
                .await
            {
                DispatchOutcome::Accepted => summary.batches_sent += 1,
                DispatchOutcome::Failed => summary.batches_failed += 1,
            }

            summary.pages_processed += 1;
            cursor.advance();
            if cursor.exhausted() {
                break;
            }
        }

        // Dispatched on both the normal and the aborted path: the
        // aggregate reflects whatever pages actually completed.
        match dispatcher.send_aggregate(&aggregator.snapshot()).await {
            DispatchOutcome::Accepted => summary.aggregates_sent += 1,
            DispatchOutcome::Failed => summary.aggregates_failed += 1,
        }

        if aborted {
            summary.buckets_aborted += 1;
        } else {
            summary.buckets_completed += 1;
        }
        info!(
            %bucket,
            total = aggregator.total(),
            pages = cursor.current_page().saturating_sub(1),
            aborted,
            "bucket finished"
        );
    }

    summary
}
