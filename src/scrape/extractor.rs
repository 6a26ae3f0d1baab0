//! Listing-card and detail-panel extraction
//!
//! Converts the current rendered page into job records. Summaries are
//! harvested in one DOM pass; details require mutating page state (clicking
//! each card's title control) and are therefore read strictly one at a
//! time, in card order. The detail panel never echoes a job identifier, so
//! detail-to-summary pairing is positional by construction.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use tracing::{debug, warn};

use super::js_scripts::{
    DETAIL_PANEL_SELECTOR, DETAIL_TEXT_SCRIPT, JOB_CARDS_SCRIPT, JOB_TITLE_SELECTOR,
};
use super::retry::{RetryError, with_retry};
use super::types::{CombinedRecord, JobDetail, JobSummary};
use crate::config::{Bucket, ScrapeConfig};
use crate::render::RenderContext;

/// What one page of extraction produced.
pub struct PageExtraction {
    pub records: Vec<CombinedRecord>,
    /// Jobs whose detail sequence failed and were skipped.
    pub items_skipped: usize,
}

pub struct Extractor<'a> {
    ctx: &'a dyn RenderContext,
    config: &'a ScrapeConfig,
}

impl<'a> Extractor<'a> {
    pub fn new(ctx: &'a dyn RenderContext, config: &'a ScrapeConfig) -> Self {
        Self { ctx, config }
    }

    /// Harvest every listing card on the current page, in DOM order.
    pub async fn extract_page(&self) -> Result<Vec<JobSummary>> {
        let value = self.ctx.evaluate(JOB_CARDS_SCRIPT).await?;
        let summaries: Vec<JobSummary> =
            serde_json::from_value(value).map_err(|e| anyhow!("malformed card data: {e}"))?;
        debug!(cards = summaries.len(), "harvested listing cards");
        Ok(summaries)
    }

    /// Activate the `index`-th card's title control and read its detail
    /// panel.
    ///
    /// The whole click-wait-read sequence is retried as one unit with its
    /// own budget; re-clicking an already-open panel is harmless.
    pub async fn extract_detail(&self, index: usize) -> Result<JobDetail, RetryError> {
        let description = with_retry("detail sequence", self.config.detail_attempts(), || async move {
            self.ctx.click_nth(JOB_TITLE_SELECTOR, index).await?;
            self.ctx
                .wait_for_selector(DETAIL_PANEL_SELECTOR, self.config.detail_wait_timeout())
                .await?;
            let value = self.ctx.evaluate(DETAIL_TEXT_SCRIPT).await?;
            value
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| anyhow!("detail panel not found"))
        })
        .await?;

        Ok(JobDetail { description })
    }

    /// Produce the page's combined records: one per card whose detail
    /// sequence succeeded.
    ///
    /// A failed item (missing title control, detail panel that never
    /// renders) is logged and skipped so one malformed card cannot cost the
    /// rest of the page.
    pub async fn extract_records(
        &self,
        bucket: &Bucket,
        capture_date: NaiveDate,
    ) -> Result<PageExtraction> {
        let summaries = self.extract_page().await?;
        let mut records = Vec::with_capacity(summaries.len());
        let mut items_skipped = 0usize;

        for (index, summary) in summaries.into_iter().enumerate() {
            match self.extract_detail(index).await {
                Ok(detail) => {
                    records.push(CombinedRecord::new(bucket, capture_date, summary, detail));
                }
                Err(e) => {
                    warn!(
                        %bucket,
                        job_id = %summary.id,
                        index,
                        "skipping job, detail extraction failed: {e}"
                    );
                    items_skipped += 1;
                }
            }
        }

        Ok(PageExtraction {
            records,
            items_skipped,
        })
    }
}
