//! Core types for the scrape pipeline
//!
//! These mirror the shapes the site hands us (attribute-keyed field maps)
//! and the shapes the collector accepts (flat JSON objects).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::Bucket;

/// Top-level failure of a scrape run.
///
/// Page- and item-level failures never surface here; they degrade the run
/// (bucket aborted, item skipped) and are visible only in logs and in the
/// [`RunSummary`]. Only the inability to stand up the pipeline at all is an
/// error to the caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("scrape setup failed: {0:#}")]
    Setup(#[source] anyhow::Error),
}

/// Per-bucket pagination state.
///
/// The total page count is unknown until the first page renders, and is
/// refreshed after every fetch because the underlying result set can change
/// mid-bucket. The crawl loop for a bucket terminates exactly when the
/// current page exceeds the most recently observed total.
#[derive(Debug, Clone, Copy)]
pub struct PageCursor {
    current_page: u32,
    total_pages: Option<u32>,
}

impl PageCursor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_page: 1,
            total_pages: None,
        }
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Record the total-page count read from a successfully rendered page.
    pub fn observe_total(&mut self, total_pages: u32) {
        self.total_pages = Some(total_pages);
    }

    pub fn advance(&mut self) {
        self.current_page += 1;
    }

    /// True once the current page exceeds the last observed total.
    /// An unobserved total never terminates the loop by itself; the caller
    /// must not trust page counts that never came from a rendered page.
    #[must_use]
    pub fn exhausted(&self) -> bool {
        match self.total_pages {
            Some(total) => self.current_page > total,
            None => false,
        }
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// One job's summary as captured from its listing card.
///
/// Fields are keyed by the site's semantic attribute names; whatever the
/// card exposes is carried through untouched. `id` is site-assigned and
/// unique within a page, but the same job may appear in adjacent
/// overlapping salary buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: String,
    pub fields: BTreeMap<String, String>,
}

/// Full description text captured from a job's detail panel.
///
/// Pairing with summaries is positional: the panel does not echo the job
/// identifier, so a detail always belongs to the summary whose title
/// control was clicked immediately before.
#[derive(Debug, Clone)]
pub struct JobDetail {
    pub description: String,
}

/// One dispatched record: summary fields, detail text, capture date and
/// bucket, serialized as a single flat JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedRecord {
    pub date: NaiveDate,
    #[serde(rename = "salaryRange")]
    pub salary_range: String,
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    #[serde(rename = "jobAdDetails")]
    pub job_ad_details: String,
}

impl CombinedRecord {
    pub fn new(bucket: &Bucket, date: NaiveDate, summary: JobSummary, detail: JobDetail) -> Self {
        Self {
            date,
            salary_range: bucket.token.clone(),
            id: summary.id,
            fields: summary.fields,
            job_ad_details: detail.description,
        }
    }
}

/// Cumulative per-bucket state up to and including the most recently
/// completed page. Rebuilt from the aggregator after every page, dispatched
/// once when the bucket's pagination loop ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeAggregate {
    #[serde(rename = "SalaryRange")]
    pub salary_range: String,
    #[serde(rename = "Total")]
    pub total: u64,
    #[serde(flatten)]
    pub counts: BTreeMap<String, u64>,
    pub date: NaiveDate,
}

/// What a run accomplished, for the log line the scheduler watches and for
/// tests. There is no partial-success error: an aborted bucket shows up
/// here, not as an `Err`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub buckets_completed: usize,
    pub buckets_aborted: usize,
    pub pages_processed: usize,
    pub records_produced: usize,
    pub items_skipped: usize,
    pub batches_sent: usize,
    pub batches_failed: usize,
    pub aggregates_sent: usize,
    pub aggregates_failed: usize,
}
