//! Collector dispatch
//!
//! Posts page batches and bucket aggregates to the collector's two
//! endpoints. Sends are fire-and-forget from the pipeline's perspective:
//! a failure is logged and reported as a non-fatal outcome, never retried,
//! and the batch's data is gone if the endpoint was unreachable.

use anyhow::{Context, Result};
use tracing::{info, warn};
use url::Url;

use super::types::{CombinedRecord, RangeAggregate};
use crate::config::{Bucket, ScrapeConfig};

const RECORDS_PATH: &str = "v1/job-detail-list";
const AGGREGATE_PATH: &str = "v1/job-count";

/// Non-fatal outcome of one send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Accepted,
    Failed,
}

pub struct Dispatcher {
    client: reqwest::Client,
    records_url: Url,
    aggregate_url: Url,
}

impl Dispatcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let base = Url::parse(config.collector_base_url())
            .with_context(|| format!("invalid collector URL {}", config.collector_base_url()))?;
        // Re-rooting relative joins need the trailing slash preserved.
        let base = if base.path().ends_with('/') {
            base
        } else {
            let mut b = base;
            b.set_path(&format!("{}/", b.path()));
            b
        };
        let client = reqwest::Client::builder()
            .timeout(config.dispatch_timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            records_url: base.join(RECORDS_PATH).context("invalid records endpoint")?,
            aggregate_url: base
                .join(AGGREGATE_PATH)
                .context("invalid aggregate endpoint")?,
            client,
        })
    }

    /// Send exactly one page's records as one batch.
    pub async fn send_records(
        &self,
        bucket: &Bucket,
        page: u32,
        records: &[CombinedRecord],
    ) -> DispatchOutcome {
        info!(%bucket, page, count = records.len(), "dispatching page batch");
        match self
            .client
            .post(self.records_url.clone())
            .json(records)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                info!(%bucket, page, "page batch accepted");
                DispatchOutcome::Accepted
            }
            Ok(response) => {
                warn!(
                    %bucket,
                    page,
                    status = %response.status(),
                    "collector rejected page batch; batch dropped"
                );
                DispatchOutcome::Failed
            }
            Err(e) => {
                warn!(%bucket, page, "failed to dispatch page batch, batch dropped: {e}");
                DispatchOutcome::Failed
            }
        }
    }

    /// Send a bucket's cumulative aggregate.
    pub async fn send_aggregate(&self, aggregate: &RangeAggregate) -> DispatchOutcome {
        info!(
            bucket = %aggregate.salary_range,
            total = aggregate.total,
            "dispatching bucket aggregate"
        );
        match self
            .client
            .post(self.aggregate_url.clone())
            .json(aggregate)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                info!(bucket = %aggregate.salary_range, "aggregate accepted");
                DispatchOutcome::Accepted
            }
            Ok(response) => {
                warn!(
                    bucket = %aggregate.salary_range,
                    status = %response.status(),
                    "collector rejected aggregate; aggregate dropped"
                );
                DispatchOutcome::Failed
            }
            Err(e) => {
                warn!(
                    bucket = %aggregate.salary_range,
                    "failed to dispatch aggregate, aggregate dropped: {e}"
                );
                DispatchOutcome::Failed
            }
        }
    }
}
