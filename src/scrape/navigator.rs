//! Listing navigation and pagination math
//!
//! Builds the listing URL for a bucket and page, drives navigation through
//! the render context, waits for content readiness, and reads the site's
//! total-jobs figure into a page count.

use anyhow::{Result, anyhow};
use tracing::debug;

use super::js_scripts::{JOB_CARD_SELECTOR, TOTAL_JOBS_SCRIPT};
use super::retry::{RetryError, with_retry};
use crate::config::{Bucket, ScrapeConfig};
use crate::render::RenderContext;

pub struct Navigator<'a> {
    ctx: &'a dyn RenderContext,
    config: &'a ScrapeConfig,
}

impl<'a> Navigator<'a> {
    pub fn new(ctx: &'a dyn RenderContext, config: &'a ScrapeConfig) -> Self {
        Self { ctx, config }
    }

    /// Navigate to one listing page and return the refreshed total page
    /// count.
    ///
    /// Navigation and the content wait carry independent retry budgets.
    /// Success means at least one listing card exists in the DOM, not
    /// merely that the page load event fired. The returned total may differ
    /// from earlier pages of the same bucket; callers refresh their cursor
    /// with it after every fetch.
    pub async fn load_page(&self, bucket: &Bucket, page: u32) -> Result<u32, RetryError> {
        let url = self.listing_url(bucket, page);
        debug!(%bucket, page, %url, "loading listing page");

        with_retry("navigation", self.config.navigation_attempts(), || {
            self.ctx.navigate(&url)
        })
        .await?;

        with_retry("content wait", self.config.content_wait_attempts(), || {
            self.ctx
                .wait_for_selector(JOB_CARD_SELECTOR, self.config.content_wait_timeout())
        })
        .await?;

        let total_jobs = with_retry("total count read", self.config.content_wait_attempts(), || async move {
            let value = self.ctx.evaluate(TOTAL_JOBS_SCRIPT).await?;
            value
                .as_u64()
                .ok_or_else(|| anyhow!("total jobs count element not found"))
        })
        .await?;

        let total_pages = total_jobs.div_ceil(u64::from(self.config.page_size())) as u32;
        debug!(%bucket, page, total_jobs, total_pages, "listing page ready");
        Ok(total_pages)
    }

    /// The listing URL for a bucket and page.
    ///
    /// The query string is load-bearing: the site keys its result set on
    /// these exact parameters in this exact shape, so it is assembled
    /// literally rather than through an encoder that might reorder or
    /// escape them.
    pub fn listing_url(&self, bucket: &Bucket, page: u32) -> String {
        format!(
            "{}/{}?daterange={}&page={}&salaryrange={}&salarytype={}&sortmode=ListedDate",
            self.config.site_base(),
            self.config.category_path(),
            self.config.daterange(),
            page,
            bucket.token,
            bucket.salary_type,
        )
    }
}
