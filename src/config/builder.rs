//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! The collector address is the one field with no safe default across
//! deployments, so the builder requires it at compile time before `build()`
//! becomes available.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::{Bucket, Keyword, PAGE_SIZE, ScrapeConfig, default_buckets, default_keywords};

// Type states for the builder
pub struct WithCollector;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) collector_base_url: Option<String>,
    pub(crate) site_base: String,
    pub(crate) category_path: String,
    pub(crate) daterange: u32,
    pub(crate) buckets: Vec<Bucket>,
    pub(crate) keywords: Vec<Keyword>,
    pub(crate) page_size: u32,
    pub(crate) headless: bool,
    pub(crate) chrome_executable: Option<PathBuf>,
    pub(crate) navigation_timeout_secs: u64,
    pub(crate) content_wait_timeout_secs: u64,
    pub(crate) detail_wait_timeout_secs: u64,
    pub(crate) dispatch_timeout_secs: u64,
    pub(crate) navigation_attempts: u32,
    pub(crate) content_wait_attempts: u32,
    pub(crate) detail_attempts: u32,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            collector_base_url: None,
            site_base: "https://hk.jobsdb.com".to_string(),
            category_path: "jobs-in-information-communication-technology".to_string(),
            daterange: 1,
            buckets: default_buckets(),
            keywords: default_keywords(),
            page_size: PAGE_SIZE,
            headless: true,
            chrome_executable: None,
            navigation_timeout_secs: 30,
            content_wait_timeout_secs: 20,
            detail_wait_timeout_secs: 10,
            dispatch_timeout_secs: 10,
            navigation_attempts: 3,
            content_wait_attempts: 3,
            detail_attempts: 3,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn collector_base_url(self, url: impl Into<String>) -> ScrapeConfigBuilder<WithCollector> {
        let url_string = url.into();

        // Normalize URL: the collector is usually a sidecar process, so
        // default to plain http when no scheme is given.
        let normalized_url =
            if url_string.starts_with("http://") || url_string.starts_with("https://") {
                url_string
            } else {
                format!("http://{url_string}")
            };

        ScrapeConfigBuilder {
            collector_base_url: Some(normalized_url),
            site_base: self.site_base,
            category_path: self.category_path,
            daterange: self.daterange,
            buckets: self.buckets,
            keywords: self.keywords,
            page_size: self.page_size,
            headless: self.headless,
            chrome_executable: self.chrome_executable,
            navigation_timeout_secs: self.navigation_timeout_secs,
            content_wait_timeout_secs: self.content_wait_timeout_secs,
            detail_wait_timeout_secs: self.detail_wait_timeout_secs,
            dispatch_timeout_secs: self.dispatch_timeout_secs,
            navigation_attempts: self.navigation_attempts,
            content_wait_attempts: self.content_wait_attempts,
            detail_attempts: self.detail_attempts,
            _phantom: PhantomData,
        }
    }
}

// Build method only available once the collector address is set
impl ScrapeConfigBuilder<WithCollector> {
    pub fn build(self) -> Result<ScrapeConfig> {
        if self.buckets.is_empty() {
            return Err(anyhow!("at least one salary bucket is required"));
        }
        if self.page_size == 0 {
            return Err(anyhow!("page_size must be non-zero"));
        }
        if self.navigation_attempts == 0
            || self.content_wait_attempts == 0
            || self.detail_attempts == 0
        {
            return Err(anyhow!("attempt budgets must be at least 1"));
        }

        Ok(ScrapeConfig {
            collector_base_url: self
                .collector_base_url
                .ok_or_else(|| anyhow!("collector_base_url is required"))?,
            site_base: self.site_base,
            category_path: self.category_path,
            daterange: self.daterange,
            buckets: self.buckets,
            keywords: self.keywords,
            page_size: self.page_size,
            headless: self.headless,
            chrome_executable: self.chrome_executable,
            navigation_timeout_secs: self.navigation_timeout_secs,
            content_wait_timeout_secs: self.content_wait_timeout_secs,
            detail_wait_timeout_secs: self.detail_wait_timeout_secs,
            dispatch_timeout_secs: self.dispatch_timeout_secs,
            navigation_attempts: self.navigation_attempts,
            content_wait_attempts: self.content_wait_attempts,
            detail_attempts: self.detail_attempts,
        })
    }
}

// Builder methods available at any state
impl<State> ScrapeConfigBuilder<State> {
    /// Override the listing site origin (no trailing slash).
    #[must_use]
    pub fn site_base(mut self, base: impl Into<String>) -> Self {
        self.site_base = base.into();
        self
    }

    /// Override the category path segment of the listing URL.
    #[must_use]
    pub fn category_path(mut self, path: impl Into<String>) -> Self {
        self.category_path = path.into();
        self
    }

    /// Set the recency filter in days (`daterange` query parameter).
    #[must_use]
    pub fn daterange(mut self, days: u32) -> Self {
        self.daterange = days;
        self
    }

    /// Replace the bucket enumeration. Order is preserved: buckets are
    /// crawled exactly in the order given here.
    #[must_use]
    pub fn buckets(mut self, buckets: Vec<Bucket>) -> Self {
        self.buckets = buckets;
        self
    }

    /// Replace the tallied keyword set.
    #[must_use]
    pub fn keywords(mut self, keywords: Vec<Keyword>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Override the per-page listing density used for total-page math.
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Pin the Chrome/Chromium binary instead of searching for one.
    #[must_use]
    pub fn chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    #[must_use]
    pub fn navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.navigation_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn content_wait_timeout_secs(mut self, secs: u64) -> Self {
        self.content_wait_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn detail_wait_timeout_secs(mut self, secs: u64) -> Self {
        self.detail_wait_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn dispatch_timeout_secs(mut self, secs: u64) -> Self {
        self.dispatch_timeout_secs = secs;
        self
    }

    /// Total invocation budget for page navigation (1 = no retries).
    #[must_use]
    pub fn navigation_attempts(mut self, attempts: u32) -> Self {
        self.navigation_attempts = attempts;
        self
    }

    /// Total invocation budget for the listing-card content wait.
    #[must_use]
    pub fn content_wait_attempts(mut self, attempts: u32) -> Self {
        self.content_wait_attempts = attempts;
        self
    }

    /// Total invocation budget for one job's click-and-read-detail sequence.
    #[must_use]
    pub fn detail_attempts(mut self, attempts: u32) -> Self {
        self.detail_attempts = attempts;
        self
    }
}
