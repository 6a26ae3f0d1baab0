//! Getter methods for `ScrapeConfig`
//!
//! This module provides all the accessor methods for retrieving configuration
//! values from a `ScrapeConfig` instance.

use std::path::Path;
use std::time::Duration;

use super::types::{Bucket, Keyword, ScrapeConfig};

impl ScrapeConfig {
    #[must_use]
    pub fn collector_base_url(&self) -> &str {
        &self.collector_base_url
    }

    #[must_use]
    pub fn site_base(&self) -> &str {
        &self.site_base
    }

    #[must_use]
    pub fn category_path(&self) -> &str {
        &self.category_path
    }

    #[must_use]
    pub fn daterange(&self) -> u32 {
        self.daterange
    }

    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    #[must_use]
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_executable(&self) -> Option<&Path> {
        self.chrome_executable.as_deref()
    }

    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    #[must_use]
    pub fn content_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.content_wait_timeout_secs)
    }

    #[must_use]
    pub fn detail_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_wait_timeout_secs)
    }

    #[must_use]
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }

    #[must_use]
    pub fn navigation_attempts(&self) -> u32 {
        self.navigation_attempts
    }

    #[must_use]
    pub fn content_wait_attempts(&self) -> u32 {
        self.content_wait_attempts
    }

    #[must_use]
    pub fn detail_attempts(&self) -> u32 {
        self.detail_attempts
    }
}
