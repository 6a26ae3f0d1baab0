//! Configuration module for the scrape pipeline
//!
//! This module provides the `ScrapeConfig` struct and its type-safe builder
//! for configuring scrape runs with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{ScrapeConfigBuilder, WithCollector};
pub use types::{Bucket, Keyword, PAGE_SIZE, ScrapeConfig, default_keywords};
