//! Per-bucket keyword tallies
//!
//! One aggregator is instantiated per bucket and threaded through the page
//! loop; counters never live in process-wide state. Matching is a presence
//! check per job: a description mentioning a keyword five times still
//! counts once.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::types::RangeAggregate;
use crate::config::{Bucket, Keyword};

/// Lowercase the text and strip all whitespace.
///
/// This exact normalization is part of the matching contract: collapsing
/// whitespace merges words across their original boundaries, so "node js"
/// and "nodejs" become the same matched form. Keyword tokens are assumed
/// to already be in normalized form.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Running keyword counters and record total for one bucket.
pub struct Aggregator {
    bucket: Bucket,
    capture_date: NaiveDate,
    total: u64,
    counters: Vec<(Keyword, u64)>,
}

impl Aggregator {
    pub fn new(bucket: Bucket, keywords: &[Keyword], capture_date: NaiveDate) -> Self {
        Self {
            bucket,
            capture_date,
            total: 0,
            counters: keywords.iter().cloned().map(|k| (k, 0)).collect(),
        }
    }

    /// Fold one job's description into the bucket's tallies.
    ///
    /// Counters are monotonically non-decreasing across a bucket's pages;
    /// each recognized keyword gains at most 1 per job.
    pub fn record(&mut self, description: &str) {
        self.total += 1;
        let normalized = normalize(description);
        for (keyword, count) in &mut self.counters {
            if normalized.contains(&keyword.token) {
                *count += 1;
            }
        }
    }

    /// Rebuild the cumulative aggregate for everything recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> RangeAggregate {
        let counts: BTreeMap<String, u64> = self
            .counters
            .iter()
            .map(|(keyword, count)| (keyword.display.clone(), *count))
            .collect();
        RangeAggregate {
            salary_range: self.bucket.token.clone(),
            total: self.total,
            counts,
            date: self.capture_date,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }
}
