//! Core configuration types for the scrape pipeline
//!
//! One `ScrapeConfig` replaces the family of near-identical crawl scripts
//! this project grew out of: every knob those scripts differed in (bucket
//! list, timeouts, retry budgets, collector address) is a field here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of listing cards the site renders per results page.
///
/// The site reports a total job count, not a page count; pagination length
/// is derived as `ceil(total / PAGE_SIZE)`.
pub const PAGE_SIZE: u32 = 32;

/// One salary-range partition of the crawl target.
///
/// Identity is the token string used verbatim in the listing query
/// (`"17000-20000"`, or an open-ended `"35000-"`). Buckets are crawled in
/// their configured order, each with its own pagination and keyword tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub token: String,
    /// Pay-period tag sent as the `salarytype` query parameter.
    pub salary_type: String,
}

impl Bucket {
    /// A bucket over monthly salary figures, the only pay period the
    /// target category uses.
    pub fn monthly(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            salary_type: "monthly".to_string(),
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token)
    }
}

/// A keyword tallied against job descriptions.
///
/// `token` is matched against the normalized (lowercased,
/// whitespace-stripped) description text; `display` is the key used in the
/// dispatched aggregate JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub display: String,
    pub token: String,
}

impl Keyword {
    pub fn new(display: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            token: token.into(),
        }
    }
}

/// The language/framework names tallied by default.
///
/// Matching is whitespace-insensitive, so "node js" in a posting still
/// counts toward `nodejs`.
pub fn default_keywords() -> Vec<Keyword> {
    vec![
        Keyword::new("Java", "java"),
        Keyword::new("Python", "python"),
        Keyword::new("JavaScript", "javascript"),
        Keyword::new("TypeScript", "typescript"),
        Keyword::new("ReactJS", "reactjs"),
        Keyword::new("VueJs", "vuejs"),
        Keyword::new("Spring", "spring"),
        Keyword::new("NodeJS", "nodejs"),
        Keyword::new("MySQL", "mysql"),
        Keyword::new("NoSQL", "nosql"),
    ]
}

pub(crate) fn default_buckets() -> Vec<Bucket> {
    [
        "0-11000",
        "11000-14000",
        "14000-17000",
        "17000-20000",
        "20000-25000",
        "25000-35000",
        "35000-",
    ]
    .into_iter()
    .map(Bucket::monthly)
    .collect()
}

/// Main configuration struct for a scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Base address of the downstream collector service.
    ///
    /// **INVARIANT:** Always carries a scheme (normalized in builder).
    pub(crate) collector_base_url: String,
    /// Listing site origin, without trailing slash.
    pub(crate) site_base: String,
    /// Category path segment of the listing URL.
    pub(crate) category_path: String,
    /// Recency filter in days, sent as the `daterange` query parameter.
    pub(crate) daterange: u32,
    /// Ordered salary buckets; crawled one at a time, in this order.
    pub(crate) buckets: Vec<Bucket>,
    /// Keywords tallied against each job description.
    pub(crate) keywords: Vec<Keyword>,
    pub(crate) page_size: u32,
    pub(crate) headless: bool,

    /// Explicit Chrome/Chromium binary; when unset, well-known install
    /// locations and `PATH` are searched.
    pub(crate) chrome_executable: Option<PathBuf>,

    /// Timeout in seconds for a single `goto` + load-event wait.
    pub(crate) navigation_timeout_secs: u64,
    /// Timeout in seconds waiting for listing cards to render.
    ///
    /// The site renders its results asynchronously after navigation
    /// completes, so navigation success alone does not mean content is
    /// present.
    pub(crate) content_wait_timeout_secs: u64,
    /// Timeout in seconds waiting for a job's detail panel to render
    /// after its title control is clicked.
    pub(crate) detail_wait_timeout_secs: u64,
    /// Timeout in seconds for each collector POST.
    pub(crate) dispatch_timeout_secs: u64,

    /// Attempt budget for page navigation. Counts total invocations, so 3
    /// means one try plus two retries.
    pub(crate) navigation_attempts: u32,
    /// Attempt budget for the listing-card content wait.
    pub(crate) content_wait_attempts: u32,
    /// Attempt budget for one job's click-and-read-detail sequence.
    pub(crate) detail_attempts: u32,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            collector_base_url: "http://localhost:4000".to_string(),
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
        }
    }
}
