//! Shared test fixtures
//!
//! `FakeRenderContext` stands in for a live browser: it serves canned
//! listing pages keyed by (salary bucket, page number), simulates the
//! click-to-open detail panel state machine, and can inject navigation
//! failures to exercise retry and abort paths.

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use jobsift::config::Bucket;
use jobsift::render::RenderContext;
use jobsift::scrape::js_scripts::{
    DETAIL_PANEL_SELECTOR, DETAIL_TEXT_SCRIPT, JOB_CARD_SELECTOR, JOB_CARDS_SCRIPT,
    JOB_TITLE_SELECTOR, TOTAL_JOBS_SCRIPT,
};
use jobsift::{Keyword, ScrapeConfig};

pub struct FakeCard {
    pub id: String,
    pub title: String,
    /// `None` means the detail panel never renders for this card.
    pub detail: Option<String>,
}

pub fn card(id: &str, title: &str, detail: &str) -> FakeCard {
    FakeCard {
        id: id.to_string(),
        title: title.to_string(),
        detail: Some(detail.to_string()),
    }
}

pub fn card_without_detail(id: &str, title: &str) -> FakeCard {
    FakeCard {
        id: id.to_string(),
        title: title.to_string(),
        detail: None,
    }
}

pub struct FakePage {
    pub total_jobs: u64,
    pub cards: Vec<FakeCard>,
}

#[derive(Default)]
struct FakeState {
    /// (bucket token, page) of the most recent successful navigation.
    current: Option<(String, u32)>,
    /// Detail text of the most recently clicked card, once a click
    /// happened. The inner `None` models a panel that never renders.
    open_detail: Option<Option<String>>,
    navigations: Vec<String>,
}

pub struct FakeRenderContext {
    pages: HashMap<(String, u32), FakePage>,
    /// Remaining injected navigation failures per (token, page);
    /// `u32::MAX` fails forever.
    nav_failures: Mutex<HashMap<(String, u32), u32>>,
    state: Mutex<FakeState>,
}

impl FakeRenderContext {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            nav_failures: Mutex::new(HashMap::new()),
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn with_page(
        mut self,
        token: &str,
        page: u32,
        total_jobs: u64,
        cards: Vec<FakeCard>,
    ) -> Self {
        self.pages
            .insert((token.to_string(), page), FakePage { total_jobs, cards });
        self
    }

    /// Make navigation to (token, page) fail `times` times before
    /// succeeding; `u32::MAX` fails on every attempt.
    pub fn fail_navigation(self, token: &str, page: u32, times: u32) -> Self {
        self.nav_failures
            .lock()
            .unwrap()
            .insert((token.to_string(), page), times);
        self
    }

    /// URLs of every successful navigation, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    fn parse_listing_url(url: &str) -> Result<(String, u32)> {
        let parsed = url::Url::parse(url)?;
        let mut token = None;
        let mut page = None;
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "salaryrange" => token = Some(value.into_owned()),
                "page" => page = Some(value.parse::<u32>()?),
                _ => {}
            }
        }
        Ok((
            token.ok_or_else(|| anyhow!("missing salaryrange in {url}"))?,
            page.ok_or_else(|| anyhow!("missing page in {url}"))?,
        ))
    }

    fn current_page(&self) -> Option<&FakePage> {
        let state = self.state.lock().unwrap();
        let key = state.current.clone()?;
        self.pages.get(&key)
    }
}

#[async_trait]
impl RenderContext for FakeRenderContext {
    async fn navigate(&self, url: &str) -> Result<()> {
        let key = Self::parse_listing_url(url)?;

        {
            let mut failures = self.nav_failures.lock().unwrap();
            if let Some(remaining) = failures.get_mut(&key)
                && *remaining > 0
            {
                if *remaining != u32::MAX {
                    *remaining -= 1;
                }
                return Err(anyhow!("navigation timeout"));
            }
        }

        let mut state = self.state.lock().unwrap();
        state.current = Some(key);
        state.open_detail = None;
        state.navigations.push(url.to_string());
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<()> {
        if selector == JOB_CARD_SELECTOR {
            match self.current_page() {
                Some(page) if !page.cards.is_empty() => Ok(()),
                _ => Err(anyhow!("timeout waiting for selector '{selector}'")),
            }
        } else if selector == DETAIL_PANEL_SELECTOR {
            let state = self.state.lock().unwrap();
            match &state.open_detail {
                Some(Some(_)) => Ok(()),
                _ => Err(anyhow!("timeout waiting for selector '{selector}'")),
            }
        } else {
            Err(anyhow!("unexpected selector '{selector}'"))
        }
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        if script == TOTAL_JOBS_SCRIPT {
            Ok(self
                .current_page()
                .map_or(json!(null), |page| json!(page.total_jobs)))
        } else if script == JOB_CARDS_SCRIPT {
            let cards: Vec<serde_json::Value> = self.current_page().map_or(Vec::new(), |page| {
                page.cards
                    .iter()
                    .map(|c| json!({ "id": c.id, "fields": { "jobTitle": c.title } }))
                    .collect()
            });
            Ok(json!(cards))
        } else if script == DETAIL_TEXT_SCRIPT {
            let state = self.state.lock().unwrap();
            Ok(match &state.open_detail {
                Some(Some(text)) => json!(text),
                _ => json!(null),
            })
        } else {
            Err(anyhow!("unexpected script"))
        }
    }

    async fn click_nth(&self, selector: &str, index: usize) -> Result<()> {
        if selector != JOB_TITLE_SELECTOR {
            return Err(anyhow!("unexpected click selector '{selector}'"));
        }
        let detail = {
            let state = self.state.lock().unwrap();
            let key = state
                .current
                .clone()
                .ok_or_else(|| anyhow!("no page loaded"))?;
            let page = self
                .pages
                .get(&key)
                .ok_or_else(|| anyhow!("no page loaded"))?;
            let card = page
                .cards
                .get(index)
                .ok_or_else(|| anyhow!("element '{selector}' at index {index} not found"))?;
            card.detail.clone()
        };
        self.state.lock().unwrap().open_detail = Some(detail);
        Ok(())
    }
}

/// A config tuned for tests: the given buckets, small retry budgets so
/// failure paths stay fast, and the collector pointed at a test server.
pub fn test_config(collector_url: &str, buckets: &[&str]) -> ScrapeConfig {
    ScrapeConfig::builder()
        .collector_base_url(collector_url)
        .buckets(buckets.iter().map(|token| Bucket::monthly(*token)).collect())
        .navigation_attempts(2)
        .content_wait_attempts(2)
        .detail_attempts(2)
        .content_wait_timeout_secs(1)
        .detail_wait_timeout_secs(1)
        .build()
        .expect("test config must build")
}

/// Keyword set shortened to the handful the fixtures exercise.
pub fn test_keywords() -> Vec<Keyword> {
    vec![
        Keyword::new("Java", "java"),
        Keyword::new("Python", "python"),
        Keyword::new("NodeJS", "nodejs"),
    ]
}
