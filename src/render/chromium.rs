//! Chromium-backed render context
//!
//! Implements [`RenderContext`] over a `chromiumoxide::Page`. Selector waits
//! poll the DOM rather than relying on navigation events because the target
//! site renders its content asynchronously after the load event fires.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chromiumoxide::Page;
use std::time::{Duration, Instant};
use tracing::debug;

use super::RenderContext;

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Render context driving a single Chromium page over CDP.
pub struct ChromiumRenderContext {
    page: Page,
}

impl ChromiumRenderContext {
    pub fn new(page: Page) -> Self {
        Self { page }
    }
}

#[async_trait]
impl RenderContext for ChromiumRenderContext {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .with_context(|| format!("Failed to navigate to {url}"))?;
        self.page
            .wait_for_navigation()
            .await
            .with_context(|| format!("Failed to wait for page load of {url}"))?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            if self.page.find_element(selector).await.is_ok() {
                debug!(
                    selector,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "selector appeared"
                );
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(anyhow!(
                    "timeout waiting for selector '{selector}' after {timeout:?}"
                ));
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .context("Failed to evaluate script")?;
        result
            .into_value::<serde_json::Value>()
            .context("Failed to read script result as JSON")
    }

    async fn click_nth(&self, selector: &str, index: usize) -> Result<()> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .with_context(|| format!("elements '{selector}' not found"))?;
        let element = elements
            .get(index)
            .ok_or_else(|| anyhow!("element '{selector}' at index {index} not found"))?;
        element
            .click()
            .await
            .with_context(|| format!("Failed to click '{selector}' at index {index}"))?;
        Ok(())
    }
}
