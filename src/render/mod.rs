//! Render context abstraction
//!
//! The listing site is client-rendered: records only exist after JavaScript
//! runs, and detail views are reached by mutating the current page's state
//! via click rather than by independent URL fetch. Everything the pipeline
//! needs from a live rendering session is captured by the four operations of
//! [`RenderContext`], so the navigation and extraction layers can be
//! exercised in tests against a fake serving canned DOM fixtures.

pub mod chromium;
pub mod session;

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

pub use chromium::ChromiumRenderContext;
pub use session::BrowserSession;

/// A controllable, JavaScript-executing page session.
///
/// Exactly one render context is active per scrape run, and all operations
/// against it are logically sequential: clicking a card mutates the shared
/// page state the next extraction reads, so callers must never interleave
/// operations for different jobs or pages.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Navigate the session to `url` and wait for the load event.
    ///
    /// Completion does not imply content readiness; callers that need
    /// rendered elements must follow up with [`wait_for_selector`].
    ///
    /// [`wait_for_selector`]: RenderContext::wait_for_selector
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait until at least one element matches `selector`, polling up to
    /// `timeout`. Errors mention "timeout" so the retry classifier treats
    /// exhausted waits as transient.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Evaluate a JavaScript expression in the page and return its value.
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;

    /// Click the `index`-th element (DOM order) matching `selector`.
    async fn click_nth(&self, selector: &str, index: usize) -> Result<()>;
}
