//! Browser session lifecycle
//!
//! Owns exactly one Chromium process per scrape run: launch with a hardened
//! argument set, track the CDP event handler task, and guarantee release of
//! the process and its temp profile directory on every exit path.

use anyhow::{Context, Result, anyhow};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use futures::StreamExt;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{debug, info, warn};

use super::chromium::ChromiumRenderContext;
use crate::config::ScrapeConfig;

/// Wrapper for the launched browser and its event handler task.
///
/// The handler MUST be aborted once the browser is closed, otherwise it
/// runs indefinitely after the CDP connection drops. `Drop` handles the
/// abort and the temp-profile cleanup as a fallback when `shutdown()` was
/// not reached (panic or early return).
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserSession {
    /// Launch a headless Chromium configured for unattended crawling.
    ///
    /// A failure here is fatal for the whole run; partially created
    /// resources (the temp profile dir) are removed before returning.
    pub async fn launch(config: &ScrapeConfig) -> Result<Self> {
        let chrome_path = match config.chrome_executable() {
            Some(path) => path.to_path_buf(),
            None => find_browser_executable()?,
        };

        // Unique temp profile per process so concurrent deployments never
        // contend on a Chrome profile lock.
        let user_data_dir = std::env::temp_dir().join(format!("jobsift_chrome_{}", std::process::id()));
        std::fs::create_dir_all(&user_data_dir).context("Failed to create user data directory")?;

        let mut config_builder = BrowserConfigBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .window_size(1920, 1080)
            .user_data_dir(user_data_dir.clone())
            .chrome_executable(chrome_path);

        if config.headless() {
            config_builder = config_builder.headless_mode(HeadlessMode::default());
        } else {
            config_builder = config_builder.with_head();
        }

        config_builder = config_builder
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-infobars")
            .arg("--disable-notifications")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-accelerated-2d-canvas")
            .arg("--disable-gpu")
            .arg("--disable-software-rasterizer")
            .arg("--disable-setuid-sandbox")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--no-sandbox")
            .arg("--disable-extensions")
            .arg("--disable-popup-blocking")
            .arg("--disable-background-networking")
            .arg("--disable-background-timer-throttling")
            .arg("--disable-backgrounding-occluded-windows")
            .arg("--disable-breakpad")
            .arg("--disable-hang-monitor")
            .arg("--metrics-recording-only")
            .arg("--password-store=basic")
            .arg("--mute-audio");

        let browser_config = match config_builder.build() {
            Ok(c) => c,
            Err(e) => {
                let _ = std::fs::remove_dir_all(&user_data_dir);
                return Err(anyhow!("Failed to build browser config: {e}"));
            }
        };

        info!("Launching browser for scrape session");
        let (browser, mut handler) = match Browser::launch(browser_config).await {
            Ok(pair) => pair,
            Err(e) => {
                let _ = std::fs::remove_dir_all(&user_data_dir);
                return Err(anyhow::Error::new(e).context("Failed to launch browser"));
            }
        };

        // Drive the CDP connection; tracked so shutdown can stop it.
        let handler_task = task::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::error!("Browser handler error: {e:?}");
                }
            }
            debug!("Browser event handler task completed");
        });

        Ok(Self {
            browser,
            handler: handler_task,
            user_data_dir: Some(user_data_dir),
        })
    }

    /// Open a fresh page and wrap it as a render context.
    pub async fn new_context(&self) -> Result<ChromiumRenderContext> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("Failed to create page")?;
        Ok(ChromiumRenderContext::new(page))
    }

    /// Close the browser gracefully and release every held resource.
    ///
    /// Order matters: close and wait for the Chrome process first so all
    /// file handles on the profile dir are released, remove the dir, and
    /// only then abort the handler task.
    pub async fn shutdown(mut self) {
        debug!("Closing browser");
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {e}");
        }

        if let Some(dir) = self.user_data_dir.take() {
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                warn!("Failed to clean up profile directory {}: {e}", dir.display());
            }
        }

        self.handler.abort();
        info!("Browser session released");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        // Browser::drop kills the Chrome process if close() never ran.
        if let Some(dir) = self.user_data_dir.take() {
            warn!("BrowserSession dropped without explicit shutdown - removing profile dir");
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                warn!("Failed to clean up profile directory {}: {e}", dir.display());
            }
        }
    }
}

/// Find a Chrome/Chromium executable with platform-specific search paths.
///
/// `CHROMIUM_PATH` overrides all other methods.
pub fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Using browser from CHROMIUM_PATH: {}", path.display());
            return Ok(path);
        }
        warn!(
            "CHROMIUM_PATH points to non-existent file: {}",
            path.display()
        );
    }

    let paths = if cfg!(target_os = "macos") {
        vec![
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        vec![
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    };

    for path_str in paths {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Found browser at: {}", path.display());
            return Ok(path);
        }
    }

    for cmd in &["chromium", "chromium-browser", "google-chrome", "chrome"] {
        if let Ok(output) = Command::new("which").arg(cmd).output()
            && output.status.success()
        {
            let path_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !path_str.is_empty() {
                let path = PathBuf::from(path_str);
                info!("Found browser using 'which': {}", path.display());
                return Ok(path);
            }
        }
    }

    Err(anyhow!(
        "Chrome/Chromium executable not found; set CHROMIUM_PATH or install a browser"
    ))
}
