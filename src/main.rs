// jobsift daemon
//
// Starts the in-process collector service, then runs one scrape immediately
// and re-runs on a fixed daily interval. A failed run is logged and the
// scheduler keeps going; there is no partial-success signal beyond the
// summary log line.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobsift::{ScrapeConfig, collector, run_scrape};

const RUN_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().context("invalid log directive")?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = match std::env::var("PORT") {
        Ok(raw) => raw.parse().context("PORT must be a port number")?,
        Err(_) => 4000,
    };
    let collector_url =
        std::env::var("COLLECTOR_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));

    let config = ScrapeConfig::builder()
        .collector_base_url(collector_url)
        .build()?;

    tokio::spawn(async move {
        if let Err(e) = collector::serve(port).await {
            error!("collector server exited: {e:#}");
        }
    });

    // First tick fires immediately; subsequent ones daily.
    let mut ticker = tokio::time::interval(RUN_INTERVAL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        info!("starting scrape run");
        match run_scrape(&config).await {
            Ok(summary) => info!(?summary, "scrape run finished"),
            Err(e) => error!("scrape run failed: {e:#}"),
        }
    }
}
