//! Collector service
//!
//! The downstream sink the dispatcher posts to: two accept-and-acknowledge
//! endpoints with no validation contract beyond HTTP status. Runs in-process
//! alongside the pipeline so a single deployment is self-contained; what
//! happens to accepted batches beyond logging is out of scope here.

use anyhow::{Context, Result};
use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::post};
use tokio::net::TcpListener;
use tracing::info;

/// Build the collector's router.
pub fn router() -> Router {
    Router::new()
        .route("/v1/job-detail-list", post(receive_job_details))
        .route("/v1/job-count", post(receive_job_count))
}

/// Bind `port` on all interfaces and serve the collector until the process
/// exits.
pub async fn serve(port: u16) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind collector port {port}"))?;
    info!("Collector listening on port {port}");
    serve_with(listener).await
}

/// Serve the collector on an already-bound listener.
pub async fn serve_with(listener: TcpListener) -> Result<()> {
    axum::serve(listener, router())
        .await
        .context("Collector server error")?;
    Ok(())
}

async fn receive_job_details(Json(batch): Json<serde_json::Value>) -> impl IntoResponse {
    let count = batch.as_array().map_or(0, Vec::len);
    info!(count, "received job detail batch");
    (StatusCode::OK, "Job details received")
}

async fn receive_job_count(Json(aggregate): Json<serde_json::Value>) -> impl IntoResponse {
    info!(%aggregate, "received job count");
    (StatusCode::OK, "Job count received")
}
