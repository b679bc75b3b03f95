//! Relatório Pro - Monthly Sales Performance Reports
//!
//! Serves a small submission form and turns each record into a styled,
//! chart-bearing XLSX workbook for download.

mod currency;
mod report;
mod server;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Bind address override, e.g. `RELATORIO_BIND=0.0.0.0:8080`.
const BIND_ENV: &str = "RELATORIO_BIND";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, server::router())
        .await
        .context("server error")?;
    Ok(())
}
