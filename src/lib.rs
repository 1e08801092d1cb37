//! eveboard -- dashboard over static IDS alert fixtures.
//!
//! Loads a Suricata-style `eve.json` collection once, then derives alert
//! counts per signature, the severity distribution, and a filterable,
//! sortable alert table. The views are rendered to the terminal or served
//! as a read-only local web page.

pub mod analysis;
pub mod api;
pub mod config;
pub mod dataset;
pub mod model;
pub mod render;
pub mod table;
pub mod telemetry;

use anyhow::{Context, Result};

use crate::dataset::AlertSet;
use crate::table::SortState;

/// Serve the dashboard for `alerts` on `bind` until the process is stopped.
pub async fn serve(bind: &str, alerts: AlertSet, default_sort: SortState) -> Result<()> {
    let addr: std::net::SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address: {}", bind))?;
    let app = api::router(api::state::AppState::new(alerts, default_sort));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "eveboard listening");
    axum::serve(listener, app).await?;

    Ok(())
}
