//! SearchScope - Search Console Monitoring Service
//!
//! Aggregates Search Console KPIs across registered web properties and
//! serves period-over-period summaries and daily trends as JSON.

mod config;
mod gsc;
mod metrics;
mod sites;
mod web;

use config::ServerConfig;
use gsc::{MockSearchConsole, SearchConsoleClient, SearchStatsProvider};
use sites::SiteRegistry;
use web::Server;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("searchscope=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load();
    tracing::info!("Starting SearchScope on port {}...", cfg.http_port);

    // Load the monitored-site registry
    let registry = match &cfg.sites_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let registry = SiteRegistry::from_json(&json)?;
            tracing::info!("Loaded {} sites from {}", registry.len(), path);
            registry
        }
        None => {
            tracing::info!("No sites file configured, using built-in registry");
            sites::default_registry()
        }
    };

    // Pick the upstream provider: the real API when a token is
    // configured, the deterministic mock otherwise.
    let provider: Arc<dyn SearchStatsProvider> = match &cfg.access_token {
        Some(token) => {
            tracing::info!("Using Search Console API");
            Arc::new(SearchConsoleClient::new(token.clone()))
        }
        None => {
            tracing::warn!("No access token configured, serving mock data");
            Arc::new(MockSearchConsole::new())
        }
    };

    // Start web server
    let server = Server::new(cfg, Arc::new(registry), provider);
    server.start().await?;

    Ok(())
}
