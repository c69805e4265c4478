//! Web server module.

mod handlers;

pub use handlers::*;

use crate::config::ServerConfig;
use crate::gsc::SearchStatsProvider;
use crate::sites::SiteRegistry;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub registry: Arc<SiteRegistry>,
    pub provider: Arc<dyn SearchStatsProvider>,
}

/// Web server for SearchScope.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new server with the given dependencies.
    pub fn new(
        config: ServerConfig,
        registry: Arc<SiteRegistry>,
        provider: Arc<dyn SearchStatsProvider>,
    ) -> Self {
        Self {
            state: AppState {
                config,
                registry,
                provider,
            },
        }
    }

    /// Build the router with all routes.
    fn routes(&self) -> Router {
        let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

        Router::new()
            .route("/api/summary", get(handlers::handle_summary))
            .route("/api/sites/{id}", get(handlers::handle_site_detail))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the server on the configured port.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let router = self.routes();

        tracing::info!("Web server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
