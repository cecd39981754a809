//! # HTTP Server
//!
//! Combines the classification and observability routers behind one CORS
//! layer and serves them.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::storage::Store;

use super::config::HttpServerConfig;
use super::mutant_routes::{mutant_routes, MutantState};
use super::observability_routes::observability_routes;

/// HTTP server for the classification API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `store`, caching `/stats` for `stats_ttl`.
    pub fn new<S: Store + 'static>(
        config: HttpServerConfig,
        store: Arc<S>,
        metrics: Arc<MetricsRegistry>,
        stats_ttl: Duration,
    ) -> Self {
        let state = Arc::new(MutantState::new(store, Arc::clone(&metrics), stats_ttl));
        let router = Self::build_router(&config, state, metrics);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router<S: Store + 'static>(
        config: &HttpServerConfig,
        state: Arc<MutantState<S>>,
        metrics: Arc<MetricsRegistry>,
    ) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(mutant_routes(state))
            .merge(observability_routes(metrics))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process stops.
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(
            Event::ServerListening,
            &[("addr", listener.local_addr()?.to_string().as_str())],
        );

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
