//! HTTP Server
//!
//! Binds a TCP listener and serves the router until the shutdown future resolves.

use crate::handler;
use crate::types::AppState;
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::io;
use tokio::net::TcpListener;
use tracing::info;

const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8000;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

impl HttpServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/jobs", get(handler::list).post(handler::create))
        .route(
            "/jobs/{external_id}",
            get(handler::get).put(handler::replace).patch(handler::patch),
        )
        .route("/livez", get(handler::livez))
        .route("/healthz", get(handler::healthz))
        .with_state(state)
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    state: AppState,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests
    pub async fn run<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr).await?;

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "HTTP server listening"
        );

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}
