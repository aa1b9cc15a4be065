//! API server implementation

use std::future::Future;

use axum::Router;
use tabula_core::TabulaConfig;
use tokio::net::TcpListener;

use crate::Result;
use crate::routes;
use crate::state::AppState;

/// Tabula API server
#[derive(Debug)]
pub struct Server {
    config: TabulaConfig,
    state: AppState,
}

impl Server {
    /// Create a server from a validated configuration.
    pub fn new(config: TabulaConfig) -> Result<Self> {
        let state = AppState::from_config(&config)?;
        Ok(Self { config, state })
    }

    /// Handler state shared by all routes.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Configuration the server was built from.
    pub fn config(&self) -> &TabulaConfig {
        &self.config
    }

    /// The application router.
    pub fn router(&self) -> Router {
        routes::router(self.state.clone())
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.server.bind_addr()).await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            %addr,
            store = %self.state.store.path().display(),
            "tabula listening"
        );
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("tabula stopped");
        Ok(())
    }
}
