//! Server startup and shutdown logic

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use fakework_config::EndpointConfig;
use tokio::net::TcpListener;

use crate::app::create_app;
use crate::errors::{EndpointError, EndpointResult};
use crate::handler::AppState;

/// Server application struct
pub struct Server {
    config: EndpointConfig,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: EndpointConfig) -> Self {
        Self { config }
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        create_app(AppState::from_config(&self.config), self.config.enable_tracing)
    }

    /// Bind the configured address
    pub async fn bind(&self) -> EndpointResult<TcpListener> {
        let address = self.config.server_address();
        TcpListener::bind(&address)
            .await
            .map_err(|source| EndpointError::Bind { address, source })
    }

    /// Bind and serve until Ctrl-C or SIGTERM
    pub async fn start(self) -> EndpointResult<()> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> EndpointResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.build_app();
        let local_addr: Option<SocketAddr> = listener.local_addr().ok();

        self.log_config_summary(local_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(EndpointError::Serve)?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    fn log_config_summary(&self, local_addr: Option<SocketAddr>) {
        match local_addr {
            Some(addr) => tracing::info!("Server listening on {}", addr),
            None => tracing::info!("Server listening on {}", self.config.server_address()),
        }
        tracing::info!(
            "Defaults: cpu_ms={} iowait_ms={} response_chars={}",
            self.config.defaults.cpu_ms,
            self.config.defaults.iowait_ms,
            self.config.defaults.response_chars
        );
        match self.config.max_response_chars {
            Some(cap) => tracing::info!("response_chars capped at {}", cap),
            None => tracing::warn!(
                "response_chars is unbounded; values beyond available memory abort the process on allocation"
            ),
        }
        tracing::info!(
            "Tracing: {}",
            if self.config.enable_tracing { "Enabled" } else { "Disabled" }
        );
    }
}

/// Graceful shutdown signal
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
