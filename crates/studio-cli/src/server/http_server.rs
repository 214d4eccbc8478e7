//! HTTP server startup and lifecycle management.

use std::time::Instant;

use axum::Router;
use tokio::net::TcpListener;

use super::{Result, ServerError, shutdown_signal};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds the configured address and serves `app` until a shutdown signal.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the address cannot be
/// bound, or the server fails while running.
pub async fn serve(app: Router, server_config: ServerConfig) -> Result<()> {
    if let Err(validation_error) = server_config.validate() {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %validation_error,
            "invalid server configuration"
        );
        return Err(ServerError::InvalidConfig(validation_error.to_string()));
    }

    let server_addr = server_config.server_addr();
    let listener = TcpListener::bind(server_addr).await.map_err(|source| {
        let error = ServerError::BindError {
            address: server_addr.to_string(),
            source,
        };
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %error,
            error_code = error.error_code(),
            suggestion = error.suggestion(),
            "failed to bind to address"
        );
        error
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "server is ready and listening for connections"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "server is bound to all interfaces, ensure firewall rules are configured"
        );
    }

    let start_time = Instant::now();
    let shutdown = shutdown_signal(server_config.shutdown_timeout());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                kind = ?err.kind(),
                uptime_secs = start_time.elapsed().as_secs(),
                "server encountered an error"
            );
            ServerError::Runtime(err)
        })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        uptime_secs = start_time.elapsed().as_secs(),
        "server shut down gracefully"
    );
    Ok(())
}
