use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, debug, trace, error, warn};

use crate::config::{initialize_app_state, DatabaseConfig};
use crate::router::create_router;

pub async fn serve(config: &DatabaseConfig, bind_address: &str) -> Result<()> {
    trace!("Entering serve function");
    info!("Tic Tac Toe API starting up");
    debug!("Bind address: {}", bind_address);

    // Initialize application state
    trace!("Initializing application state");
    let state = match initialize_app_state(config).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };
    // Kept so the pool can be closed once the server has drained.
    let db = state.db.clone();

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Tic Tac Toe API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Closing database pool");
    if let Err(e) = db.close().await {
        warn!("Failed to close database pool cleanly: {}", e);
    }

    info!("Server shutdown gracefully");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
