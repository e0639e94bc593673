use crate::schemas::AppState;
use anyhow::Result;
use sea_orm::{ConnectOptions, Database};
use tracing::{debug, info};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://tictactoe.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Settings needed to build the shared application state.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    /// Upper bound on pooled connections; requests wait for a free one beyond this.
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }
}

/// Open the connection pool and wrap it in [`AppState`].
pub async fn initialize_app_state(config: &DatabaseConfig) -> Result<AppState> {
    info!("Connecting to database");
    debug!("Database URL: {}, max connections: {}", config.url, config.max_connections);

    let mut options = ConnectOptions::new(config.url.clone());
    options.max_connections(config.max_connections);
    let db = Database::connect(options).await?;

    Ok(AppState { db })
}
