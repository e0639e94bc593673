use anyhow::Result;
use tracing::{info, trace};

use super::initdb::{connect, run_migrations};
use super::serve::serve;
use crate::config::DatabaseConfig;

pub async fn migrate_and_serve(config: &DatabaseConfig, bind_address: &str) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");

    let db = connect(&config.url).await?;
    run_migrations(&db).await?;
    db.close().await?;

    serve(config, bind_address).await
}
