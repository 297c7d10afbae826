use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::DatabaseConfig;

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(cfg.connect_options()?)
        .await
        .context("connect to database")?;
    info!(host = %cfg.host, port = cfg.port, database = %cfg.name, "database connected");
    Ok(db)
}

/// Creates or updates the `users` table from the embedded migrations.
pub async fn migrate(db: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;
    Ok(())
}
