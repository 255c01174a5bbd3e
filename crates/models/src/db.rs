use std::time::Duration;

use anyhow::anyhow;
use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;
use url::Url;

/// Combine the endpoint URL with the access credential (as password).
pub fn connection_url(cfg: &DatabaseConfig) -> anyhow::Result<Url> {
    let mut url = Url::parse(cfg.url.trim())?;
    if !cfg.credential.is_empty() {
        url.set_password(Some(&cfg.credential))
            .map_err(|_| anyhow!("database.url 无法携带凭据: {}", cfg.url))?;
    }
    Ok(url)
}

pub fn connect_options(cfg: &DatabaseConfig) -> anyhow::Result<ConnectOptions> {
    let url = connection_url(cfg)?;
    let mut opts = ConnectOptions::new(url.to_string());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    Ok(opts)
}

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let opts = connect_options(cfg)?;
    // 日志中不输出凭据，仅记录主机与库名
    let url = connection_url(cfg)?;
    let db = Database::connect(opts).await?;
    info!(
        event = "db_connected",
        host = url.host_str().unwrap_or_default(),
        database = url.path().trim_start_matches('/'),
        max_connections = cfg.max_connections,
        "database pool ready"
    );
    Ok(db)
}

/// Single-connection in-memory SQLite, used by tests.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    Ok(Database::connect(opts).await?)
}
