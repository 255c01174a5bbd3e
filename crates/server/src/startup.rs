use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over an already connected database.
pub fn app(db: DatabaseConnection, request_timeout: Duration) -> Router {
    routes::build_router(AppState::new(db), build_cors(), request_timeout)
}

/// Connect to storage, apply migrations when enabled, then serve until
/// `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = models::db::connect(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migration failed: {e}")))?;
        info!(event = "migrations_applied", "schema up to date");
    }

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;

    let app = app(db, Duration::from_secs(cfg.server.request_timeout_secs));

    let listener = TcpListener::bind(addr).await?;
    info!(
        event = "listening",
        %addr,
        request_timeout_secs = cfg.server.request_timeout_secs,
        "http server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!(event = "server_stopped", "http server stopped");
    Ok(())
}
