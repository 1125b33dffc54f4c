use std::future::Future;

use axum::Router;
use configs::AppConfig;
use models::db::{self, DatabaseConfig};
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Serve `app` on `listener` until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: open storage, build the app and run the HTTP server until Ctrl+C.
/// The storage handle is closed after the server has drained.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = db::connect_with_config(&DatabaseConfig::from(&cfg.database)).await?;
    if cfg.database.auto_migrate {
        db::migrate(&db).await?;
        info!("database schema up to date");
    }

    let state = ServerState::new(db.clone());
    let app: Router = routes::build_router(state, build_cors());

    let listener = TcpListener::bind(cfg.server.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "starting video server");
    serve_then_close(listener, app, db, shutdown_signal()).await
}

/// Serve until `shutdown`, then close `db` whether or not serving failed.
pub async fn serve_then_close<F>(
    listener: TcpListener,
    app: Router,
    db: DatabaseConnection,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let served = serve(listener, app, shutdown).await;
    db::close(db).await?;
    served?;
    Ok(())
}
