use std::sync::Arc;

use wellness_coach::config::ServerConfig;
use wellness_coach::routes::{self, AppState};
use wellness_coach::store::{Database, LibSqlBackend};
use wellness_coach::workout::spawn_tick_task;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env();

    let db_path = std::path::Path::new(&config.db_path);
    let db: Arc<dyn Database> = Arc::new(LibSqlBackend::new_local(db_path).await?);
    tracing::info!(path = %config.db_path, "Store ready");

    let state = AppState::new(db, &config)?;

    // One background task drives every active workout countdown.
    spawn_tick_task(Arc::clone(&state.workouts));

    let app = routes::router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
