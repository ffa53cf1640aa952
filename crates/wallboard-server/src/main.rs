use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use wallboard_api::templates::Templates;
use wallboard_api::{AppStateInner, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallboard=debug,tower_http=debug".into()),
        )
        .init();

    // Config — a production connection string wins over the dev file path
    let db_path = std::env::var("WALLBOARD_DATABASE_URL")
        .or_else(|_| std::env::var("WALLBOARD_DB_PATH"))
        .unwrap_or_else(|_| "wallboard.db".into());
    let host = std::env::var("WALLBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("WALLBOARD_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database and templates
    let db = wallboard_db::Database::open(&PathBuf::from(&db_path))?;
    let templates = Templates::load()?;

    // Shared state
    let state = Arc::new(AppStateInner { db, templates });

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Wallboard listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
