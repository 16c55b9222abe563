use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use stimme_api::{AppState, AppStateInner, auth};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stimme=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("STIMME_DB_PATH").unwrap_or_else(|_| "stimme.db".into());
    let host = std::env::var("STIMME_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("STIMME_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let admin_password = std::env::var("STIMME_ADMIN_PASSWORD").unwrap_or_else(|_| {
        warn!("STIMME_ADMIN_PASSWORD not set, using the development default");
        "change-me-please".into()
    });
    let secure_cookies = std::env::var("STIMME_SECURE_COOKIES")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    // Init database and the one-time admin credential
    let db = stimme_db::Database::open(&PathBuf::from(&db_path))?;
    auth::bootstrap_admin(&db, &admin_password)?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner { db, secure_cookies });

    let app = stimme_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("AzubiStimme server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
