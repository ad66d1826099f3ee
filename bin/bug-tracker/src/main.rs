//! # Bug-Tracker Binary
//!
//! The entry point that assembles the application based on compile-time features.

use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use bt_api::AppState;
use secrecy::ExposeSecret;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod config;

// Feature-gated imports: the binary is assembled from plugins
#[cfg(feature = "db-sqlite")]
use bt_db_sqlite::SqliteBugRepo;

#[cfg(feature = "auth-jwt")]
use bt_auth_jwt::JwtAuthProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = config::load().context("failed to load configuration")?;

    // 1. Initialize the persistence implementation
    #[cfg(feature = "db-sqlite")]
    let repo = Arc::new(
        SqliteBugRepo::connect(&cfg.database_url)
            .await
            .context("failed to open the bug store")?,
    );

    // 2. Initialize the auth implementation
    #[cfg(feature = "auth-jwt")]
    let auth = Arc::new(JwtAuthProvider::new(cfg.jwt_secret.expose_secret()));

    // 3. Wrap in AppState (dynamic dispatch keeps the API crate plugin-agnostic)
    let state = AppState {
        repo: repo.clone(),
        auth,
    };

    // 4. REST surface plus the static single-page client for everything else
    let app = bt_api::router(state)
        .fallback_service(ServeDir::new(&cfg.static_dir).append_index_html_on_directories(true))
        .layer(cors_policy(&cfg.allowed_origins))
        .layer(TraceLayer::new_for_http());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!(%addr, "bug-tracker listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Explicit lifecycle: the pool opened at startup closes at shutdown.
    #[cfg(feature = "db-sqlite")]
    repo.close().await;

    Ok(())
}

/// Configures CORS for the browser client. Only the configured origins may
/// make cross-origin calls; an empty list means same-origin only.
fn cors_policy(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install shutdown handler");
    }
}
