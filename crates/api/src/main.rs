use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobdiary_api::config::ServerConfig;
use jobdiary_api::router::build_app_router;
use jobdiary_api::state::AppState;

/// Default filter for `ENV=dev`; everything else logs at `info`.
const DEV_LOG_FILTER: &str = "jobdiary_api=debug,jobdiary_db=debug,tower_http=debug,sqlx::query=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");

    init_tracing(&config);
    tracing::info!(?config, "Configuration loaded");

    // --- Database ---
    let pool = jobdiary_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    jobdiary_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    jobdiary_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    match &config.public_base_url {
        Some(url) => tracing::info!(public_base_url = %url, "Resource links use public base URL"),
        None => tracing::info!("PUBLIC_BASE_URL unset, resource links are relative"),
    }

    // --- App ---
    let addr = config.bind_addr().expect("Invalid HOST");

    let config = Arc::new(config);
    let state = AppState {
        pool,
        config: Arc::clone(&config),
    };
    let app = build_app_router(state, &config);

    tracing::info!(%addr, env = %config.env, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Human-readable output in dev, JSON lines elsewhere. `RUST_LOG` wins over
/// both defaults.
fn init_tracing(config: &ServerConfig) {
    let dev = config.is_dev();
    let default_filter = if dev { DEV_LOG_FILTER } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(dev.then(|| tracing_subscriber::fmt::layer()))
        .with((!dev).then(|| tracing_subscriber::fmt::layer().json()))
        .init();
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
