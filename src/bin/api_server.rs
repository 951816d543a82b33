// API Server Binary Entry Point
//
// Purpose: Load the game datasets and serve the query endpoints
// Usage: cargo run --bin api_server

use game_insights_rust::{create_router, AppState, CacheSettings};
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "game_insights_rust=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let port: u16 = env_or("PORT", 3000);
    let cache = CacheSettings {
        max_capacity: env_or("CACHE_CAPACITY", 10_000),
        time_to_live: Duration::from_secs(env_or("CACHE_TTL_SECS", 300)),
    };

    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {}", data_dir);
    tracing::info!("  PORT: {}", port);
    tracing::info!("  CACHE_CAPACITY: {}", cache.max_capacity);
    tracing::info!("  CACHE_TTL_SECS: {}", cache.time_to_live.as_secs());

    // All datasets must be resident before the socket is bound
    let state = AppState::new(&data_dir, cache).await?;
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
