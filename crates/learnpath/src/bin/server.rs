//! Roadmap server binary
//!
//! Run with: cargo run -p learnpath --bin learnpath-server

use learnpath::{config::AppConfig, server::Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnpath=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional TOML config, env overrides either way
    let config = match std::env::var("LEARNPATH_CONFIG") {
        Ok(path) => AppConfig::load(path)?,
        Err(_) => AppConfig::from_env(),
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Roadmap model: {}", config.gemini.roadmap_model);
    tracing::info!("  - Content model: {}", config.gemini.content_model);
    tracing::info!("  - Poll interval: {}s", config.gemini.poll_interval_secs);
    tracing::info!("  - Database: {}", config.storage.db_path.display());

    let server = Server::new(config)?;

    println!("Server starting on http://{}", server.address());
    println!("  POST /submit-form      - Upload course documents");
    println!("  GET  /api/roadmap      - Read a stored roadmap");
    println!("  GET  /api/objective    - Read stored objective text");
    println!("  GET  /api/video        - Look up a topic video");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
