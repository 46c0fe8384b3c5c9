//! Hexmerge Server
//!
//! Serve a hexmerge game over HTTP and WebSocket.

use hexmerge_vis::{GameSession, LocalAssigner, ValueSource, VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexmerge_vis=info,hexmerge_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VisConfig::from_env()?;

    println!("Hexmerge");
    println!("========");
    println!();
    println!("  Radius: {} (allowed {}..={})", config.radius, config.game.min_radius, config.game.max_radius);
    match &config.value_server_url {
        Some(url) => println!("  Values: {}", url),
        None => println!("  Values: local"),
    }
    println!();

    let source = ValueSource::from_config(&config)?;
    let session = GameSession::new(config.radius, config.game)?;
    let server = VisServer::new(session, source, LocalAssigner::new(config.seed));

    // A failed first request leaves an empty board; POST /api/new retries.
    if let Err(e) = server.new_game(None).await {
        tracing::warn!(error = %e, "first game could not be seeded");
    }

    println!("Starting server on http://{}", config.api_addr);
    println!();

    server.serve(config.api_addr).await?;

    Ok(())
}
