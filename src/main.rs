use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roomchat::{
    build_router, room::repository::InMemoryRoomRepository,
    websockets::InMemoryConnectionManager, AppState, ServerConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomchat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    info!(?config, "Starting chat room server");

    // Rooms and connections live in memory for the lifetime of the process
    let app_state = AppState::new(
        Arc::new(InMemoryRoomRepository::new()),
        Arc::new(InMemoryConnectionManager::new()),
    );

    let app = build_router(app_state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
