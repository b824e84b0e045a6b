// Library crate for the chat room server
// This file exposes the public API for integration tests

pub mod config;
pub mod room;
pub mod shared;
pub mod websockets;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

// Re-export commonly used types for easier access in tests
pub use config::ServerConfig;
pub use room::{models::RoomModel, repository::RoomRepository, service::RoomService};
pub use shared::{AppError, AppState};
pub use websockets::{
    ConnectionManager, ConnectionRegistry, MessageHandler, RoomLifecycleController, ServerEvent,
    WebsocketReceiveHandler,
};

/// Builds the HTTP + WebSocket router; unknown paths fall through to static files
pub fn build_router(app_state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/rooms", post(room::create_room))
        .route("/api/rooms/public", get(room::list_public_rooms))
        .route("/api/rooms/random", get(room::random_public_room))
        .route("/ws", get(websockets::websocket_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
