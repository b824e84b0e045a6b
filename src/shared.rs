use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::room::{repository::RoomRepository, service::RoomService};
use crate::websockets::{
    BroadcastHub, ConnectionManager, ConnectionRegistry, RoomLifecycleController,
};

/// Shared application state containing all dependencies
///
/// Every service is constructed explicitly and owned by the server instance,
/// so tests can build as many independent instances as they need.
#[derive(Clone)]
pub struct AppState {
    pub room_service: Arc<RoomService>,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub lifecycle: Arc<RoomLifecycleController>,
}

impl AppState {
    /// Wires the directory, registry, hub and controller together
    pub fn new(
        room_repository: Arc<dyn RoomRepository + Send + Sync>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let hub = Arc::new(BroadcastHub::new(
            Arc::clone(&registry),
            Arc::clone(&connection_manager),
        ));
        let lifecycle = Arc::new(RoomLifecycleController::new(
            Arc::clone(&room_repository),
            registry,
            hub,
        ));

        Self {
            room_service: Arc::new(RoomService::new(room_repository)),
            connection_manager,
            lifecycle,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
