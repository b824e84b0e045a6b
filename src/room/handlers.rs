use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, info, instrument};

use super::{
    models::{RoomModel, RoomSummary},
    types::RoomCreateRequest,
};
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new room
///
/// POST /api/rooms
/// Returns the full room, including its generated ID. A request without a
/// JSON body creates an untitled public room.
#[instrument(name = "create_room", skip(state, body))]
pub async fn create_room(
    State(state): State<AppState>,
    body: Result<Json<RoomCreateRequest>, JsonRejection>,
) -> Result<Json<RoomModel>, AppError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => {
            debug!("No JSON body, creating room with defaults");
            RoomCreateRequest::default()
        }
        Err(rejection) => return Err(AppError::BadRequest(rejection.body_text())),
    };

    let room = state.room_service.create_room(request).await?;
    Ok(Json(room))
}

/// HTTP handler for listing public rooms
///
/// GET /api/rooms/public
#[instrument(name = "list_public_rooms", skip(state))]
pub async fn list_public_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomSummary>>, AppError> {
    let rooms = state.room_service.list_public_rooms().await?;

    info!(room_count = rooms.len(), "Public rooms listed successfully");

    Ok(Json(rooms))
}

/// GET /api/rooms/random
#[instrument(name = "random_public_room", skip(state))]
pub async fn random_public_room(
    State(state): State<AppState>,
) -> Result<Json<RoomModel>, AppError> {
    let room = state.room_service.random_public_room().await?;
    Ok(Json(room))
}
