use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{RoomModel, RoomSummary},
    repository::RoomRepository,
    types::RoomCreateRequest,
};
use crate::shared::AppError;

/// Read-mostly room discovery on top of the room directory
pub struct RoomService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
}

impl RoomService {
    pub fn new(repository: Arc<dyn RoomRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Creates a new empty room with a generated ID
    #[instrument(skip(self))]
    pub async fn create_room(&self, request: RoomCreateRequest) -> Result<RoomModel, AppError> {
        let room = RoomModel::new(request.name_or_default(), request.is_public_or_default());
        debug!(room_id = %room.id, "Generated room ID");

        self.repository.create_room(&room).await?;

        info!(
            room_id = %room.id,
            name = %room.name,
            is_public = room.is_public,
            "Room created successfully"
        );

        Ok(room)
    }

    /// Lists public rooms, newest first
    #[instrument(skip(self))]
    pub async fn list_public_rooms(&self) -> Result<Vec<RoomSummary>, AppError> {
        let rooms = self.repository.list_public().await?;
        debug!(room_count = rooms.len(), "Public rooms retrieved");
        Ok(rooms)
    }

    /// Picks any public room at random
    #[instrument(skip(self))]
    pub async fn random_public_room(&self) -> Result<RoomModel, AppError> {
        self.repository
            .pick_random_public()
            .await?
            .ok_or_else(|| AppError::NotFound("No public rooms available".to_string()))
    }
}
