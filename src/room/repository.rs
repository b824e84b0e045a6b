use async_trait::async_trait;
use rand::seq::IndexedRandom;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::{RoomModel, RoomSummary};
use crate::shared::AppError;

/// Trait for room directory operations
#[async_trait]
pub trait RoomRepository {
    /// Stores a freshly created room; fails if the id is already taken
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError>;
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;

    /// Inserts or replaces the room stored under `room.id`
    async fn upsert_room(&self, room: &RoomModel) -> Result<(), AppError>;

    /// Public rooms, newest first
    async fn list_public(&self) -> Result<Vec<RoomSummary>, AppError>;

    /// Uniformly random public room, `None` when there are none
    async fn pick_random_public(&self) -> Result<Option<RoomModel>, AppError>;
}

/// In-memory implementation of RoomRepository
///
/// Rooms are never removed, so the map only grows for the lifetime of the process.
pub struct InMemoryRoomRepository {
    rooms: RwLock<HashMap<String, RoomModel>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self, room))]
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(room_id = %room.id, name = %room.name, "Creating room in memory");

        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&room.id) {
            warn!(room_id = %room.id, "Room already exists in memory");
            return Err(AppError::BadRequest("Room already exists".to_string()));
        }
        rooms.insert(room.id.clone(), room.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        let rooms = self.rooms.read().await;
        let room = rooms.get(room_id).cloned();

        if room.is_none() {
            debug!(room_id = %room_id, "Room not found in memory");
        }

        Ok(room)
    }

    #[instrument(skip(self, room))]
    async fn upsert_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(
            room_id = %room.id,
            member_count = room.member_count,
            "Upserting room in memory"
        );

        let mut rooms = self.rooms.write().await;
        rooms.insert(room.id.clone(), room.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_public(&self) -> Result<Vec<RoomSummary>, AppError> {
        let rooms = self.rooms.read().await;
        let mut public: Vec<&RoomModel> = rooms.values().filter(|r| r.is_public).collect();

        // Ties on the timestamp fall back to id so the order is stable across calls
        public.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        debug!(room_count = public.len(), "Listed public rooms");
        Ok(public.into_iter().map(RoomModel::summary).collect())
    }

    #[instrument(skip(self))]
    async fn pick_random_public(&self) -> Result<Option<RoomModel>, AppError> {
        let rooms = self.rooms.read().await;
        let public: Vec<&RoomModel> = rooms.values().filter(|r| r.is_public).collect();

        let picked = public.choose(&mut rand::rng()).map(|room| (*room).clone());

        match &picked {
            Some(room) => debug!(room_id = %room.id, "Picked random public room"),
            None => debug!("No public rooms to pick from"),
        }

        Ok(picked)
    }
}
