use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument, warn};

use super::{broadcast::BroadcastHub, messages::ServerEvent, registry::ConnectionRegistry};
use crate::room::{models::RoomModel, repository::RoomRepository};
use crate::shared::AppError;

const UNKNOWN_AUTHOR: &str = "Unknown";
const ANONYMOUS_LEAVER: &str = "A user";

/// Coordinates join, chat and disconnect events
///
/// Every mutation of a room (membership change, member count write-back and
/// the resulting broadcasts) runs while holding that room's lock. Rooms never
/// share a lock, so traffic in one room does not wait on another; only a
/// connection moving between rooms holds both rooms' locks at once.
pub struct RoomLifecycleController {
    room_repository: Arc<dyn RoomRepository + Send + Sync>,
    registry: Arc<ConnectionRegistry>,
    hub: Arc<BroadcastHub>,
    // room id -> lock; entries live as long as the room does (forever)
    room_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RoomLifecycleController {
    pub fn new(
        room_repository: Arc<dyn RoomRepository + Send + Sync>,
        registry: Arc<ConnectionRegistry>,
        hub: Arc<BroadcastHub>,
    ) -> Self {
        Self {
            room_repository,
            registry,
            hub,
            room_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    async fn lock_room(&self, room_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.room_locks.lock().await;
            Arc::clone(locks.entry(room_id.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    /// Locks one or two rooms, always in id order so concurrent callers cannot deadlock
    async fn lock_rooms(&self, room_id: &str, other: Option<&str>) -> Vec<OwnedMutexGuard<()>> {
        let mut ids: Vec<&str> = std::iter::once(room_id).chain(other).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut guards = Vec::with_capacity(ids.len());
        for id in ids {
            guards.push(self.lock_room(id).await);
        }
        guards
    }

    /// Handles `join-room`. Missing or empty room id / username drops the event.
    #[instrument(skip(self))]
    pub async fn on_join(
        &self,
        connection_id: &str,
        room_id: Option<&str>,
        display_name: Option<&str>,
    ) -> Result<(), AppError> {
        let (Some(room_id), Some(display_name)) = (
            room_id.filter(|s| !s.is_empty()),
            display_name.filter(|s| !s.is_empty()),
        ) else {
            debug!(connection_id = %connection_id, "Ignoring join without room or username");
            return Ok(());
        };

        // A connection's own events arrive in order, so its binding cannot
        // move between this peek and the register below
        let previous_room = self
            .registry
            .binding_of(connection_id)
            .await
            .map(|binding| binding.room_id)
            .filter(|previous| previous.as_str() != room_id);

        let _guards = self.lock_rooms(room_id, previous_room.as_deref()).await;

        let mut room = match self.room_repository.get_room(room_id).await? {
            Some(room) => room,
            None => {
                info!(room_id = %room_id, "Materializing unknown room as private");
                let room = RoomModel::placeholder(room_id);
                self.room_repository.upsert_room(&room).await?;
                room
            }
        };

        self.registry
            .register(connection_id, room_id, display_name)
            .await;

        room.member_count = self.registry.count_in_room(room_id).await;
        self.room_repository.upsert_room(&room).await?;

        info!(
            room_id = %room_id,
            connection_id = %connection_id,
            member_count = room.member_count,
            "Connection joined room"
        );

        self.hub
            .emit(room_id, &ServerEvent::joined(display_name, room.member_count))
            .await;
        self.hub.emit(room_id, &ServerEvent::RoomMeta(room)).await;

        // No departure notice for the old room, only its new count
        if let Some(previous_room) = previous_room {
            if let Some(old) = self.refresh_member_count(&previous_room).await? {
                debug!(
                    room_id = %previous_room,
                    member_count = old.member_count,
                    "Connection moved out of room"
                );
                self.hub.emit(&previous_room, &ServerEvent::RoomMeta(old)).await;
            }
        }

        Ok(())
    }

    /// Handles `chat-message`. Dropped if the connection never joined a room.
    #[instrument(skip(self, text))]
    pub async fn on_message(&self, connection_id: &str, text: String) -> Result<(), AppError> {
        let Some(binding) = self.registry.binding_of(connection_id).await else {
            debug!(connection_id = %connection_id, "Ignoring message from connection outside any room");
            return Ok(());
        };

        let username = if binding.display_name.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            binding.display_name
        };

        let _guard = self.lock_room(&binding.room_id).await;
        self.hub
            .emit(&binding.room_id, &ServerEvent::chat(username, text))
            .await;

        Ok(())
    }

    /// Handles the transport closing. No-op for connections that never joined.
    #[instrument(skip(self))]
    pub async fn on_disconnect(&self, connection_id: &str) -> Result<(), AppError> {
        // A connection's own events arrive in order, so the binding cannot move
        // between this peek and the unregister below
        let Some(binding) = self.registry.binding_of(connection_id).await else {
            debug!(connection_id = %connection_id, "Disconnect from connection outside any room");
            return Ok(());
        };

        let _guard = self.lock_room(&binding.room_id).await;

        let Some(binding) = self.registry.unregister(connection_id).await else {
            return Ok(());
        };

        let Some(room) = self.refresh_member_count(&binding.room_id).await? else {
            warn!(room_id = %binding.room_id, "Room vanished before disconnect was processed");
            return Ok(());
        };

        info!(
            room_id = %room.id,
            connection_id = %connection_id,
            member_count = room.member_count,
            "Connection left room"
        );

        let leaver = if binding.display_name.is_empty() {
            ANONYMOUS_LEAVER
        } else {
            binding.display_name.as_str()
        };
        self.hub
            .emit(&room.id, &ServerEvent::left(leaver, room.member_count))
            .await;
        let room_id = room.id.clone();
        self.hub.emit(&room_id, &ServerEvent::RoomMeta(room)).await;

        Ok(())
    }

    /// Recomputes a room's member count from the registry; caller holds the room lock
    async fn refresh_member_count(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        let Some(mut room) = self.room_repository.get_room(room_id).await? else {
            return Ok(None);
        };

        room.member_count = self.registry.count_in_room(room_id).await;
        self.room_repository.upsert_room(&room).await?;

        Ok(Some(room))
    }
}
