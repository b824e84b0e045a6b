use std::sync::Arc;
use tracing::{debug, warn};

use super::{
    connection_manager::ConnectionManager, messages::ServerEvent, registry::ConnectionRegistry,
};

/// Fans server events out to every connection currently in a room
pub struct BroadcastHub {
    registry: Arc<ConnectionRegistry>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl BroadcastHub {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            registry,
            connection_manager,
        }
    }

    /// Delivers `event` to the room's members as of this call
    ///
    /// Never fails: a member whose socket is gone just misses the event.
    pub async fn emit(&self, room_id: &str, event: &ServerEvent) {
        let message_json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                warn!(
                    room_id = %room_id,
                    kind = event.kind(),
                    error = %e,
                    "Failed to serialize event, dropping it"
                );
                return;
            }
        };

        let members = self.registry.members_of(room_id).await;
        debug!(
            room_id = %room_id,
            kind = event.kind(),
            receivers = members.len(),
            "Broadcasting room event"
        );

        self.connection_manager
            .send_to_connections(&members, &message_json)
            .await;
    }
}
