use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Which room a connection joined, and under which display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub room_id: String,
    pub display_name: String,
}

/// Tracks room membership of live connections
///
/// A connection is bound to at most one room. Binding it again replaces the
/// previous binding.
#[derive(Default)]
pub struct ConnectionRegistry {
    // connection id -> binding
    bindings: RwLock<HashMap<String, Binding>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the connection to a room, returning the binding it replaced
    pub async fn register(
        &self,
        connection_id: &str,
        room_id: &str,
        display_name: &str,
    ) -> Option<Binding> {
        let mut bindings = self.bindings.write().await;
        let previous = bindings.insert(
            connection_id.to_string(),
            Binding {
                room_id: room_id.to_string(),
                display_name: display_name.to_string(),
            },
        );

        debug!(
            connection_id = %connection_id,
            room_id = %room_id,
            replaced = previous.is_some(),
            "Connection registered"
        );

        previous
    }

    /// Removes the binding; `None` if the connection never joined a room
    pub async fn unregister(&self, connection_id: &str) -> Option<Binding> {
        self.bindings.write().await.remove(connection_id)
    }

    pub async fn binding_of(&self, connection_id: &str) -> Option<Binding> {
        self.bindings.read().await.get(connection_id).cloned()
    }

    pub async fn count_in_room(&self, room_id: &str) -> usize {
        self.bindings
            .read()
            .await
            .values()
            .filter(|b| b.room_id == room_id)
            .count()
    }

    pub async fn members_of(&self, room_id: &str) -> Vec<String> {
        self.bindings
            .read()
            .await
            .iter()
            .filter(|(_, b)| b.room_id == room_id)
            .map(|(connection_id, _)| connection_id.clone())
            .collect()
    }
}
