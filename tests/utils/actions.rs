#![allow(dead_code)] // Test utilities may not all be used in every test

use roomchat::{
    room::repository::RoomRepository,
    websockets::{ConnectionManager, MessageHandler},
    RoomModel,
};
use serde_json::json;

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Feed a raw client frame through the receive handler
    pub async fn send_raw(&self, connection_id: &str, frame: &str) {
        self.input_handler
            .handle_message(connection_id, frame.to_string())
            .await;
    }

    pub async fn send_json(&self, connection_id: &str, frame: serde_json::Value) {
        self.send_raw(connection_id, &frame.to_string()).await;
    }

    /// Simulate the transport closing the socket
    pub async fn disconnect(&self, connection_id: &str) {
        self.input_handler.handle_disconnect(connection_id).await;
        self.mock_conn_manager
            .remove_connection(connection_id)
            .await;
    }

    /// Clear all recorded messages
    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    pub async fn room(&self, room_id: &str) -> Option<RoomModel> {
        self.room_repository.get_room(room_id).await.unwrap()
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn send_join(&self, connection_id: &str, room_id: &str, username: &str) {
        self.send_json(
            connection_id,
            json!({"type": "join-room", "payload": {"roomId": room_id, "username": username}}),
        )
        .await;
    }

    pub async fn send_chat(&self, connection_id: &str, text: &str) {
        self.send_json(
            connection_id,
            json!({"type": "chat-message", "payload": {"text": text}}),
        )
        .await;
    }
}
