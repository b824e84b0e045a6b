use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::shared::AppState;
use crate::websockets::{
    connection_manager::ConnectionManager,
    lifecycle::RoomLifecycleController,
    messages::ClientEvent,
    socket::{Connection, MessageHandler},
};

/// Message handler for receiving WebSocket messages from the client
///
/// Malformed frames and failed events are logged and dropped; the client never
/// hears about them.
pub struct WebsocketReceiveHandler {
    lifecycle: Arc<RoomLifecycleController>,
}

impl WebsocketReceiveHandler {
    pub fn new(lifecycle: Arc<RoomLifecycleController>) -> Self {
        Self { lifecycle }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, connection_id: &str, message: String) {
        debug!(
            connection_id = %connection_id,
            message = %message,
            "Received message"
        );

        let event = match serde_json::from_str::<ClientEvent>(&message) {
            Ok(event) => event,
            Err(e) => {
                warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to parse WebSocket message"
                );
                return;
            }
        };

        let result = match event {
            ClientEvent::JoinRoom(payload) => {
                self.lifecycle
                    .on_join(
                        connection_id,
                        payload.room_id.as_deref(),
                        payload.username.as_deref(),
                    )
                    .await
            }
            ClientEvent::ChatMessage(payload) => {
                self.lifecycle.on_message(connection_id, payload.text).await
            }
        };

        if let Err(e) = result {
            warn!(
                connection_id = %connection_id,
                error = %e,
                "Dropped client event"
            );
        }
    }

    async fn handle_disconnect(&self, connection_id: &str) {
        if let Err(e) = self.lifecycle.on_disconnect(connection_id).await {
            warn!(
                connection_id = %connection_id,
                error = %e,
                "Failed to process disconnect"
            );
        }
    }
}

/// WebSocket endpoint; the client picks its room later with a `join-room` event
/// GET /ws
pub async fn websocket_handler(ws: WebSocketUpgrade, State(app_state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: axum::extract::ws::WebSocket, app_state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    info!(connection_id = %connection_id, "WebSocket connection established");

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    app_state
        .connection_manager
        .add_connection(connection_id.clone(), outbound_sender)
        .await;

    let message_handler = Arc::new(WebsocketReceiveHandler::new(Arc::clone(
        &app_state.lifecycle,
    )));

    let connection = Connection::new(
        connection_id.clone(),
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect; it reports the departure itself
    match connection.run().await {
        Ok(()) => {
            info!(connection_id = %connection_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = ?e,
                "WebSocket connection error"
            );
        }
    }

    app_state
        .connection_manager
        .remove_connection(&connection_id)
        .await;
}
