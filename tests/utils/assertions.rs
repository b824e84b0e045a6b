//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use roomchat::{
    websockets::{ChatMessagePayload, ServerEvent, SystemMessagePayload},
    RoomModel,
};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    connections: Vec<&'a str>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for every connection in the setup
    pub fn for_all_connections(setup: &'a TestSetup) -> Self {
        let connections = setup.connections.iter().map(|s| s.as_str()).collect();
        Self { setup, connections }
    }

    /// Create an assertion for specific connections
    pub fn for_connections(setup: &'a TestSetup, connections: Vec<&'a str>) -> Self {
        Self { setup, connections }
    }

    /// Consume the next frame of every connection and check they are all the same event
    pub async fn received_event(&self) -> ServerEvent {
        let mut events = vec![];

        for connection in &self.connections {
            let frame = self
                .setup
                .mock_conn_manager
                .consume_message_for(connection)
                .await
                .unwrap_or_else(|| panic!("{} should have received a message", connection));

            let event: ServerEvent = serde_json::from_str(&frame)
                .unwrap_or_else(|e| panic!("{} received unparseable frame: {}", connection, e));
            events.push(event);
        }

        for (i, event) in events.iter().enumerate().skip(1) {
            assert_eq!(
                event, &events[0],
                "{} received a different event than {}",
                self.connections[i], self.connections[0]
            );
        }

        events.swap_remove(0)
    }

    pub async fn received_system_message(&self) -> SystemMessagePayload {
        match self.received_event().await {
            ServerEvent::SystemMessage(payload) => payload,
            other => panic!("expected system-message, got {:?}", other),
        }
    }

    pub async fn received_room_meta(&self) -> RoomModel {
        match self.received_event().await {
            ServerEvent::RoomMeta(room) => room,
            other => panic!("expected room-meta, got {:?}", other),
        }
    }

    pub async fn received_chat_message(&self) -> ChatMessagePayload {
        match self.received_event().await {
            ServerEvent::ChatMessage(message) => message,
            other => panic!("expected chat-message, got {:?}", other),
        }
    }

    /// Assert that connections have nothing left in their queue
    pub async fn received_no_messages(&self) {
        for connection in &self.connections {
            let messages = self
                .setup
                .mock_conn_manager
                .get_messages_for(connection)
                .await;
            assert!(
                messages.is_empty(),
                "{} should not have received any messages, got {:?}",
                connection,
                messages
            );
        }
    }
}
