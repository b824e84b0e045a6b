use std::sync::Arc;

use roomchat::{
    room::repository::{InMemoryRoomRepository, RoomRepository},
    websockets::WebsocketReceiveHandler,
    AppState, RoomModel,
};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app_state: AppState,
    pub room_repository: Arc<InMemoryRoomRepository>,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub input_handler: WebsocketReceiveHandler,
    /// Connection ids that were connected at build time
    pub connections: Vec<String>,
}

pub struct TestSetupBuilder {
    connections: Vec<String>,
    rooms: Vec<RoomModel>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            connections: vec![],
            rooms: vec![],
        }
    }

    pub fn with_connections(mut self, connections: Vec<&str>) -> Self {
        self.connections = connections.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_connections(self) -> Self {
        self.with_connections(vec!["x", "y"])
    }

    pub fn with_room(mut self, room: RoomModel) -> Self {
        self.rooms.push(room);
        self
    }

    pub async fn build(self) -> TestSetup {
        let room_repository = Arc::new(InMemoryRoomRepository::new());
        let mock_conn_manager = Arc::new(MockConnectionManager::new());

        for room in &self.rooms {
            room_repository.create_room(room).await.unwrap();
        }

        for connection in &self.connections {
            mock_conn_manager.connect(connection).await;
        }

        let app_state = AppState::new(room_repository.clone(), mock_conn_manager.clone());
        let input_handler = WebsocketReceiveHandler::new(Arc::clone(&app_state.lifecycle));

        TestSetup {
            app_state,
            room_repository,
            mock_conn_manager,
            input_handler,
            connections: self.connections,
        }
    }
}
