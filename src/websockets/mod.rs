// Public API
pub use broadcast::BroadcastHub;
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use handler::{websocket_handler, WebsocketReceiveHandler};
pub use lifecycle::RoomLifecycleController;
pub use messages::{
    ChatMessagePayload, ChatPayload, ClientEvent, JoinRoomPayload, ServerEvent,
    SystemMessagePayload,
};
pub use registry::{Binding, ConnectionRegistry};
pub use socket::{Connection, MessageHandler, SocketError, SocketWrapper};

// Internal modules
mod broadcast;
mod connection_manager;
mod handler;
mod lifecycle;
mod messages;
mod registry;
mod socket;
