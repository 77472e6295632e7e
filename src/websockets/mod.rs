// Public API
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use handler::{serve_connection, websocket_handler, WebsocketReceiveHandler};
pub use messages::{
    MessageType, ParticipantPayload, RoomJoinedPayload, WebSocketMessage, WebSocketMessageMeta,
};
pub use socket::{ConnectionInfo, MessageHandler, SocketError, SocketWrapper};
pub use websocket_room_subscriber::WebSocketRoomSubscriber;

// Internal modules
mod connection_manager;
pub mod event_handlers;
mod handler;
mod messages;
mod socket;
mod websocket_room_subscriber;
