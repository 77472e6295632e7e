use crate::{
    event::RoomEventError,
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};
use std::sync::Arc;

pub struct MessageBroadcaster;

impl MessageBroadcaster {
    pub async fn broadcast_to_connections(
        connection_manager: &Arc<dyn ConnectionManager>,
        connection_ids: &[String],
        message: &WebSocketMessage,
    ) -> Result<(), RoomEventError> {
        let message_json = Self::serialize(message)?;
        connection_manager
            .send_to_connections(connection_ids, &message_json)
            .await;
        Ok(())
    }

    fn serialize(message: &WebSocketMessage) -> Result<String, RoomEventError> {
        serde_json::to_string(message).map_err(|e| {
            RoomEventError::HandlerError(format!("Failed to serialize message: {}", e))
        })
    }
}
