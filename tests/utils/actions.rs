#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::Value;
use tokio::time::{sleep, Duration};

use interview_room::websockets::{ConnectionManager, MessageHandler, MessageType, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a raw frame as the named participant and wait for processing
    pub async fn send_raw(&self, name: &str, frame: &str) {
        self.input_handler
            .handle_message(self.connection(name), frame.to_string())
            .await;
        sleep(Duration::from_millis(10)).await;
    }

    /// Send a WebSocket message and wait for processing
    pub async fn send_message(&self, name: &str, message_type: MessageType, payload: Value) {
        let message = WebSocketMessage::new(message_type, payload);
        let message_json = serde_json::to_string(&message).unwrap();
        self.send_raw(name, &message_json).await;
    }

    /// Clear all recorded messages
    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn join(&self, name: &str) {
        self.send_message(name, MessageType::JoinRoom, Value::Null)
            .await;
    }

    /// Join everyone in setup order, then forget the join chatter
    pub async fn join_all(&self) {
        let names: Vec<String> = self
            .connections
            .iter()
            .map(|c| c.display_name.clone())
            .collect();
        for name in &names {
            self.join(name).await;
        }
        self.clear_messages().await;
    }

    pub async fn leave(&self, name: &str) {
        self.send_message(name, MessageType::LeaveRoom, Value::Null)
            .await;
    }

    /// Socket drop: unregister the connection and run the same cleanup as the server
    pub async fn disconnect(&self, name: &str) {
        let connection = self.connection(name);
        self.mock_conn_manager
            .remove_connection(&connection.connection_id)
            .await;
        self.input_handler.leave(connection).await.unwrap();
        sleep(Duration::from_millis(10)).await;
    }
}
