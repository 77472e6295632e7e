#![allow(dead_code)] // Test utilities may not all be used in every test

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use interview_room::websockets::{ConnectionManager, SocketError, SocketWrapper};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records every frame queued for a connection instead of writing to a socket.
/// Frames for connections that are not registered are dropped, as in production.
#[derive(Clone)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<String, Vec<String>>>>,
    connected: Arc<RwLock<HashSet<String>>>,
}

impl MockConnectionManager {
    pub fn new() -> Self {
        Self {
            sent_messages: Arc::new(RwLock::new(HashMap::new())),
            connected: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub async fn connect(&self, connection_id: &str) {
        self.connected.write().await.insert(connection_id.to_string());
    }

    pub async fn get_messages_for(&self, connection_id: &str) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(connection_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Pops the oldest recorded frame for a connection
    pub async fn consume_message_for(&self, connection_id: &str) -> Option<String> {
        let mut sent = self.sent_messages.write().await;
        let queue = sent.get_mut(connection_id)?;
        if queue.is_empty() {
            None
        } else {
            Some(queue.remove(0))
        }
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, connection_id: String, _sender: mpsc::UnboundedSender<String>) {
        self.connect(&connection_id).await;
    }

    async fn remove_connection(&self, connection_id: &str) {
        self.connected.write().await.remove(connection_id);
    }

    async fn send_to_connection(&self, connection_id: &str, message: &str) {
        if !self.connected.read().await.contains(connection_id) {
            return;
        }
        self.sent_messages
            .write()
            .await
            .entry(connection_id.to_string())
            .or_default()
            .push(message.to_string());
    }

    async fn send_to_connections(&self, connection_ids: &[String], message: &str) {
        for connection_id in connection_ids {
            self.send_to_connection(connection_id, message).await;
        }
    }

    async fn connection_count(&self) -> usize {
        self.connected.read().await.len()
    }
}

/// In-process stand-in for a client socket, driven through channels.
/// Dropping the inbound sender looks like the client hanging up.
pub struct ChannelSocket {
    inbound: mpsc::UnboundedReceiver<String>,
    outbound: mpsc::UnboundedSender<String>,
}

/// The test's end of a `ChannelSocket`
pub struct ClientEnd {
    pub to_server: mpsc::UnboundedSender<String>,
    pub from_server: mpsc::UnboundedReceiver<String>,
}

impl ChannelSocket {
    pub fn pair() -> (Self, ClientEnd) {
        let (to_server, inbound) = mpsc::unbounded_channel();
        let (outbound, from_server) = mpsc::unbounded_channel();
        (
            Self { inbound, outbound },
            ClientEnd {
                to_server,
                from_server,
            },
        )
    }
}

#[async_trait]
impl SocketWrapper for ChannelSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.outbound
            .send(message)
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        Ok(self.inbound.recv().await)
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        Ok(())
    }
}
