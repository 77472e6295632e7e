use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// Maps connection ids to their outbound queues
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, connection_id: String, sender: mpsc::UnboundedSender<String>);

    async fn remove_connection(&self, connection_id: &str);

    /// Queue a message for one connection; unknown or closed connections are skipped
    async fn send_to_connection(&self, connection_id: &str, message: &str);

    async fn send_to_connections(&self, connection_ids: &[String], message: &str);

    async fn connection_count(&self) -> usize;
}

pub struct InMemoryConnectionManager {
    // connection_id -> sender
    connections: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<String>>>>,
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

fn queue(
    connections: &HashMap<String, mpsc::UnboundedSender<String>>,
    connection_id: &str,
    message: &str,
) {
    if let Some(sender) = connections.get(connection_id) {
        if sender.send(message.to_string()).is_err() {
            debug!(connection_id = %connection_id, "Outbound queue closed, message dropped");
        }
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, connection_id: String, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.write().await;
        connections.insert(connection_id, sender);
    }

    async fn remove_connection(&self, connection_id: &str) {
        let mut connections = self.connections.write().await;
        connections.remove(connection_id);
    }

    async fn send_to_connection(&self, connection_id: &str, message: &str) {
        let connections = self.connections.read().await;
        queue(&connections, connection_id, message);
    }

    async fn send_to_connections(&self, connection_ids: &[String], message: &str) {
        let connections = self.connections.read().await;
        for connection_id in connection_ids {
            queue(&connections, connection_id, message);
        }
    }

    async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}
