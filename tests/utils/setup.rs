#![allow(dead_code)] // Test utilities may not all be used in every test

use std::sync::Arc;

use interview_room::{
    room::repository::InMemoryRoomRepository,
    websockets::{ConnectionInfo, WebsocketReceiveHandler},
    AppState, RelayConfig,
};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const ROOM_ID: &str = "interview-123";

pub struct TestSetup {
    pub app_state: AppState,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub input_handler: WebsocketReceiveHandler,
    /// Connection identities by display name, all pointed at `ROOM_ID`
    pub connections: Vec<ConnectionInfo>,
}

impl TestSetup {
    pub fn connection(&self, name: &str) -> &ConnectionInfo {
        self.connections
            .iter()
            .find(|c| c.display_name == name)
            .unwrap_or_else(|| panic!("no connection named {}", name))
    }

    pub fn connection_id(&self, name: &str) -> String {
        self.connection(name).connection_id.clone()
    }
}

pub struct TestSetupBuilder {
    names: Vec<String>,
    room_channel_capacity: usize,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            names: vec![],
            room_channel_capacity: 100,
        }
    }

    pub fn with_participants(mut self, names: Vec<&str>) -> Self {
        self.names = names.into_iter().map(|s| s.to_string()).collect();
        self
    }

    /// An interviewer and a candidate
    pub fn with_pair(self) -> Self {
        self.with_participants(vec!["interviewer", "candidate"])
    }

    pub fn with_panel(self) -> Self {
        self.with_participants(vec!["interviewer", "candidate", "observer"])
    }

    pub async fn build(self) -> TestSetup {
        let mock_conn_manager = Arc::new(MockConnectionManager::new());
        let config = RelayConfig {
            room_channel_capacity: self.room_channel_capacity,
            ..RelayConfig::default()
        };
        let app_state = AppState::from_parts(
            config,
            Arc::new(InMemoryRoomRepository::new()),
            mock_conn_manager.clone(),
        );

        // Every participant has an open socket, but none has joined yet
        let mut connections = vec![];
        for name in &self.names {
            let connection = ConnectionInfo {
                connection_id: format!("conn-{}", name),
                room_id: ROOM_ID.to_string(),
                user_id: format!("user-{}", name),
                display_name: name.clone(),
            };
            mock_conn_manager.connect(&connection.connection_id).await;
            connections.push(connection);
        }

        let input_handler = WebsocketReceiveHandler::from_state(&app_state);

        TestSetup {
            app_state,
            mock_conn_manager,
            input_handler,
            connections,
        }
    }
}
