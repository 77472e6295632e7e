//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::Value;

use interview_room::websockets::{MessageType, RoomJoinedPayload, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    connection_ids: Vec<String>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for specific participants, by display name
    pub fn for_participants(setup: &'a TestSetup, names: Vec<&str>) -> Self {
        let connection_ids = names.into_iter().map(|n| setup.connection_id(n)).collect();
        Self {
            setup,
            connection_ids,
        }
    }

    pub fn for_participant(setup: &'a TestSetup, name: &str) -> Self {
        Self::for_participants(setup, vec![name])
    }

    /// Assert that every participant received a message of this type next
    /// (consumes the message from their queue)
    pub async fn received_message_type(self, expected_type: MessageType) -> MessageContent {
        let mut messages = vec![];

        for connection_id in &self.connection_ids {
            let message = self
                .setup
                .mock_conn_manager
                .consume_message_for(connection_id)
                .await;
            assert!(
                message.is_some(),
                "{} should have received a message",
                connection_id
            );

            let msg: WebSocketMessage = serde_json::from_str(&message.unwrap()).unwrap();
            assert_eq!(
                msg.message_type, expected_type,
                "{} received wrong message type",
                connection_id
            );
            messages.push(msg);
        }

        // Broadcasts carry the same payload to every recipient
        for (i, msg) in messages.iter().enumerate().skip(1) {
            assert_eq!(
                msg.payload, messages[0].payload,
                "{} payload differs from {}",
                self.connection_ids[i], self.connection_ids[0]
            );
        }

        MessageContent {
            message: messages.remove(0),
        }
    }

    /// Assert that participants have nothing queued
    pub async fn received_no_messages(self) {
        for connection_id in &self.connection_ids {
            let messages = self
                .setup
                .mock_conn_manager
                .get_messages_for(connection_id)
                .await;
            assert!(
                messages.is_empty(),
                "{} should not have received any messages, got {:?}",
                connection_id,
                messages
            );
        }
    }

    /// Assert that participants received a sequence of message types in order
    pub async fn received_message_sequence(self, expected_types: Vec<MessageType>) {
        for expected_type in expected_types {
            MessageAssertion {
                setup: self.setup,
                connection_ids: self.connection_ids.clone(),
            }
            .received_message_type(expected_type)
            .await;
        }
    }
}

pub struct MessageContent {
    pub message: WebSocketMessage,
}

impl MessageContent {
    pub fn payload(&self) -> &Value {
        &self.message.payload
    }

    pub fn verify_payload(self, expected: &Value) -> Self {
        assert_eq!(&self.message.payload, expected, "Payload was not relayed verbatim");
        self
    }

    pub fn verify_sender(self, connection_id: &str) -> Self {
        assert_eq!(self.message.sender(), Some(connection_id), "Wrong sender");
        self
    }

    /// Connection ids of the peers listed in a room-joined payload
    pub fn peer_connection_ids(&self) -> Vec<String> {
        let payload: RoomJoinedPayload =
            serde_json::from_value(self.message.payload.clone()).unwrap();
        payload.peers.into_iter().map(|p| p.connection_id).collect()
    }

    pub fn verify_participant(self, connection_id: &str) -> Self {
        assert_eq!(
            self.message.payload["connection_id"].as_str(),
            Some(connection_id),
            "Wrong participant in presence message"
        );
        self
    }
}
