use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::events::RoomEvent;

const DEFAULT_ROOM_CAPACITY: usize = 100;

/// Event bus for distributing events throughout the application
#[derive(Debug, Clone)]
pub struct EventBus {
    /// Room-specific event channels: room_id -> sender
    room_channels: Arc<RwLock<HashMap<String, broadcast::Sender<RoomEvent>>>>,
    room_capacity: usize,
}

impl EventBus {
    /// Creates a new event bus whose room channels buffer `room_capacity` events
    pub fn new(room_capacity: usize) -> Self {
        Self {
            room_channels: Arc::new(RwLock::new(HashMap::new())),
            room_capacity: room_capacity.max(1),
        }
    }

    /// Emits an event to all subscribers of a specific room
    ///
    /// Events for rooms without a channel are dropped. Returns the number of
    /// subscribers the event was handed to.
    pub async fn emit_to_room(&self, room_id: &str, event: RoomEvent) -> usize {
        let room_channels = self.room_channels.read().await;

        let Some(sender) = room_channels.get(room_id) else {
            debug!(
                room_id = %room_id,
                event_type = event.event_type(),
                "No room channel found - dropping event"
            );
            return 0;
        };

        match sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    room_id = %room_id,
                    receivers = receiver_count,
                    "Room event emitted"
                );
                receiver_count
            }
            Err(_) => {
                debug!(room_id = %room_id, "Room event emitted with no receivers");
                0
            }
        }
    }

    /// Subscribe to events for a specific room, creating its channel if needed
    pub async fn subscribe_to_room(&self, room_id: &str) -> broadcast::Receiver<RoomEvent> {
        {
            let room_channels = self.room_channels.read().await;
            if let Some(sender) = room_channels.get(room_id) {
                return sender.subscribe();
            }
        }

        debug!(room_id = %room_id, "Creating new room channel for subscription");
        let mut room_channels = self.room_channels.write().await;
        room_channels
            .entry(room_id.to_string())
            .or_insert_with(|| broadcast::channel(self.room_capacity).0)
            .subscribe()
    }

    /// Drops a room's channel; its subscribers see the channel close
    pub async fn remove_room(&self, room_id: &str) -> bool {
        let removed = self.room_channels.write().await.remove(room_id).is_some();
        debug!(room_id = %room_id, removed, "Room channel removed");
        removed
    }

    /// Whether a channel currently exists for the room
    pub async fn has_room(&self, room_id: &str) -> bool {
        self.room_channels.read().await.contains_key(room_id)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_ROOM_CAPACITY)
    }
}
