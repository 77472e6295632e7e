use async_trait::async_trait;
use thiserror::Error;

use super::events::RoomEvent;

/// Failure while turning a room event into outbound frames
#[derive(Debug, Error)]
pub enum RoomEventError {
    #[error("Handler error: {0}")]
    HandlerError(String),
}

/// Consumer of one room's event stream
///
/// A room's broadcaster feeds every event to a single handler, in emit order.
/// Recipients are the handler's business: it decides who, among the room's
/// current participants, gets a frame.
#[async_trait]
pub trait RoomEventHandler: Send + Sync {
    /// Errors are logged by the subscription and never stop it.
    async fn handle_room_event(
        &self,
        room_id: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError>;

    /// Name used in broadcaster log lines
    fn handler_name(&self) -> &'static str;
}
