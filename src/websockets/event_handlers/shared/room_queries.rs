use crate::{
    event::RoomEventError,
    room::{models::RoomModel, repository::RoomRepository},
};
use std::sync::Arc;

pub struct RoomQueryUtils;

impl RoomQueryUtils {
    pub async fn get_room_if_exists(
        room_repository: &Arc<dyn RoomRepository + Send + Sync>,
        room_id: &str,
    ) -> Result<Option<RoomModel>, RoomEventError> {
        room_repository
            .get_room(room_id)
            .await
            .map_err(|e| RoomEventError::HandlerError(format!("Failed to get room: {}", e)))
    }

    /// Connection ids of everyone currently in the room except `exclude`
    ///
    /// An unknown room has no recipients.
    pub async fn recipients_excluding(
        room_repository: &Arc<dyn RoomRepository + Send + Sync>,
        room_id: &str,
        exclude: &str,
    ) -> Result<Vec<String>, RoomEventError> {
        Ok(Self::get_room_if_exists(room_repository, room_id)
            .await?
            .map(|room| {
                room.peers_of(exclude)
                    .into_iter()
                    .map(|p| p.connection_id.clone())
                    .collect()
            })
            .unwrap_or_default())
    }
}
