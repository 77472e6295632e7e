pub mod collab_events;
pub mod presence_events;
pub mod shared;
pub mod signaling_events;

pub use collab_events::CollabEventHandlers;
pub use presence_events::PresenceEventHandlers;
pub use signaling_events::SignalingEventHandlers;
