// Event-driven architecture components
//
// Every room gets its own broadcast channel on the bus and one subscription
// task that fans events out to the sockets of that room.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::{CollabEvent, CollabKind, RoomEvent, SignalKind, SignalingMessage};
pub use room_handler::{RoomEventError, RoomEventHandler};
pub use room_subscription::RoomSubscription;

// Internal modules
mod bus;
mod events;
mod room_handler;
mod room_subscription;
