//! Domain events and the session's event bus.

pub mod bus;
pub mod event;

pub use bus::{EventBus, SubscriptionId};
pub use event::{EventKind, GameEvent};
