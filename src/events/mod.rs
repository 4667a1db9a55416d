//! Event definitions and the subscriber registry.

pub mod bus;
pub mod event;

pub use bus::{EventBus, SubscriberId, Subscription, PERSISTENT};
pub use event::{EventKind, GameEvent};
