//! Change notifications.
//!
//! The engine does not poll and does not know about any UI. It emits a
//! [`GameEvent`] through an [`EventBus`] whenever a hand size, the turn,
//! the winner or the table changes; presentation layers subscribe.

mod bus;
mod event;

pub use bus::{EventBus, ListenerId};
pub use event::GameEvent;
