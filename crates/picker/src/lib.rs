//! Timer-driven participant picker for event pages.
//!
//! [`GachaRoller`] runs the [`GachaSession`](yurucamp_core::gacha::GachaSession)
//! state machine on tokio timers: a repeating tick while rolling and a
//! one-shot deadline that commits the winner. Both live in one task that is
//! cancelled whenever the hosting dialog closes.

pub mod events;
pub mod roller;

pub use events::{GachaEvent, GachaSnapshot};
pub use roller::GachaRoller;
