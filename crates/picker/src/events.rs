use serde::Serialize;
use yurucamp_core::gacha::GachaPhase;

/// Notifications published by a [`GachaRoller`](crate::GachaRoller).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GachaEvent<T> {
    /// A roll began.
    Started,
    /// The roll finished. Sent exactly once per completed roll; the UI
    /// uses it to fire the celebration effect.
    Settled { winner: T },
    /// The session was torn down and is idle again.
    Reset,
}

/// Point-in-time copy of the picker state for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GachaSnapshot<T> {
    pub phase: GachaPhase,
    pub displayed: Option<T>,
    pub winner: Option<T>,
    pub can_dismiss: bool,
}
