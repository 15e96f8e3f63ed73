//! Randomized participant picker ("gacha").
//!
//! [`GachaSession`] is the synchronous state machine; it knows nothing about
//! time. A driver calls [`GachaSession::tick`] every [`TICK_INTERVAL`] while
//! rolling and [`GachaSession::settle`] once [`ROLL_DURATION`] has elapsed
//! since [`GachaSession::start`].
//!
//! ```text
//!   Idle ──start──▶ Rolling ──settle──▶ Settled
//!    ▲                 │ tick              │
//!    └──── reset ──────┴──── reset ────────┤
//!                      ▲                   │
//!                      └────── start ──────┘
//! ```

use std::time::Duration;

use rand::Rng;
use serde::Serialize;

/// Interval between cosmetic draws while rolling.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Time from roll start until the winner is committed.
pub const ROLL_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GachaPhase {
    Idle,
    Rolling,
    Settled,
}

/// Picker state for one open dialog.
///
/// `displayed` and `winner` are indices into `candidates`, so the candidate
/// type needs no `Clone`.
#[derive(Debug, Clone)]
pub struct GachaSession<T> {
    candidates: Vec<T>,
    is_rolling: bool,
    displayed: Option<usize>,
    winner: Option<usize>,
}

impl<T> GachaSession<T> {
    pub fn new(candidates: Vec<T>) -> Self {
        Self {
            candidates,
            is_rolling: false,
            displayed: None,
            winner: None,
        }
    }

    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    pub fn is_rolling(&self) -> bool {
        self.is_rolling
    }

    /// Candidate currently shown in the picker window.
    pub fn displayed(&self) -> Option<&T> {
        self.displayed.map(|i| &self.candidates[i])
    }

    /// Committed result of the last completed roll.
    pub fn winner(&self) -> Option<&T> {
        self.winner.map(|i| &self.candidates[i])
    }

    pub fn phase(&self) -> GachaPhase {
        if self.is_rolling {
            GachaPhase::Rolling
        } else if self.winner.is_some() {
            GachaPhase::Settled
        } else {
            GachaPhase::Idle
        }
    }

    /// Whether the hosting dialog may be closed by clicking outside it.
    ///
    /// Refused while rolling; an explicit close always goes through
    /// [`GachaSession::reset`].
    pub fn can_dismiss(&self) -> bool {
        !self.is_rolling
    }

    /// Begin a roll.
    ///
    /// Returns `false` without touching any state when there are no
    /// candidates or a roll is already in progress. Starting from
    /// [`GachaPhase::Settled`] clears the previous winner first.
    pub fn start(&mut self) -> bool {
        if self.candidates.is_empty() {
            tracing::debug!("Gacha start ignored: no candidates");
            return false;
        }
        if self.is_rolling {
            return false;
        }
        self.winner = None;
        self.is_rolling = true;
        tracing::debug!(candidates = self.candidates.len(), "Gacha roll started");
        true
    }

    /// Show a random candidate. Draws with replacement; no-op unless rolling.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&T> {
        if !self.is_rolling {
            return None;
        }
        let index = rng.random_range(0..self.candidates.len());
        self.displayed = Some(index);
        self.displayed()
    }

    /// Finish the roll with a fresh independent draw.
    ///
    /// The winner is not derived from whatever `tick` displayed last. Returns
    /// the winner, or `None` when no roll was in progress.
    pub fn settle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&T> {
        if !self.is_rolling {
            return None;
        }
        let index = rng.random_range(0..self.candidates.len());
        self.is_rolling = false;
        self.displayed = Some(index);
        self.winner = Some(index);
        tracing::debug!(winner_index = index, "Gacha roll settled");
        self.winner()
    }

    /// Return to [`GachaPhase::Idle`], keeping the candidate list.
    pub fn reset(&mut self) {
        self.is_rolling = false;
        self.displayed = None;
        self.winner = None;
    }

    /// Replace the candidates and reset.
    pub fn replace_candidates(&mut self, candidates: Vec<T>) {
        self.candidates = candidates;
        self.reset();
    }
}

impl<T> Default for GachaSession<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
