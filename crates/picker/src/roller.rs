//! Tokio driver for the gacha state machine.
//!
//! Every roll gets a generation number. The roll task re-checks it under the
//! session lock before each mutation, and [`GachaRoller::close`] bumps it
//! under the same lock, so a timer that fires after a close can never touch
//! the reset session even if cancellation has not been observed yet.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use yurucamp_core::gacha::{GachaSession, ROLL_DURATION, TICK_INTERVAL};

use crate::events::{GachaEvent, GachaSnapshot};

/// Capacity of the event channel; slow subscribers lag rather than block.
const EVENT_CHANNEL_CAPACITY: usize = 16;

struct Shared<T> {
    session: GachaSession<T>,
    generation: u64,
    rng: StdRng,
}

type SharedState<T> = Arc<Mutex<Shared<T>>>;

fn lock<T>(shared: &Mutex<Shared<T>>) -> MutexGuard<'_, Shared<T>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One picker dialog's worth of gacha state plus its timers.
///
/// Dropping the roller cancels any roll in progress.
pub struct GachaRoller<T> {
    shared: SharedState<T>,
    events: broadcast::Sender<GachaEvent<T>>,
    cancel: Option<CancellationToken>,
    task: Option<JoinHandle<()>>,
    tick_interval: Duration,
    roll_duration: Duration,
}

impl<T: Clone + Send + 'static> GachaRoller<T> {
    /// Roller with the standard 50 ms tick and 3 s roll.
    pub fn new(candidates: Vec<T>) -> Self {
        Self::with_timing(candidates, TICK_INTERVAL, ROLL_DURATION)
    }

    pub fn with_timing(candidates: Vec<T>, tick_interval: Duration, roll_duration: Duration) -> Self {
        Self::build(candidates, tick_interval, roll_duration, StdRng::from_os_rng())
    }

    /// Deterministic draws, for reproducible demos and tests.
    pub fn with_seed(candidates: Vec<T>, seed: u64) -> Self {
        Self::build(
            candidates,
            TICK_INTERVAL,
            ROLL_DURATION,
            StdRng::seed_from_u64(seed),
        )
    }

    fn build(candidates: Vec<T>, tick_interval: Duration, roll_duration: Duration, rng: StdRng) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            shared: Arc::new(Mutex::new(Shared {
                session: GachaSession::new(candidates),
                generation: 0,
                rng,
            })),
            events,
            cancel: None,
            task: None,
            tick_interval,
            roll_duration,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GachaEvent<T>> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> GachaSnapshot<T> {
        let shared = lock(&self.shared);
        let session = &shared.session;
        GachaSnapshot {
            phase: session.phase(),
            displayed: session.displayed().cloned(),
            winner: session.winner().cloned(),
            can_dismiss: session.can_dismiss(),
        }
    }

    /// Begin a roll. Must be called inside a tokio runtime.
    ///
    /// No-op (returns `false`) with no candidates or while already rolling.
    pub fn start(&mut self) -> bool {
        let deadline = Instant::now() + self.roll_duration;
        let generation = {
            let mut shared = lock(&self.shared);
            if !shared.session.start() {
                return false;
            }
            shared.generation += 1;
            shared.generation
        };

        // The previous roll's task has finished on its own by now; drop it.
        self.stop_timers();

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_roll(
            Arc::clone(&self.shared),
            self.events.clone(),
            generation,
            cancel.clone(),
            self.tick_interval,
            deadline,
        ));
        self.cancel = Some(cancel);
        self.task = Some(task);

        tracing::info!(generation, "Gacha roll started");
        let _ = self.events.send(GachaEvent::Started);
        true
    }

    /// Dismiss from a click outside the dialog.
    ///
    /// Refused while rolling. Returns whether the dialog may close; when it
    /// may, the session has been reset.
    pub fn request_dismiss(&mut self) -> bool {
        if !lock(&self.shared).session.can_dismiss() {
            tracing::debug!("Gacha dismiss refused while rolling");
            return false;
        }
        self.close();
        true
    }

    /// Explicit close or teardown: cancel both timers and return to idle.
    pub fn close(&mut self) {
        self.stop_timers();
        {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.session.reset();
        }
        tracing::debug!("Gacha session reset");
        let _ = self.events.send(GachaEvent::Reset);
    }
}

impl<T> GachaRoller<T> {
    fn stop_timers(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<T> Drop for GachaRoller<T> {
    fn drop(&mut self) {
        self.stop_timers();
    }
}

/// Tick until `deadline`, fixed when the roll started, then settle. Exits
/// early on cancellation or when the roll it was started for is no longer
/// current.
async fn run_roll<T: Clone + Send + 'static>(
    shared: SharedState<T>,
    events: broadcast::Sender<GachaEvent<T>>,
    generation: u64,
    cancel: CancellationToken,
    tick_interval: Duration,
    deadline: Instant,
) {
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let deadline = tokio::time::sleep_until(deadline);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(generation, "Gacha roll cancelled");
                return;
            }
            _ = &mut deadline => {
                let winner = {
                    let mut guard = lock(&shared);
                    if guard.generation != generation {
                        return;
                    }
                    let Shared { session, rng, .. } = &mut *guard;
                    session.settle(rng).cloned()
                };
                if let Some(winner) = winner {
                    tracing::info!(generation, "Gacha roll settled");
                    let _ = events.send(GachaEvent::Settled { winner });
                }
                return;
            }
            _ = ticker.tick() => {
                let mut guard = lock(&shared);
                if guard.generation != generation {
                    return;
                }
                let Shared { session, rng, .. } = &mut *guard;
                session.tick(rng);
            }
        }
    }
}
