//! Integration tests for `GachaRoller`.
//!
//! All tests run on tokio's paused clock, so the 3 s roll completes
//! instantly while timers still fire in order.

use std::time::Duration;

use assert_matches::assert_matches;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use yurucamp_core::gacha::{GachaPhase, ROLL_DURATION, TICK_INTERVAL};
use yurucamp_picker::{GachaEvent, GachaRoller};

const CAMPERS: [&str; 5] = ["Rin", "Nadeshiko", "Chiaki", "Aoi", "Ena"];

fn roller() -> GachaRoller<&'static str> {
    GachaRoller::with_seed(CAMPERS.to_vec(), 42)
}

// ---------------------------------------------------------------------------
// Test: start with no candidates stays idle
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn empty_candidates_stay_idle() {
    let mut roller: GachaRoller<&str> = GachaRoller::new(Vec::new());
    let mut rx = roller.subscribe();

    assert!(!roller.start());

    let snapshot = roller.snapshot();
    assert_eq!(snapshot.phase, GachaPhase::Idle);
    assert!(snapshot.displayed.is_none());
    assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
}

// ---------------------------------------------------------------------------
// Test: ticks update the displayed candidate while rolling
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn ticks_show_candidates_while_rolling() {
    let mut roller = roller();
    assert!(roller.start());

    tokio::time::sleep(TICK_INTERVAL * 3).await;

    let snapshot = roller.snapshot();
    assert_eq!(snapshot.phase, GachaPhase::Rolling);
    assert!(CAMPERS.contains(&snapshot.displayed.unwrap()));
    assert!(snapshot.winner.is_none());
    assert!(!snapshot.can_dismiss);
}

// ---------------------------------------------------------------------------
// Test: the roll settles after the fixed duration
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn roll_settles_after_duration() {
    let mut roller = roller();
    let mut rx = roller.subscribe();
    roller.start();
    assert_eq!(rx.recv().await.unwrap(), GachaEvent::Started);

    tokio::time::sleep(ROLL_DURATION - Duration::from_millis(100)).await;
    assert_eq!(roller.snapshot().phase, GachaPhase::Rolling);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let snapshot = roller.snapshot();
    assert_eq!(snapshot.phase, GachaPhase::Settled);
    let winner = snapshot.winner.unwrap();
    assert!(CAMPERS.contains(&winner));
    assert_eq!(snapshot.displayed, Some(winner));
    assert!(snapshot.can_dismiss);

    assert_eq!(rx.recv().await.unwrap(), GachaEvent::Settled { winner });
}

// ---------------------------------------------------------------------------
// Test: the roll duration is measured from start, not from the first poll
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn roll_duration_counts_from_start() {
    let mut roller = roller();
    roller.start();

    // The clock moves before the roll task is first polled.
    tokio::time::advance(Duration::from_millis(1000)).await;
    tokio::time::sleep(ROLL_DURATION - Duration::from_millis(1000) + TICK_INTERVAL).await;

    assert_eq!(roller.snapshot().phase, GachaPhase::Settled);
}

// ---------------------------------------------------------------------------
// Test: completion is signalled exactly once
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn settled_event_is_sent_once() {
    let mut roller = roller();
    let mut rx = roller.subscribe();
    roller.start();

    tokio::time::sleep(ROLL_DURATION * 3).await;

    assert_matches!(rx.try_recv(), Ok(GachaEvent::Started));
    assert_matches!(rx.try_recv(), Ok(GachaEvent::Settled { .. }));
    assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
}

// ---------------------------------------------------------------------------
// Test: closing mid-roll leaves nothing behind
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn close_mid_roll_cancels_timers() {
    let mut roller = roller();
    let mut rx = roller.subscribe();
    roller.start();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    roller.close();

    let after_close = roller.snapshot();
    assert_eq!(after_close.phase, GachaPhase::Idle);
    assert!(after_close.displayed.is_none());
    assert!(after_close.winner.is_none());

    tokio::time::sleep(ROLL_DURATION * 2).await;

    assert_eq!(roller.snapshot(), after_close);
    assert_matches!(rx.try_recv(), Ok(GachaEvent::Started));
    assert_matches!(rx.try_recv(), Ok(GachaEvent::Reset));
    assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
}

// ---------------------------------------------------------------------------
// Test: click-outside dismiss is refused while rolling
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn dismiss_is_refused_while_rolling() {
    let mut roller = roller();
    roller.start();

    assert!(!roller.request_dismiss());
    assert_eq!(roller.snapshot().phase, GachaPhase::Rolling);

    tokio::time::sleep(ROLL_DURATION + TICK_INTERVAL).await;
    assert_eq!(roller.snapshot().phase, GachaPhase::Settled);

    assert!(roller.request_dismiss());
    let snapshot = roller.snapshot();
    assert_eq!(snapshot.phase, GachaPhase::Idle);
    assert!(snapshot.winner.is_none());
}

// ---------------------------------------------------------------------------
// Test: rolling again clears the previous winner
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn roll_again_from_settled() {
    let mut roller = roller();
    roller.start();
    tokio::time::sleep(ROLL_DURATION + TICK_INTERVAL).await;
    assert!(roller.snapshot().winner.is_some());

    assert!(roller.start());
    let snapshot = roller.snapshot();
    assert_eq!(snapshot.phase, GachaPhase::Rolling);
    assert!(snapshot.winner.is_none());

    tokio::time::sleep(ROLL_DURATION + TICK_INTERVAL).await;
    assert_eq!(roller.snapshot().phase, GachaPhase::Settled);
}

// ---------------------------------------------------------------------------
// Test: start while rolling does not restart the clock
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn second_start_while_rolling_is_ignored() {
    let mut roller = roller();
    roller.start();
    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert!(!roller.start());

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(roller.snapshot().phase, GachaPhase::Settled);
}

// ---------------------------------------------------------------------------
// Test: dropping the roller stops its task
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn drop_mid_roll_stops_the_task() {
    let mut roller = roller();
    let mut rx = roller.subscribe();
    roller.start();
    drop(roller);

    assert_eq!(rx.recv().await.unwrap(), GachaEvent::Started);
    assert_matches!(rx.recv().await, Err(RecvError::Closed));
}
