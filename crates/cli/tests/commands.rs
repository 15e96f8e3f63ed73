//! Integration tests for the `yurucamp` commands over an in-memory backend.

use std::sync::Arc;

use assert_matches::assert_matches;
use yurucamp_cli::cli::{ListArgs, ListKind};
use yurucamp_cli::commands;
use yurucamp_client::{ClientError, StaticDataProvider};
use yurucamp_core::models::{Activity, Event, Participant, Region};
use yurucamp_picker::GachaRoller;

fn activity(i: usize, region: &str) -> Activity {
    Activity {
        id: format!("a{i}"),
        title: format!("Trip {i:02}"),
        description: None,
        location: Some(if i % 3 == 0 { "Lake Motosu" } else { "Mt. Minobu" }.to_string()),
        region_id: Some(region.to_string()),
        category_id: None,
        image_url: None,
        user: None,
        region: None,
        created_at: None,
    }
}

fn participant(name: &str) -> Participant {
    Participant {
        id: format!("p-{name}"),
        user_id: format!("u-{name}"),
        display_name: name.to_string(),
        avatar_url: None,
    }
}

fn event(id: &str, participants: Vec<Participant>) -> Event {
    Event {
        id: id.to_string(),
        title: "Winter meetup".to_string(),
        description: None,
        location: None,
        region_id: None,
        category_id: None,
        start_at: None,
        end_at: None,
        capacity: Some(10),
        image_url: None,
        user: None,
        region: None,
        participants,
    }
}

fn backend() -> Arc<StaticDataProvider> {
    let mut activities: Vec<Activity> = (0..12).map(|i| activity(i, "yamanashi")).collect();
    activities.extend((12..15).map(|i| activity(i, "shizuoka")));

    Arc::new(
        StaticDataProvider::new()
            .with_activities(activities)
            .with_events(vec![
                event("e1", vec![participant("Rin"), participant("Nadeshiko")]),
                event("e2", Vec::new()),
            ])
            .with_regions(vec![Region {
                id: "yamanashi".into(),
                name: "Yamanashi".into(),
            }]),
    )
}

fn args(kind: ListKind) -> ListArgs {
    ListArgs {
        kind,
        query: None,
        region: None,
        category: None,
        page: 1,
        page_size: 8,
    }
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_renders_requested_page() {
    let mut a = args(ListKind::Activities);
    a.page = 2;
    let text = commands::list(backend(), &a).await.unwrap();

    assert!(text.starts_with("Activities: 15 found\n"));
    assert!(text.contains("   9. Trip 08"));
    assert!(!text.contains("Trip 07"));
    assert!(text.contains("Page 1 [2]"));
}

#[tokio::test]
async fn list_applies_region_then_search() {
    let mut a = args(ListKind::Activities);
    a.region = Some("yamanashi".into());
    a.query = Some("motosu".into());
    let text = commands::list(backend(), &a).await.unwrap();

    // Trips 0, 3, 6, 9 are at Lake Motosu in Yamanashi; 12 is in Shizuoka.
    assert!(text.starts_with("Activities: 4 found\n"));
    assert!(text.contains("Filters: \"motosu\", Yamanashi"));
    assert!(!text.contains("Trip 12"));
}

#[tokio::test]
async fn list_out_of_range_page_falls_back_to_first() {
    let mut a = args(ListKind::Activities);
    a.page = 99;
    let text = commands::list(backend(), &a).await.unwrap();
    assert!(text.contains("   1. Trip 00"));
}

#[tokio::test]
async fn list_rejects_zero_page_size() {
    let mut a = args(ListKind::Camps);
    a.page_size = 0;
    let err = commands::list(backend(), &a).await.unwrap_err();
    assert_matches!(err, ClientError::Core(_));
}

// ---------------------------------------------------------------------------
// gacha
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn gacha_picks_a_participant() {
    let data = backend();
    let mut shown = Vec::new();
    let winner = commands::gacha(data.as_ref(), "e1", |p| shown.push(p.display_name.clone()))
        .await
        .unwrap()
        .unwrap();

    assert!(["Rin", "Nadeshiko"].contains(&winner.display_name.as_str()));
    assert!(!shown.is_empty());
}

#[tokio::test(start_paused = true)]
async fn gacha_without_participants_yields_none() {
    let data = backend();
    let winner = commands::gacha(data.as_ref(), "e2", |_| {}).await.unwrap();
    assert!(winner.is_none());
}

#[tokio::test]
async fn gacha_unknown_event_is_not_found() {
    let data = backend();
    let err = commands::gacha(data.as_ref(), "missing", |_| {})
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::NotFound { entity: "event", .. });
}

#[tokio::test(start_paused = true)]
async fn pick_winner_is_reproducible_with_seed() {
    let first = commands::pick_winner(GachaRoller::with_seed(vec![1, 2, 3, 4], 9), |_| {}).await;
    let second = commands::pick_winner(GachaRoller::with_seed(vec![1, 2, 3, 4], 9), |_| {}).await;
    assert!(first.is_some());
    assert_eq!(first, second);
}
