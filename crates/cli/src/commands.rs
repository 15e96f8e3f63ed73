//! Command implementations, independent of argument parsing and stdout.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use yurucamp_client::{ClientError, DataProvider, ListBrowser, ListResource};
use yurucamp_core::filter::FilterState;
use yurucamp_core::models::{Activity, CampArea, Category, Event, Participant, Region};
use yurucamp_picker::{GachaEvent, GachaRoller};

use crate::cli::{ListArgs, ListKind};
use crate::render::{render_list, ListRow};

/// How often the rolling display is refreshed in the terminal.
const DISPLAY_REFRESH: Duration = Duration::from_millis(150);

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// Fetch, filter and paginate one list and render it as text.
pub async fn list(provider: Arc<dyn DataProvider>, args: &ListArgs) -> Result<String, ClientError> {
    let (regions, categories) = lookups(provider.as_ref()).await;

    match args.kind {
        ListKind::Activities => {
            list_resource::<Activity>(provider, args, "Activities", &regions, &categories).await
        }
        ListKind::Camps => {
            list_resource::<CampArea>(provider, args, "Camp areas", &regions, &categories).await
        }
        ListKind::Events => {
            list_resource::<Event>(provider, args, "Events", &regions, &categories).await
        }
    }
}

/// Region and category names for filter chips. Best effort: a failure only
/// costs the chips their display names.
async fn lookups(provider: &dyn DataProvider) -> (Vec<Region>, Vec<Category>) {
    let regions = provider.list_regions().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load regions");
        Vec::new()
    });
    let categories = provider.list_categories().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load categories");
        Vec::new()
    });
    (regions, categories)
}

async fn list_resource<T: ListResource + ListRow>(
    provider: Arc<dyn DataProvider>,
    args: &ListArgs,
    heading: &str,
    regions: &[Region],
    categories: &[Category],
) -> Result<String, ClientError> {
    let mut browser = ListBrowser::<T>::new(provider, args.page_size)?;
    browser
        .set_filters(FilterState {
            query: args.query.clone().unwrap_or_default(),
            region_id: args.region.clone(),
            category_id: args.category.clone(),
        })
        .await?;

    if args.page > 1 && !browser.controller_mut().set_page(args.page) {
        tracing::warn!(
            page = args.page,
            total_pages = browser.controller().total_pages(),
            "Requested page out of range, showing page 1",
        );
    }

    Ok(render_list(heading, &browser.view(), regions, categories))
}

// ---------------------------------------------------------------------------
// Gacha
// ---------------------------------------------------------------------------

/// Load an event and pick one of its participants.
///
/// Returns `Ok(None)` when the event has nobody to pick or the roll was
/// interrupted.
pub async fn gacha<F>(
    provider: &dyn DataProvider,
    event_id: &str,
    on_display: F,
) -> Result<Option<Participant>, ClientError>
where
    F: FnMut(&Participant),
{
    let event = provider.get_event(event_id).await?;
    tracing::info!(
        event_id,
        participants = event.participants.len(),
        "Loaded event for gacha"
    );
    Ok(pick_winner(GachaRoller::new(event.participants), on_display).await)
}

/// Run one roll to completion, reporting the displayed candidate as it
/// changes. Ctrl-C tears the session down and yields `None`.
pub async fn pick_winner<T, F>(mut roller: GachaRoller<T>, mut on_display: F) -> Option<T>
where
    T: Clone + PartialEq + Send + 'static,
    F: FnMut(&T),
{
    let mut events = roller.subscribe();
    if !roller.start() {
        return None;
    }

    let mut refresh = tokio::time::interval(DISPLAY_REFRESH);
    let mut last_shown: Option<T> = None;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut watch_ctrl_c = true;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(GachaEvent::Settled { winner }) => return Some(winner),
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => return None,
            },
            _ = refresh.tick() => {
                let displayed = roller.snapshot().displayed;
                if displayed.is_some() && displayed != last_shown {
                    if let Some(candidate) = displayed.as_ref() {
                        on_display(candidate);
                    }
                    last_shown = displayed;
                }
            }
            result = &mut ctrl_c, if watch_ctrl_c => {
                if is_interrupt(result) {
                    tracing::info!("Gacha interrupted");
                    roller.close();
                    return None;
                }
                watch_ctrl_c = false;
            }
        }
    }
}

/// Whether a Ctrl-C wait ended because the user pressed it. A handler that
/// could not be installed is logged and the roll carries on.
fn is_interrupt(result: std::io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Ctrl-C handler unavailable, roll cannot be interrupted");
            false
        }
    }
}
