//! Plain-text rendering of list views.

use std::fmt::Write as _;

use yurucamp_core::list_view::ListView;
use yurucamp_core::models::{Activity, CampArea, Category, Event, Region};
use yurucamp_core::pagination::PageMarker;

/// One-line summary of a record.
pub trait ListRow {
    fn row(&self) -> String;
}

fn with_details(head: &str, details: &[Option<String>]) -> String {
    let details: Vec<&str> = details.iter().flatten().map(String::as_str).collect();
    if details.is_empty() {
        head.to_string()
    } else {
        format!("{head} ({})", details.join(", "))
    }
}

impl ListRow for Activity {
    fn row(&self) -> String {
        with_details(
            &self.title,
            &[
                self.location.clone(),
                self.user.as_ref().map(|u| format!("by {}", u.display_name)),
            ],
        )
    }
}

impl ListRow for CampArea {
    fn row(&self) -> String {
        with_details(
            &self.name,
            &[
                self.location.clone().or_else(|| self.address.clone()),
                self.price.map(|p| format!("¥{p}")),
            ],
        )
    }
}

impl ListRow for Event {
    fn row(&self) -> String {
        let date = self.start_at.map(|t| t.format("%Y-%m-%d").to_string());
        let seats = match self.capacity {
            Some(cap) => Some(format!("{}/{cap} joined", self.participants.len())),
            None if !self.participants.is_empty() => {
                Some(format!("{} joined", self.participants.len()))
            }
            None => None,
        };
        with_details(&self.title, &[date, self.location.clone(), seats])
    }
}

/// Compact page control, e.g. `1 … 4 [5] 6 … 10`.
pub fn render_pages(pages: &[PageMarker], current_page: usize) -> String {
    pages
        .iter()
        .map(|marker| match marker {
            PageMarker::Page(p) if *p == current_page => format!("[{p}]"),
            PageMarker::Page(p) => p.to_string(),
            PageMarker::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full listing: filter chips, numbered rows and the page control.
pub fn render_list<T: ListRow>(
    heading: &str,
    view: &ListView<'_, T>,
    regions: &[Region],
    categories: &[Category],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{heading}: {} found", view.total_matches);

    if !view.active_filters.is_empty() {
        let chips: Vec<String> = view
            .active_filters
            .iter()
            .map(|f| f.label(regions, categories))
            .collect();
        let _ = writeln!(out, "Filters: {}", chips.join(", "));
    }

    if view.items.is_empty() {
        let _ = writeln!(out, "  (nothing to show)");
    }
    for (offset, item) in view.items.iter().enumerate() {
        let _ = writeln!(out, "{:>4}. {}", view.start_index + offset + 1, item.row());
    }

    if view.total_pages > 1 {
        let _ = writeln!(out, "Page {}", render_pages(&view.pages, view.current_page));
    }
    out
}

#[cfg(test)]
mod tests {
    use yurucamp_core::filter::Searchable;
    use yurucamp_core::list_view::ListViewController;
    use yurucamp_core::pagination::page_numbers;

    use super::*;

    struct Name(String);

    impl Searchable for Name {
        fn search_fields(&self) -> Vec<Option<&str>> {
            vec![Some(self.0.as_str())]
        }
    }

    impl ListRow for Name {
        fn row(&self) -> String {
            self.0.clone()
        }
    }

    #[test]
    fn pages_mark_current() {
        assert_eq!(render_pages(&page_numbers(10, 5), 5), "1 … 4 [5] 6 … 10");
        assert_eq!(render_pages(&page_numbers(1, 1), 1), "[1]");
    }

    #[test]
    fn list_numbers_rows_across_pages() {
        let items: Vec<Name> = (1..=10).map(|i| Name(format!("site {i}"))).collect();
        let mut ctl = ListViewController::new(items, 4).unwrap();
        ctl.set_page(2);
        let text = render_list("Camps", &ctl.view(), &[], &[]);

        assert!(text.starts_with("Camps: 10 found\n"));
        assert!(text.contains("   5. site 5\n"));
        assert!(text.contains("   8. site 8\n"));
        assert!(!text.contains("site 9"));
        assert!(text.contains("Page 1 [2] 3"));
    }

    #[test]
    fn list_shows_filter_chips_and_empty_state() {
        let items = vec![Name("Lake".into())];
        let mut ctl = ListViewController::new(items, 4).unwrap();
        ctl.set_query("forest");
        let text = render_list("Camps", &ctl.view(), &[], &[]);

        assert!(text.contains("Filters: \"forest\""));
        assert!(text.contains("(nothing to show)"));
        assert!(!text.contains("Page"));
    }

    #[test]
    fn activity_row_includes_location_and_owner() {
        let activity: Activity = sample_activity();
        assert_eq!(activity.row(), "Snow camp (Motosu, by Rin)");
    }

    fn sample_activity() -> Activity {
        Activity {
            id: "a1".into(),
            title: "Snow camp".into(),
            description: None,
            location: Some("Motosu".into()),
            region_id: None,
            category_id: None,
            image_url: None,
            user: Some(yurucamp_core::models::UserSummary {
                id: "u1".into(),
                display_name: "Rin".into(),
                avatar_url: None,
            }),
            region: None,
            created_at: None,
        }
    }
}
