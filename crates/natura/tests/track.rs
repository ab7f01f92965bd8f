//! Integration tests - tracks driven end to end from HTML
//!
//! HTML → DOM → strip layout → track setup → events → announcements

use natura::dom::{ElementQuery, Key, NodeId};
use natura::{Toolkit, ToolkitConfig};

fn panels(count: usize) -> String {
    (0..count)
        .map(|i| format!(r#"<li><a href="/item/{i}">Item {i}</a><button type="button">Buy</button></li>"#))
        .collect()
}

fn track_html(panel_count: usize, visible: usize) -> String {
    format!(
        r#"
        <div class="track" style="--visible-panels: {visible}">
            <ul class="track__panels" style="overflow-x: auto; padding-left: 50px">{}</ul>
            <button type="button" data-track-prev>Previous</button>
            <button type="button" data-track-next>Next</button>
            <ol class="pagination" data-track-pagination></ol>
        </div>
        "#,
        panels(panel_count)
    )
}

fn page(body: &str) -> String {
    format!("<!DOCTYPE html><html><head><title>Tracks</title></head><body>{body}</body></html>")
}

fn config(supports_scroll_end: bool) -> ToolkitConfig {
    ToolkitConfig::from_json(&format!(
        r#"{{ "host": {{ "viewport_width": 1000, "supports_scroll_end": {supports_scroll_end} }} }}"#
    ))
    .unwrap()
}

fn toolkit(body: &str) -> Toolkit {
    toolkit_with(body, config(true))
}

fn toolkit_with(body: &str, config: ToolkitConfig) -> Toolkit {
    let mut toolkit = Toolkit::from_html(&page(body), config).unwrap();
    toolkit.init();
    toolkit
}

fn all(toolkit: &Toolkit, selector: &str) -> Vec<NodeId> {
    toolkit.window().tree().query_selector_all(NodeId::ROOT, selector)
}

fn announced(toolkit: &mut Toolkit) -> Vec<String> {
    toolkit.announcements().into_iter().map(|c| c.text).collect()
}

fn active_controls(toolkit: &Toolkit) -> Vec<usize> {
    let tree = toolkit.window().tree();
    all(toolkit, "[data-page-index]")
        .into_iter()
        .enumerate()
        .filter(|&(_, c)| tree.attribute(c, "aria-current") == Some("true"))
        .map(|(i, _)| i)
        .collect()
}

// ============================================================================
// PAGINATION
// ============================================================================

#[test]
fn test_six_panels_two_visible() {
    let mut toolkit = toolkit(&track_html(6, 2));
    let track = toolkit.track("track-0").unwrap();
    assert_eq!(track.page_count(), 3);
    assert_eq!(all(&toolkit, "[data-page-index]").len(), 3);
    assert_eq!(active_controls(&toolkit), vec![0]);

    let mut pages = Vec::new();
    for _ in 0..3 {
        assert!(toolkit.next("track-0").unwrap());
        toolkit.run_for(500);
        pages.push(toolkit.track("track-0").unwrap().active_page());
        assert_eq!(active_controls(&toolkit), vec![pages[pages.len() - 1]]);
    }

    assert_eq!(pages, vec![1, 2, 0]);
    assert_eq!(toolkit.live_text("track-0").as_deref(), Some("Page 1 of 3"));
    assert_eq!(
        announced(&mut toolkit),
        vec!["Page 2 of 3", "Page 3 of 3", "Page 1 of 3"]
    );
}

#[test]
fn test_panel_ids_and_uneven_last_page() {
    let toolkit = toolkit(&track_html(5, 2));
    let track = toolkit.track("track-0").unwrap();
    let sizes: Vec<usize> = track.pages().iter().map(|p| p.len()).collect();
    assert_eq!(sizes, vec![2, 2, 1]);

    let tree = toolkit.window().tree();
    let ids: Vec<&str> = all(&toolkit, "li[id]")
        .into_iter()
        .filter_map(|li| tree.attribute(li, "id"))
        .collect();
    assert_eq!(
        ids,
        vec![
            "track-0-panel-0",
            "track-0-panel-1",
            "track-0-panel-2",
            "track-0-panel-3",
            "track-0-panel-4"
        ]
    );
}

#[test]
fn test_empty_track_is_inert() {
    let mut toolkit = toolkit(&track_html(0, 2));
    let track = toolkit.track("track-0").unwrap();
    assert_eq!(track.page_count(), 0);
    assert!(track.is_inert());

    let container = toolkit.query(".track").unwrap();
    let list = toolkit.query("[data-track-pagination]").unwrap();
    let tree = toolkit.window().tree();
    assert!(tree.has_class(container, "hide-controls"));
    assert!(tree.children(list).is_empty());
    for arrow in all(&toolkit, "[data-track-prev], [data-track-next]") {
        assert!(tree.has_attribute(arrow, "disabled"));
    }

    assert!(!toolkit.go_to("track-0", 0).unwrap());
    toolkit.run_for(500);
    assert!(announced(&mut toolkit).is_empty());
}

#[test]
fn test_visible_panel_fallback() {
    let html = track_html(3, 2).replace("--visible-panels: 2", "--visible-panels: none");
    let toolkit = toolkit(&html);
    assert_eq!(toolkit.track("track-0").unwrap().page_count(), 3);
}

// ============================================================================
// INPUT
// ============================================================================

#[test]
fn test_clicks_and_keys() {
    let mut toolkit = toolkit(&track_html(6, 2));
    let prev = toolkit.query("[data-track-prev]").unwrap();
    let next = toolkit.query("[data-track-next]").unwrap();

    toolkit.click(prev);
    toolkit.run_for(500);
    assert_eq!(toolkit.track("track-0").unwrap().active_page(), 2);

    let number = toolkit.query(".pagination__number").unwrap();
    toolkit.click(number);
    toolkit.run_for(500);
    assert_eq!(toolkit.track("track-0").unwrap().active_page(), 0);

    toolkit.key_down(next, Key::ArrowRight);
    toolkit.run_for(500);
    assert_eq!(toolkit.track("track-0").unwrap().active_page(), 1);

    // Wrong arrow for the control
    toolkit.key_down(prev, Key::ArrowRight);
    toolkit.run_for(500);
    assert_eq!(toolkit.track("track-0").unwrap().active_page(), 1);

    toolkit.key_down(prev, Key::ArrowLeft);
    toolkit.run_for(500);
    assert_eq!(toolkit.track("track-0").unwrap().active_page(), 0);
}

#[test]
fn test_tracks_are_independent() {
    let body = format!("{}{}", track_html(6, 2), track_html(4, 3));
    let mut toolkit = toolkit(&body);
    assert_eq!(toolkit.tracks().navigators().len(), 2);
    assert_eq!(toolkit.track("track-1").unwrap().page_count(), 2);

    let second_next = all(&toolkit, "[data-track-next]")[1];
    toolkit.click(second_next);
    toolkit.run_for(500);
    assert_eq!(toolkit.track("track-0").unwrap().active_page(), 0);
    assert_eq!(toolkit.track("track-1").unwrap().active_page(), 1);
    assert_eq!(toolkit.live_text("track-1").as_deref(), Some("Page 2 of 2"));
    assert_eq!(toolkit.live_text("track-0").as_deref(), Some(""));
}

// ============================================================================
// SCROLL SETTLE
// ============================================================================

#[test]
fn test_user_scroll_settles_with_scroll_end() {
    let mut toolkit = toolkit(&track_html(6, 2));
    toolkit.run_for(50);
    let strip = toolkit.query(".track__panels").unwrap();

    toolkit.scroll_to(strip, 900.0);
    toolkit.run_for(500);
    assert_eq!(toolkit.track("track-0").unwrap().active_page(), 1);
    assert_eq!(announced(&mut toolkit), vec!["Page 2 of 3"]);
}

#[test]
fn test_user_scroll_settles_without_scroll_end() {
    let mut toolkit = toolkit_with(&track_html(6, 2), config(false));
    toolkit.run_for(50);
    let strip = toolkit.query(".track__panels").unwrap();

    toolkit.scroll_to(strip, 900.0);
    toolkit.run_for(100);
    assert_eq!(toolkit.track("track-0").unwrap().active_page(), 0);

    toolkit.run_for(700);
    assert_eq!(toolkit.track("track-0").unwrap().active_page(), 1);
    assert_eq!(announced(&mut toolkit), vec!["Page 2 of 3"]);
}

#[test]
fn test_user_scroll_after_click_wins() {
    for supports_scroll_end in [true, false] {
        let mut toolkit = toolkit_with(&track_html(6, 2), config(supports_scroll_end));
        let strip = toolkit.query(".track__panels").unwrap();

        toolkit.go_to("track-0", 2).unwrap();
        toolkit.run_for(40);
        toolkit.scroll_to(strip, 0.0);
        toolkit.run_for(1000);

        let track = toolkit.track("track-0").unwrap();
        assert_eq!(toolkit.window().scroll_left(strip), 0.0);
        assert_eq!(track.active_page(), 0, "scrollend: {supports_scroll_end}");
        assert_eq!(active_controls(&toolkit), vec![0]);
        assert_eq!(toolkit.live_text("track-0").as_deref(), Some("Page 1 of 3"));
        assert_eq!(toolkit.window().pending_timers(), 0);
    }
}

// ============================================================================
// REACHABILITY
// ============================================================================

#[test]
fn test_only_visible_panels_are_tabbable() {
    let mut toolkit = toolkit(&track_html(6, 2));
    toolkit.run_for(50);

    let tabindexes = |toolkit: &Toolkit| -> Vec<String> {
        let tree = toolkit.window().tree();
        all(toolkit, ".track__panels")
            .into_iter()
            .flat_map(|strip| tree.element_children(strip).collect::<Vec<_>>())
            .map(|panel| {
                let link = tree.query_selector(panel, "a").unwrap();
                let button = tree.query_selector(panel, "button").unwrap();
                let link_index = tree.attribute(link, "tabindex").unwrap_or_default();
                assert_eq!(tree.attribute(button, "tabindex"), Some(link_index));
                link_index.to_string()
            })
            .collect()
    };

    assert_eq!(tabindexes(&toolkit), vec!["0", "0", "-1", "-1", "-1", "-1"]);

    toolkit.next("track-0").unwrap();
    toolkit.run_for(500);
    assert_eq!(tabindexes(&toolkit), vec!["-1", "-1", "0", "0", "-1", "-1"]);

    let tree = toolkit.window().tree();
    let hidden: Vec<Option<&str>> = all(&toolkit, "li[aria-hidden]")
        .into_iter()
        .map(|li| tree.attribute(li, "aria-hidden"))
        .collect();
    assert_eq!(
        hidden,
        vec![Some("true"), Some("true"), Some("false"), Some("false"), Some("true"), Some("true")]
    );
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn test_resize_keeps_one_observer_pair_per_track() {
    let body = format!("{}{}", track_html(6, 2), track_html(4, 3));
    let mut toolkit = toolkit(&body);
    assert_eq!(toolkit.window().observer_count(), 4);
    assert_eq!(toolkit.tracks().subscription_count(), 8);

    toolkit.next("track-0").unwrap();
    toolkit.run_for(500);
    for width in [1200.0, 700.0, 1000.0] {
        toolkit.resize(width);
        toolkit.run_for(100);
        assert_eq!(toolkit.window().observer_count(), 4);
        assert_eq!(toolkit.tracks().subscription_count(), 8);
        for nav in toolkit.tracks().navigators() {
            assert_eq!(nav.subscription_count(), 4);
            assert_eq!(nav.active_page(), 0);
        }
    }

    let strip = toolkit.query(".track__panels").unwrap();
    assert_eq!(toolkit.window().scroll_left(strip), 0.0);
    assert_eq!(all(&toolkit, "[data-page-index]").len(), 5);
    assert_eq!(active_controls(&toolkit), vec![0, 3]);

    // One click still moves one page after several rebuilds
    let next = toolkit.query("[data-track-next]").unwrap();
    toolkit.click(next);
    toolkit.run_for(500);
    assert_eq!(toolkit.track("track-0").unwrap().active_page(), 1);
}

#[test]
fn test_existing_live_region_is_reused() {
    let html = track_html(4, 2).replace(
        "</ol>",
        r#"</ol><div class="liveregion" role="status" aria-live="polite"></div>"#,
    );
    let mut toolkit = toolkit(&html);
    assert_eq!(all(&toolkit, ".liveregion").len(), 1);

    toolkit.next("track-0").unwrap();
    assert_eq!(toolkit.live_text("track-0").as_deref(), Some("Page 2 of 2"));
    assert_eq!(announced(&mut toolkit), vec!["Page 2 of 2"]);
}

#[test]
fn test_existing_region_keeps_its_politeness() {
    let html = track_html(4, 2).replace(
        "</ol>",
        r#"</ol><div class="liveregion" role="alert"></div>"#,
    );
    let mut toolkit = toolkit(&html);
    toolkit.next("track-0").unwrap();
    assert_eq!(toolkit.pending_announcements(), 1);

    let changes = toolkit.announcements();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].politeness, natura::a11y::LiveRegionMode::Assertive);
    assert!(changes[0].interrupt);
}

#[test]
fn test_silenced_region_is_not_announced() {
    let html = track_html(4, 2).replace(
        "</ol>",
        r#"</ol><div class="liveregion" aria-live="off"></div>"#,
    );
    let mut toolkit = toolkit(&html);
    toolkit.next("track-0").unwrap();
    toolkit.run_for(500);
    assert_eq!(toolkit.live_text("track-0").as_deref(), Some("Page 2 of 2"));
    assert_eq!(toolkit.pending_announcements(), 0);
}

#[test]
fn test_discarded_announcements_are_not_spoken() {
    let mut toolkit = toolkit(&track_html(6, 2));
    toolkit.next("track-0").unwrap();
    toolkit.discard_announcements();
    assert!(announced(&mut toolkit).is_empty());

    toolkit.next("track-0").unwrap();
    assert_eq!(announced(&mut toolkit), vec!["Page 3 of 3"]);
}

#[test]
fn test_destroy_detaches_track() {
    let mut toolkit = toolkit(&track_html(6, 2));
    toolkit.destroy("track-0").unwrap();
    assert_eq!(toolkit.window().observer_count(), 0);
    assert_eq!(toolkit.tracks().subscription_count(), 0);

    let next = toolkit.query("[data-track-next]").unwrap();
    toolkit.click(next);
    toolkit.resize(800.0);
    toolkit.run_for(500);
    assert_eq!(toolkit.track("track-0").unwrap().active_page(), 0);
    assert_eq!(all(&toolkit, "[data-page-index]").len(), 3);
    assert!(toolkit.next("track-0").is_err());
}
