//! End-to-end behavior of a multi-select hosted in a parent page.

mod common;

use common::{ID, Page, ids, permissions};
use multiselect::prelude::*;
use tuidom::Key;

fn id(part: &str) -> String {
    format!("{ID}-{part}")
}

// =============================================================================
// Selection flow
// =============================================================================

#[test]
fn test_full_selection_scenario() {
    let mut page = Page::new(permissions());
    assert!(!page.is_open());

    page.click(&id("trigger"));
    assert!(page.is_open());

    page.click(&id("item-1"));
    assert_eq!(page.values(), ids(&["p2"]));

    page.click(&id("item-0"));
    assert_eq!(page.values(), ids(&["p2", "p1"]));
    assert!(page.is_open(), "selecting keeps the popover open");

    page.click(&id("badge-0-remove"));
    assert_eq!(page.values(), ids(&["p1"]));
    assert!(page.is_open(), "removing a badge does not toggle the popover");

    page.click(&id("clear"));
    assert_eq!(page.values(), Vec::<String>::new());
    assert!(page.is_open(), "clearing does not toggle the popover");

    assert_eq!(
        page.changes(),
        vec![ids(&["p2"]), ids(&["p2", "p1"]), ids(&["p1"]), vec![]]
    );
}

#[test]
fn test_reselecting_an_item_deselects_it() {
    let mut page = Page::new(permissions()).with_values(&["p1", "p3"]);
    page.click(&id("trigger"));

    page.click(&id("item-0"));

    assert_eq!(page.values(), ids(&["p3"]));
}

#[test]
fn test_item_indicator_follows_selection() {
    let mut page = Page::new(permissions()).with_values(&["p2"]);
    page.click(&id("trigger"));

    assert!(page.text(&id("item-1")).starts_with("[x]"));
    assert!(page.text(&id("item-0")).starts_with("[ ]"));
}

#[test]
fn test_display_waits_for_parent() {
    let mut page = Page::new(permissions()).ignoring_changes();
    page.click(&id("trigger"));

    page.click(&id("item-0"));

    assert_eq!(page.changes(), vec![ids(&["p1"])]);
    assert!(page.values().is_empty());
    assert!(page.text(&id("item-0")).starts_with("[ ]"));
    assert!(!page.exists(&id("badge-0")));
}

#[test]
fn test_without_callback_mutations_are_dropped() {
    let mut page = Page::new(permissions()).with_values(&["p1"]).without_callback();
    page.click(&id("trigger"));

    page.click(&id("item-1"));
    page.click(&id("badge-0-remove"));

    assert_eq!(page.values(), ids(&["p1"]));
    assert!(page.changes().is_empty());
}

// =============================================================================
// Badges and the trigger
// =============================================================================

#[test]
fn test_placeholder_when_empty() {
    let page = Page::new(permissions());
    assert!(page.text(&id("trigger")).contains("Pick permissions"));
}

#[test]
fn test_badges_show_labels_in_selection_order() {
    let page = Page::new(permissions()).with_values(&["p3", "p1"]);

    assert!(page.text(&id("badge-0")).starts_with("Gamma"));
    assert!(page.text(&id("badge-1")).starts_with("Alpha"));
    assert!(!page.text(&id("trigger")).contains("Pick permissions"));
}

#[test]
fn test_badge_for_undeclared_value_shows_raw_value() {
    let page = Page::new(permissions()).with_values(&["legacy.flag"]);
    assert!(page.text(&id("badge-0")).starts_with("legacy.flag"));
}

#[test]
fn test_badge_remove_while_closed_keeps_popover_closed() {
    let mut page = Page::new(permissions()).with_values(&["p1", "p2"]);

    let result = page.click(&id("badge-0-remove"));

    assert_eq!(result, EventResult::Consumed);
    assert_eq!(page.values(), ids(&["p2"]));
    assert!(!page.is_open());
}

#[test]
fn test_clear_while_closed_keeps_popover_closed() {
    let mut page = Page::new(permissions()).with_values(&["p1", "p2"]);

    page.click(&id("clear"));

    assert!(page.values().is_empty());
    assert!(!page.is_open());
}

#[test]
fn test_clear_on_empty_selection_emits_empty_set() {
    let mut page = Page::new(permissions());

    page.click(&id("clear"));

    assert_eq!(page.changes(), vec![Vec::<String>::new()]);
}

#[test]
fn test_trigger_toggles_popover() {
    let mut page = Page::new(permissions());

    page.click(&id("trigger"));
    assert!(page.is_open());
    page.click(&id("trigger"));
    assert!(!page.is_open());
}

#[test]
fn test_disabled_trigger_ignores_clicks() {
    let mut page = Page::new(permissions()).with_values(&["p1"]).disabled();

    page.click(&id("trigger"));
    page.click(&id("badge-0-remove"));

    assert!(!page.is_open());
    assert_eq!(page.values(), ids(&["p1"]));
}

// =============================================================================
// Long selections
// =============================================================================

fn long_labelled() -> Vec<Item> {
    (1..=8)
        .map(|n| Item::new(format!("n{n}")).label(format!("Permission number {n}")))
        .collect()
}

fn all_long_values() -> Vec<String> {
    (1..=8).map(|n| format!("n{n}")).collect()
}

fn long_page() -> Page {
    let values = all_long_values();
    let refs: Vec<&str> = values.iter().map(String::as_str).collect();
    Page::new(long_labelled()).with_values(&refs)
}

#[test]
fn test_badges_wrap_inside_the_container_width() {
    let page = long_page();

    for n in 0..8 {
        let remove = page.layout[&id(&format!("badge-{n}-remove"))];
        assert!(remove.right() <= 40, "badge {n} remove at {remove:?}");
    }
    let clear = page.layout[&id("clear")];
    assert!(clear.right() <= 40, "clear at {clear:?}");
    assert!(page.layout[&id("trigger")].height > 1);
}

#[test]
fn test_last_badge_and_clear_stay_clickable_when_wrapped() {
    let mut page = long_page();

    page.click(&id("badge-7-remove"));
    let mut expected = all_long_values();
    expected.pop();
    assert_eq!(page.values(), expected);
    assert!(!page.is_open());

    page.click(&id("clear"));
    assert!(page.values().is_empty());
    assert!(!page.is_open());
}

#[test]
fn test_popover_opens_below_a_wrapped_trigger() {
    let mut page = long_page();

    page.click(&id("trigger"));

    let trigger = page.layout[&id("trigger")];
    assert_eq!(page.layout[&id("popover")].y, trigger.bottom());
}

// =============================================================================
// Dismissal
// =============================================================================

#[test]
fn test_outside_click_closes() {
    let mut page = Page::new(permissions());
    page.click(&id("trigger"));

    page.click("outside");

    assert!(!page.is_open());
    assert!(page.values().is_empty());
}

#[test]
fn test_escape_closes_and_returns_focus_to_trigger() {
    let mut page = Page::new(permissions());
    page.click(&id("trigger"));
    assert_eq!(page.dispatcher.focused(), Some(id("search").as_str()));

    page.key(Key::Escape);

    assert!(!page.is_open());
    assert_eq!(page.dispatcher.focused(), Some(id("trigger").as_str()));
}

#[test]
fn test_closing_clears_search() {
    let mut page = Page::new(permissions());
    page.click(&id("trigger"));
    page.type_text("ga");

    page.key(Key::Escape);
    page.click(&id("trigger"));

    assert_eq!(page.text(&id("search")), "");
    assert_eq!(page.item_ids().len(), 3);
}

// =============================================================================
// Search and scrolling
// =============================================================================

#[test]
fn test_search_filters_case_insensitively() {
    let mut page = Page::new(permissions());
    page.click(&id("trigger"));

    page.type_text("AL");

    assert_eq!(page.item_ids(), vec![id("item-0")]);
    assert!(!page.exists(&id("empty")));
}

#[test]
fn test_search_matches_description() {
    let items = vec![
        Item::new("users.read").label("Read").description("user accounts"),
        Item::new("billing.read").label("Read").description("invoices"),
    ];
    let mut page = Page::new(items);
    page.click(&id("trigger"));

    page.type_text("invoice");

    assert_eq!(page.item_ids(), vec![id("item-1")]);
}

#[test]
fn test_search_without_matches_shows_empty_message() {
    let mut page = Page::new(permissions());
    page.click(&id("trigger"));

    page.type_text("zz");

    assert!(page.item_ids().is_empty());
    assert_eq!(page.text(&id("empty")), "No results found.");
}

#[test]
fn test_backspace_widens_results() {
    let mut page = Page::new(permissions());
    page.click(&id("trigger"));
    page.type_text("zz");

    page.key(Key::Backspace);
    page.key(Key::Backspace);

    assert_eq!(page.item_ids().len(), 3);
}

#[test]
fn test_selecting_filtered_item_keeps_declared_value() {
    let mut page = Page::new(permissions());
    page.click(&id("trigger"));
    page.type_text("gam");

    page.click(&id("item-2"));

    assert_eq!(page.values(), ids(&["p3"]));
}

#[test]
fn test_long_list_scrolls() {
    let items: Vec<Item> = (0..12).map(|i| Item::new(format!("v{i}"))).collect();
    let mut page = Page::new(items).max_visible(4);
    page.click(&id("trigger"));

    assert!(page.on_screen(&id("item-3")));
    assert!(!page.on_screen(&id("item-4")));

    page.scroll(&id("list"), 3);

    assert!(!page.on_screen(&id("item-2")));
    assert!(page.on_screen(&id("item-3")));
    assert!(page.on_screen(&id("item-6")));
}

// =============================================================================
// Keyboard
// =============================================================================

#[test]
fn test_arrow_down_opens_and_walks_items() {
    let mut page = Page::new(permissions());
    page.dispatcher.focus(&id("trigger"));

    page.key(Key::Down);
    assert!(page.is_open());
    assert_eq!(page.dispatcher.focused(), Some(id("search").as_str()));

    page.key(Key::Down);
    page.key(Key::Down);
    assert_eq!(page.dispatcher.focused(), Some(id("item-1").as_str()));

    page.key(Key::Enter);
    assert_eq!(page.values(), ids(&["p2"]));

    page.key(Key::Up);
    page.key(Key::Up);
    assert_eq!(page.dispatcher.focused(), Some(id("search").as_str()));
}

#[test]
fn test_space_toggles_focused_item() {
    let mut page = Page::new(permissions());
    page.click(&id("trigger"));
    page.key(Key::Down);

    page.key(Key::Char(' '));
    page.key(Key::Char(' '));

    assert_eq!(page.changes(), vec![ids(&["p1"]), vec![]]);
}

#[test]
fn test_keyboard_walk_scrolls_into_view() {
    let items: Vec<Item> = (0..6).map(|i| Item::new(format!("v{i}"))).collect();
    let mut page = Page::new(items).max_visible(2);
    page.click(&id("trigger"));

    for _ in 0..4 {
        page.key(Key::Down);
    }

    assert_eq!(page.dispatcher.focused(), Some(id("item-3").as_str()));
    assert!(page.on_screen(&id("item-3")));
    assert!(!page.on_screen(&id("item-1")));
}

// =============================================================================
// Candidates
// =============================================================================

#[test]
fn test_duplicate_candidates_last_label_wins() {
    let items = vec![
        Item::new("p1").label("Old name"),
        Item::new("p1").label("New name"),
    ];
    let page = Page::new(items).with_values(&["p1"]);

    assert!(page.text(&id("badge-0")).starts_with("New name"));
}

#[test]
fn test_items_from_deserialized_candidates() {
    let candidates: Vec<Candidate> = serde_json::from_str(
        r#"[{"value": "p1", "label": "Alpha"}, {"value": "p2", "description": "no label"}]"#,
    )
    .unwrap();
    let items: Vec<Item> = candidates.into_iter().map(Item::from).collect();
    let mut page = Page::new(items);
    page.click(&id("trigger"));

    assert!(page.text(&id("item-1")).contains("p2"));
    assert!(page.text(&id("item-1")).contains("no label"));
}
