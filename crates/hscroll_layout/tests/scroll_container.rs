//! Integration tests for the scroll container over a Taffy-backed view tree
//!
//! These tests verify that:
//! - The scrollable length tracks content and viewport widths
//! - Scroll offsets stay in range across layout passes and content changes
//! - Persisted offsets survive save/restore, including a direction change
//! - Child margins turn into padding exactly once
//! - The touch gate blocks drags only while scrolling is disabled
//! - Focus requested before layout ends where focus after layout would

use hscroll_layout::prelude::*;
use hscroll_layout::Error;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fixed(width: f32, height: f32) -> taffy::Style {
    taffy::Style {
        size: taffy::Size {
            width: taffy::Dimension::Length(width),
            height: taffy::Dimension::Length(height),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

fn row() -> taffy::Style {
    taffy::Style {
        flex_direction: taffy::FlexDirection::Row,
        ..Default::default()
    }
}

/// Attached container holding one fixed-size child
fn container_with_child(width: f32, height: f32) -> (ScrollContainer, ViewId) {
    let mut container = ScrollContainer::default();
    let child = container
        .tree_mut()
        .create_content(fixed(width, height))
        .unwrap();
    container.set_child(child).unwrap();
    container.attach();
    (container, child)
}

/// Attached container holding a row of ten 100x100 cards
fn container_with_cards() -> (ScrollContainer, Vec<ViewId>) {
    let mut container = ScrollContainer::default();
    let tree = container.tree_mut();
    let row = tree.create_content(row()).unwrap();
    let cards: Vec<ViewId> = (0..10)
        .map(|_| tree.create_content(fixed(100.0, 100.0)).unwrap())
        .collect();
    for card in &cards {
        tree.add_child(row, *card).unwrap();
    }
    container.set_child(row).unwrap();
    container.attach();
    (container, cards)
}

/// Test the basic 1000px content in a 300px viewport
#[test]
fn test_scrollable_length_and_clamp() {
    init_tracing();
    let (mut container, _) = container_with_child(1000.0, 200.0);
    container.layout_pass(300, 200);

    assert_eq!(container.measured_size(), Size::new(300, 200));
    assert_eq!(container.scrollable_length(), 700);

    container.scroll_by(800);
    assert_eq!(container.scroll_x(), 700);
    container.scroll_to(-50);
    assert_eq!(container.scroll_x(), 0);
}

/// Test that scrollable length is max(0, content - viewport) across sizes
#[test]
fn test_scrollable_length_tracks_sizes() {
    init_tracing();
    for content in [0, 150, 300, 301, 1000, 2500] {
        for viewport in [100, 300, 800] {
            let (mut container, _) = container_with_child(content as f32, 50.0);
            container.layout_pass(viewport, 50);
            assert_eq!(
                container.scrollable_length(),
                (content - viewport).max(0),
                "content {content}, viewport {viewport}"
            );
        }
    }
}

/// Test that the offset stays within [0, scrollable length] as content changes
#[test]
fn test_offset_in_range_after_every_pass() {
    init_tracing();
    let (mut container, child) = container_with_child(1000.0, 100.0);
    container.layout_pass(300, 100);

    for (width, scroll) in [(1000.0, 650), (400.0, 0), (2000.0, 1900), (250.0, 40), (900.0, 600)] {
        container.scroll_by(scroll);
        container
            .update_content(|tree| tree.set_style(child, fixed(width, 100.0)))
            .unwrap();
        assert!(container.is_layout_dirty());

        container.layout_pass(300, 100);
        let offset = container.scroll_x();
        assert!(offset >= 0);
        assert!(offset <= container.scrollable_length());
        assert_eq!(container.scrollable_length(), (width as i32 - 300).max(0));
    }
}

/// Test that margins become padding once and extend the scroll range
#[test]
fn test_margins_become_padding() {
    init_tracing();
    let mut container = ScrollContainer::default();
    let child = container
        .tree_mut()
        .create_content(fixed(1000.0, 200.0))
        .unwrap();
    container
        .set_child_with_params(
            child,
            IncomingParams::Margin {
                width: Dimension::WrapContent,
                height: Dimension::WrapContent,
                margins: EdgeInsets::new(10, 20, 30, 40),
            },
        )
        .unwrap();
    container.attach();

    container.layout_pass(300, 300);
    assert_eq!(container.padding(), EdgeInsets::new(10, 20, 30, 40));
    assert_eq!(container.engine().content_measured_size(), Size::new(1040, 260));
    assert_eq!(container.scrollable_length(), 740);

    container.scroll_to(5000);
    assert_eq!(container.scroll_x(), 740);

    // Repeated passes are stable
    container.request_layout();
    container.layout_pass(300, 300);
    assert_eq!(container.padding(), EdgeInsets::new(10, 20, 30, 40));
    assert_eq!(container.scrollable_length(), 740);
    assert_eq!(container.scroll_x(), 740);
}

/// Test that a percent width follows the latest measure before layout
#[test]
fn test_percent_width_follows_latest_measure() {
    init_tracing();
    let mut container = ScrollContainer::default();
    let child = container
        .tree_mut()
        .create_content(fixed(10.0, 100.0))
        .unwrap();
    container
        .set_child_with_params(
            child,
            LayoutParams::new(Dimension::Percent(2.0), Dimension::WrapContent),
        )
        .unwrap();
    container.attach();

    container.measure(MeasureSpec::exact(300), MeasureSpec::exact(100));
    container.measure(MeasureSpec::exact(600), MeasureSpec::exact(100));
    container.layout(0, 0, 600, 100);

    assert_eq!(container.engine().content_measured_size().width, 1200);
    assert_eq!(container.scrollable_length(), 600);

    // The percentage is back in place for the next pass
    container.request_layout();
    container.layout_pass(400, 100);
    assert_eq!(container.scrollable_length(), 400);
}

/// Test that a persisted offset from the start restores under RTL
#[test]
fn test_restore_offset_under_rtl() {
    init_tracing();
    let (mut container, _) = container_with_child(1000.0, 200.0);
    container.set_layout_direction(LayoutDirection::Rtl);
    container.restore_state(ScrollSavedState::new(Vec::new(), 150));

    container.layout_pass(300, 200);
    assert_eq!(container.scroll_x(), 550);
}

/// Test that an RTL container without saved state starts at the content start
#[test]
fn test_rtl_first_layout_starts_at_right_edge() {
    init_tracing();
    let (mut container, _) = container_with_child(1000.0, 200.0);
    container.set_layout_direction(LayoutDirection::Rtl);
    container.layout_pass(300, 200);
    assert_eq!(container.scroll_x(), 700);
}

/// Test save/restore through JSON in the same direction
#[test]
fn test_save_restore_round_trip() {
    init_tracing();
    let (mut container, _) = container_with_child(1000.0, 200.0);
    container.layout_pass(300, 200);
    container.scroll_to(320);

    let json = container.save_state().to_json().unwrap();

    let (mut restored, _) = container_with_child(1000.0, 200.0);
    restored.restore_state(ScrollSavedState::from_json(&json).unwrap());
    restored.layout_pass(300, 200);
    assert_eq!(restored.scroll_x(), 320);
}

/// Test that an LTR offset restored under RTL maps to range - offset
#[test]
fn test_ltr_state_restored_under_rtl() {
    init_tracing();
    let (mut container, _) = container_with_child(1000.0, 200.0);
    container.layout_pass(300, 200);
    container.scroll_to(120);
    let parcel = container.save_state().to_parcel();

    let (mut restored, _) = container_with_child(1000.0, 200.0);
    restored.set_layout_direction(LayoutDirection::Rtl);
    restored.restore_state(ScrollSavedState::from_parcel(&parcel).unwrap());
    restored.layout_pass(300, 200);
    assert_eq!(restored.scroll_x(), 700 - 120);
}

/// Test that a saved state is applied on the first layout after reattach
#[test]
fn test_restore_waits_for_next_attach() {
    init_tracing();
    let (mut container, _) = container_with_child(1000.0, 200.0);
    container.layout_pass(300, 200);

    container.restore_state(ScrollSavedState::new(Vec::new(), 200));
    container.layout_pass(300, 200);
    assert_eq!(container.scroll_x(), 0);

    container.detach();
    container.attach();
    container.layout_pass(300, 200);
    assert_eq!(container.scroll_x(), 200);
}

/// Test the touch gate against a drag of the same gesture
#[test]
fn test_touch_gate() {
    init_tracing();
    let (mut container, _) = container_with_child(1000.0, 200.0);
    container.layout_pass(300, 200);

    container.set_scroll_enabled(false);
    assert!(!container.is_layout_dirty());
    assert!(!container.intercept_touch_event(&TouchEvent::down(200.0, 50.0)));
    assert!(!container.dispatch_touch_event(&TouchEvent::down(200.0, 50.0)));
    assert!(!container.dispatch_touch_event(&TouchEvent::moved(150.0, 50.0)));
    container.dispatch_touch_event(&TouchEvent::up(150.0, 50.0));
    assert_eq!(container.scroll_x(), 0);

    container.set_scroll_enabled(true);
    assert!(container.dispatch_touch_event(&TouchEvent::down(200.0, 50.0)));
    container.dispatch_touch_event(&TouchEvent::moved(150.0, 50.0));
    assert_eq!(container.scroll_x(), 42);
    container.dispatch_touch_event(&TouchEvent::moved(100.0, 50.0));
    assert_eq!(container.scroll_x(), 92);
    container.dispatch_touch_event(&TouchEvent::up(100.0, 50.0));
}

/// Test that a container configured from TOML starts with scrolling disabled
#[test]
fn test_config_from_toml() {
    init_tracing();
    let mut container = ScrollContainer::from_toml_str("scroll_enabled = false\nmin_width = 500").unwrap();
    assert!(!container.scroll_enabled());

    container.measure(MeasureSpec::at_most(800), MeasureSpec::unspecified());
    assert_eq!(container.measured_size(), Size::new(500, 0));

    assert!(matches!(
        ScrollContainer::from_toml_str("touch_slop = []"),
        Err(Error::Config(_))
    ));
}

/// Test that focus requested before layout scrolls once layout completes
#[test]
fn test_deferred_focus() {
    init_tracing();
    let (mut container, cards) = container_with_cards();

    container.request_child_focus(cards[7]);
    assert_eq!(container.scroll_x(), 0);
    assert_eq!(container.engine().pending_focus(), Some(cards[7]));

    container.layout_pass(300, 100);
    assert_eq!(container.scrollable_length(), 700);
    assert_eq!(container.scroll_x(), 500);
    assert_eq!(container.engine().pending_focus(), None);
}

/// Test that deferred focus ends where focus after layout does
#[test]
fn test_deferred_focus_matches_immediate() {
    init_tracing();
    let (mut deferred, cards) = container_with_cards();
    deferred.request_child_focus(cards[7]);
    deferred.layout_pass(300, 100);

    let (mut immediate, cards) = container_with_cards();
    immediate.layout_pass(300, 100);
    immediate.request_child_focus(cards[7]);

    assert_eq!(deferred.scroll_x(), immediate.scroll_x());

    // Back to the first card
    immediate.request_child_focus(cards[0]);
    assert_eq!(immediate.scroll_x(), 0);
}

/// Test that a focus target removed before layout is dropped
#[test]
fn test_deferred_focus_dropped_after_removal() {
    init_tracing();
    let (mut container, cards) = container_with_cards();
    container.request_child_focus(cards[9]);
    container
        .update_content(|tree| tree.remove(cards[9]))
        .unwrap();

    container.layout_pass(300, 100);
    assert_eq!(container.scroll_x(), 0);
    assert_eq!(container.scrollable_length(), 600);
    assert_eq!(container.engine().pending_focus(), None);
}
