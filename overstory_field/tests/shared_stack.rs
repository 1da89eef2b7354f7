// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fields that share one overlay stack.

use kurbo::{Rect, Size};
use overstory_field::{
    AutosuggestField, Choice, FieldChanges, FieldConfig, FieldStatus, SelectField,
};
use overstory_nav::{Key, MenuEntry, NavigableItemList};
use overstory_placement::{Direction, OverlayStack};
use overstory_suggest::{SuggestConfig, SuggestItem};

const VIEWPORT: Size = Size::new(1024.0, 768.0);

fn statuses() -> NavigableItemList<&'static str> {
    NavigableItemList::new(vec![
        MenuEntry::item("open", "Open"),
        MenuEntry::item("blocked", "Blocked"),
        MenuEntry::create("new", "New status..."),
    ])
}

#[test]
fn escape_unwinds_most_recent_overlay_first() {
    let mut stack = OverlayStack::new();
    let mut status = SelectField::new("status", statuses(), FieldConfig::default());
    let mut owner: AutosuggestField<u32> =
        AutosuggestField::new("owner", FieldConfig::default(), SuggestConfig::default());

    status.open(&mut stack, Some(Rect::new(0.0, 0.0, 120.0, 30.0)), VIEWPORT);
    owner.open(&mut stack, Some(Rect::new(0.0, 60.0, 300.0, 90.0)), VIEWPORT);
    assert_eq!(stack.depth(), 2);

    assert!(!status.on_key(Key::Escape, &mut stack).handled);
    assert!(owner.on_key(Key::Escape, &mut stack).closed());
    assert!(status.on_key(Key::Escape, &mut stack).closed());
    assert!(stack.is_empty());
}

#[test]
fn closing_one_field_leaves_the_other_open() {
    let mut stack = OverlayStack::new();
    let mut status = SelectField::new("status", statuses(), FieldConfig::default());
    let mut owner: AutosuggestField<u32> =
        AutosuggestField::new("owner", FieldConfig::default(), SuggestConfig::default());
    status.open(&mut stack, Some(Rect::new(0.0, 0.0, 120.0, 30.0)), VIEWPORT);
    owner.open(&mut stack, Some(Rect::new(0.0, 60.0, 300.0, 90.0)), VIEWPORT);

    status.on_blur(0);
    assert!(status.tick(200, &mut stack).closed());
    assert!(owner.is_open());
    assert_eq!(stack.escape_target(), owner.overlay_id());
}

#[test]
fn create_entry_survives_filter_and_commits_its_key() {
    let mut stack = OverlayStack::new();
    let mut status = SelectField::new("status", statuses(), FieldConfig::default());
    status.open(&mut stack, Some(Rect::new(0.0, 0.0, 120.0, 30.0)), VIEWPORT);

    status.set_filter("zzz");
    assert_eq!(status.items().len(), 1);
    status.on_key(Key::Down, &mut stack);
    let commit = status.on_key(Key::Enter, &mut stack).commit;
    assert_eq!(commit.map(|c| c.value), Some("new"));
}

#[test]
fn field_opened_near_window_bottom_flips_and_tracks_resize() {
    let mut stack = OverlayStack::new();
    let config = FieldConfig::default().with_direction(Direction::BOTTOM_RIGHT);
    let mut owner: AutosuggestField<u32> =
        AutosuggestField::new("owner", config, SuggestConfig::default());
    owner.open(&mut stack, Some(Rect::new(600.0, 700.0, 900.0, 730.0)), VIEWPORT);
    assert!(owner.status().contains(FieldStatus::MEASURING));

    let placement = owner.on_measured(Size::new(300.0, 240.0));
    assert!(placement.flipped);
    assert_eq!(placement.left, 600.0);
    assert!(placement.top >= 0.0 && placement.top + 240.0 <= VIEWPORT.height);

    let resized = owner.on_viewport_resized(Size::new(1024.0, 1400.0)).unwrap();
    assert!(!resized.flipped);
    assert_eq!(resized.top, 734.0);
}

#[test]
fn autosuggest_flow_reports_changes() {
    let mut stack = OverlayStack::new();
    let mut owner: AutosuggestField<u32> = AutosuggestField::new(
        "owner",
        FieldConfig::default(),
        SuggestConfig::default().with_debounce(300),
    );
    let opened = owner.open(&mut stack, Some(Rect::new(0.0, 0.0, 300.0, 30.0)), VIEWPORT);
    assert!(opened.changes.contains(FieldChanges::OPENED));

    owner.on_input("ma", 0);
    owner.on_input("mar", 100);
    assert!(owner.poll(300).is_none());
    let request = owner.poll(400).unwrap();
    assert_eq!(request.query, "mar");

    let applied = owner.on_response(
        request.token,
        Ok(vec![SuggestItem::new(1, "Mark"), SuggestItem::new(2, "Maria")]),
    );
    assert!(applied.changes.contains(FieldChanges::ITEMS));

    let highlighted: Vec<_> = owner
        .suggestions()
        .iter()
        .map(|s| s.highlight.parts(&s.item.title).find(|(_, m)| *m).map(|(t, _)| t))
        .collect();
    assert_eq!(highlighted, vec![Some("Mar"), Some("Mar")]);

    owner.on_key(Key::Up, &mut stack);
    let done = owner.on_key(Key::Enter, &mut stack);
    assert!(done.changes.contains(FieldChanges::COMMITTED | FieldChanges::CLOSED));
    assert_eq!(done.commit.map(|c| c.value), Some(Choice::Existing(2)));
}

#[test]
fn overlay_width_follows_trigger_unless_configured() {
    let mut stack = OverlayStack::new();
    let trigger = Some(Rect::new(100.0, 40.0, 400.0, 72.0));

    let mut status = SelectField::new("status", statuses(), FieldConfig::default());
    status.open(&mut stack, trigger, VIEWPORT);
    let placement = status.on_measured(Size::new(120.0, 96.0));
    assert_eq!(placement.width, 300.0);
    assert_eq!(placement.left, 100.0);

    let moved = status.on_reference_moved(Some(Rect::new(100.0, 40.0, 260.0, 72.0))).unwrap();
    assert_eq!(moved.width, 160.0);

    let mut owner: AutosuggestField<u32> = AutosuggestField::new(
        "owner",
        FieldConfig::default().with_width(180.0),
        SuggestConfig::default(),
    );
    owner.open(&mut stack, trigger, VIEWPORT);
    assert_eq!(owner.on_measured(Size::new(120.0, 96.0)).width, 180.0);
}
