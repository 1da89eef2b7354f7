// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted keyboard session with a filtered select field.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p overstory_demos --example select_field`

use kurbo::{Rect, Size};
use overstory_field::{FieldConfig, SelectField};
use overstory_nav::{Key, MenuEntry, NavigableItemList};
use overstory_placement::OverlayStack;
use tracing_subscriber::EnvFilter;

fn render(field: &SelectField<&'static str>) {
    for (index, entry) in field.items().iter().enumerate() {
        let cursor = if field.selected() == Some(index) { ">" } else { " " };
        match entry {
            MenuEntry::Item { label, .. } if entry.is_selectable() => println!("  {cursor} {label}"),
            MenuEntry::Item { label, .. } => println!("    ({label})"),
            MenuEntry::Separator => println!("    ----"),
            MenuEntry::Title(title) => println!("  {title}:"),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = NavigableItemList::new(vec![
        MenuEntry::title("Europe"),
        MenuEntry::item("de", "Germany"),
        MenuEntry::item("nl", "Netherlands"),
        MenuEntry::disabled("ch", "Switzerland"),
        MenuEntry::separator(),
        MenuEntry::title("Asia"),
        MenuEntry::item("jp", "Japan"),
        MenuEntry::item("np", "Nepal"),
    ]);
    let mut stack = OverlayStack::new();
    let mut field = SelectField::new("country", options, FieldConfig::default()).with_value("jp");

    let trigger = Rect::new(24.0, 520.0, 264.0, 552.0);
    let viewport = Size::new(1024.0, 600.0);
    field.open(&mut stack, Some(trigger), viewport);
    let placement = field.on_measured(Size::new(240.0, 8.0 * 32.0));
    println!(
        "opened at top {:.0}, max height {:.0}, flipped: {}",
        placement.top, placement.max_height, placement.flipped
    );
    render(&field);

    for key in [Key::Down, Key::Down, Key::Up] {
        let response = field.on_key(key, &mut stack);
        tracing::debug!(?key, handled = response.handled, selected = ?field.selected(), "key");
        println!("after {key:?}:");
        render(&field);
    }

    let filtered = field.set_filter("ne");
    tracing::debug!(changes = ?filtered.changes, visible = field.items().len(), "filter applied");
    println!("filter \"ne\":");
    render(&field);

    if let Some(commit) = field.on_key(Key::Enter, &mut stack).commit {
        tracing::info!(field = %commit.name, value = commit.value, "value committed");
        println!("onChange({:?}, {:?})", commit.name, commit.value);
    }
    println!("open overlays: {}", stack.depth());
}
