// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown select over a fixed option list.

use kurbo::{Rect, Size};
use overstory_nav::{Key, NavIntent, NavigableItemList, SelectionState};
use overstory_placement::{OverlayId, OverlayPlacement, OverlayStack};

use crate::config::FieldConfig;
use crate::overlay::OverlayHost;
use crate::response::{Commit, FieldChanges, FieldResponse, FieldStatus};

/// Controller of a select/dropdown field.
///
/// The field owns its options and an optional filter; the host renders
/// [`items`](Self::items), highlights [`selected`](Self::selected), and reports
/// each returned [`Commit`] to its change handler.
///
/// ```rust
/// use kurbo::{Rect, Size};
/// use overstory_field::{FieldConfig, SelectField};
/// use overstory_nav::{Key, MenuEntry, NavigableItemList};
/// use overstory_placement::OverlayStack;
///
/// let options = NavigableItemList::new(vec![
///     MenuEntry::item("nl", "Netherlands"),
///     MenuEntry::item("no", "Norway"),
/// ]);
/// let mut field = SelectField::new("country", options, FieldConfig::default());
/// let mut stack = OverlayStack::new();
///
/// field.open(&mut stack, Some(Rect::new(0.0, 0.0, 200.0, 32.0)), Size::new(800.0, 600.0));
/// field.on_key(Key::Down, &mut stack);
/// field.on_key(Key::Down, &mut stack);
/// let commit = field.on_key(Key::Enter, &mut stack).commit.unwrap();
/// assert_eq!((commit.name.as_str(), commit.value), ("country", "no"));
/// assert!(!field.is_open());
/// ```
#[derive(Clone, Debug)]
pub struct SelectField<K> {
    name: String,
    options: NavigableItemList<K>,
    items: NavigableItemList<K>,
    filter: String,
    value: Option<K>,
    selection: SelectionState<K>,
    overlay: OverlayHost,
}

impl<K: Clone + PartialEq> SelectField<K> {
    /// Creates a closed field with no value.
    pub fn new(name: impl Into<String>, options: NavigableItemList<K>, config: FieldConfig) -> Self {
        Self {
            name: name.into(),
            items: options.clone(),
            options,
            filter: String::new(),
            value: None,
            selection: SelectionState::new(),
            overlay: OverlayHost::new(&config),
        }
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: K) -> Self {
        self.value = Some(value);
        self
    }

    /// Name reported in commits.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> Option<&K> {
        self.value.as_ref()
    }

    /// Replaces the value without committing, as when the host's state changes.
    pub fn set_value(&mut self, value: Option<K>) {
        self.value = value;
    }

    /// Replaces the option source. The highlighted entry is kept if it survives.
    pub fn set_options(&mut self, options: NavigableItemList<K>) -> FieldResponse<K> {
        self.options = options;
        self.rebuild()
    }

    /// Opens the overlay below (or above) `reference`.
    ///
    /// The current value, if present, is highlighted and centred.
    pub fn open(
        &mut self,
        stack: &mut OverlayStack,
        reference: Option<Rect>,
        viewport: Size,
    ) -> FieldResponse<K> {
        if self.is_open() {
            return FieldResponse::ignored();
        }
        self.filter.clear();
        self.items = self.options.clone();
        self.selection.reset();
        self.overlay.open(stack, reference, viewport, self.items.len());
        tracing::debug!(field = %self.name, "select opened");
        let scroll = match &self.value {
            Some(value) => self.selection.select_key(value, &self.items),
            None => None,
        };
        let scroll = self.overlay.reveal(scroll);
        FieldResponse::changed(FieldChanges::OPENED | FieldChanges::ITEMS).with_scroll(scroll)
    }

    /// Closes the overlay, dropping the filter, highlight, and any pending blur-close.
    pub fn close(&mut self, stack: &mut OverlayStack) -> FieldResponse<K> {
        if !self.overlay.close(stack) {
            return FieldResponse::ignored();
        }
        tracing::debug!(field = %self.name, "select closed");
        self.selection.reset();
        self.filter.clear();
        self.items = self.options.clone();
        FieldResponse::changed(FieldChanges::CLOSED)
    }

    /// Opens if closed, closes if open.
    pub fn toggle(
        &mut self,
        stack: &mut OverlayStack,
        reference: Option<Rect>,
        viewport: Size,
    ) -> FieldResponse<K> {
        if self.is_open() {
            self.close(stack)
        } else {
            self.open(stack, reference, viewport)
        }
    }

    /// Completes placement with the overlay's rendered size.
    pub fn on_measured(&mut self, size: Size) -> OverlayPlacement {
        self.overlay.on_measured(size)
    }

    /// Recomputes placement after a window resize.
    pub fn on_viewport_resized(&mut self, viewport: Size) -> Option<OverlayPlacement> {
        self.overlay.on_viewport_resized(viewport)
    }

    /// Recomputes placement after the trigger moved.
    pub fn on_reference_moved(&mut self, reference: Option<Rect>) -> Option<OverlayPlacement> {
        self.overlay.set_reference(reference)
    }

    /// Filters the visible options by `text`.
    pub fn set_filter(&mut self, text: &str) -> FieldResponse<K> {
        if self.filter == text {
            return FieldResponse::ignored();
        }
        self.filter.clear();
        self.filter.push_str(text);
        self.rebuild()
    }

    /// Applies a key press while the field has focus.
    ///
    /// Keys are only consumed while the overlay is open. Escape is consumed only
    /// when this field's overlay is the topmost one.
    pub fn on_key(&mut self, key: Key, stack: &mut OverlayStack) -> FieldResponse<K> {
        if !self.is_open() {
            return FieldResponse::ignored();
        }
        if key == Key::Escape && !self.overlay.owns_escape(stack) {
            return FieldResponse::ignored();
        }
        let before = self.selection.index();
        let outcome = self.selection.handle_key(key, &self.items);
        match outcome.intent {
            NavIntent::Moved => {
                let scroll = self.overlay.reveal(outcome.scroll);
                let mut response = FieldResponse::ignored().handled().with_scroll(scroll);
                if self.selection.index() == before {
                    response.changes.remove(FieldChanges::SELECTION);
                }
                response
            }
            NavIntent::Close => self.close(stack).handled(),
            NavIntent::Submit => match self.selection.key().cloned() {
                Some(key) => self.commit(key, stack).handled(),
                None => FieldResponse::ignored().handled(),
            },
            NavIntent::PassThrough => FieldResponse::ignored(),
        }
    }

    /// Records that the field lost focus at `now`; the overlay closes after the blur delay.
    pub fn on_blur(&mut self, now: u64) {
        self.overlay.on_blur(now);
    }

    /// Records that focus returned to the field.
    pub fn on_focus(&mut self) {
        self.overlay.on_focus();
    }

    /// Records a pointer press on an overlay row, ahead of its click.
    pub fn on_item_pointer_down(&mut self) {
        self.overlay.on_pointer_down();
    }

    /// Commits the entry at `index` of [`items`](Self::items), if it is selectable.
    pub fn click_item(&mut self, index: usize, stack: &mut OverlayStack) -> FieldResponse<K> {
        if !self.is_open() || !self.items.is_selectable(index) {
            return FieldResponse::ignored();
        }
        match self.items.key_at(index).cloned() {
            Some(key) => self.commit(key, stack),
            None => FieldResponse::ignored(),
        }
    }

    /// Advances time; closes the overlay once a pending blur-close expires.
    pub fn tick(&mut self, now: u64, stack: &mut OverlayStack) -> FieldResponse<K> {
        if self.overlay.blur_expired(now) {
            return self.close(stack);
        }
        FieldResponse::ignored()
    }

    /// When [`tick`](Self::tick) next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.overlay.next_deadline()
    }

    /// Current placement, once measured.
    #[must_use]
    pub fn placement(&self) -> Option<&OverlayPlacement> {
        self.overlay.placement()
    }

    /// Visible entries.
    #[must_use]
    pub fn items(&self) -> &NavigableItemList<K> {
        &self.items
    }

    /// Index of the highlighted entry in [`items`](Self::items).
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selection.index()
    }

    /// Key of the highlighted entry.
    #[must_use]
    pub fn selected_key(&self) -> Option<&K> {
        self.selection.key()
    }

    /// Current filter text.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Scroll offset of the option list.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.overlay.scroll_offset()
    }

    /// Returns `true` while the overlay is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// Stack slot of the open overlay.
    #[must_use]
    pub fn overlay_id(&self) -> Option<OverlayId> {
        self.overlay.id()
    }

    /// Rendering snapshot.
    #[must_use]
    pub fn status(&self) -> FieldStatus {
        let mut status = self.overlay.status();
        status.set(FieldStatus::SELECTED, !self.selection.is_none());
        status
    }

    fn rebuild(&mut self) -> FieldResponse<K> {
        let before = self.selection.index();
        self.items = self.options.filtered(&self.filter);
        self.selection.retain_by_key(&self.items);
        self.overlay.set_rows(self.items.len());
        let mut changes = FieldChanges::ITEMS;
        if self.selection.index() != before {
            changes |= FieldChanges::SELECTION;
        }
        FieldResponse::changed(changes)
    }

    fn commit(&mut self, key: K, stack: &mut OverlayStack) -> FieldResponse<K> {
        tracing::debug!(field = %self.name, "select committed");
        self.value = Some(key.clone());
        let commit = Commit {
            name: self.name.clone(),
            value: key,
        };
        let mut response = self.close(stack).with_commit(commit);
        response.changes.remove(FieldChanges::SELECTION);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overstory_nav::{MenuEntry, ScrollAlign};

    fn fruit() -> NavigableItemList<&'static str> {
        NavigableItemList::new(vec![
            MenuEntry::title("Fruit"),
            MenuEntry::item("apple", "Apple"),
            MenuEntry::disabled("banana", "Banana"),
            MenuEntry::item("cherry", "Cherry"),
            MenuEntry::separator(),
            MenuEntry::title("Veg"),
            MenuEntry::item("carrot", "Carrot"),
            MenuEntry::item("leek", "Leek"),
        ])
    }

    fn trigger() -> Option<Rect> {
        Some(Rect::new(20.0, 100.0, 220.0, 132.0))
    }

    const VIEWPORT: Size = Size::new(800.0, 600.0);

    #[test]
    fn open_highlights_current_value_centered() {
        let mut stack = OverlayStack::new();
        let mut field = SelectField::new("f", fruit(), FieldConfig::default()).with_value("carrot");
        let response = field.open(&mut stack, trigger(), VIEWPORT);
        assert!(response.changes.contains(FieldChanges::OPENED));
        assert_eq!(field.selected_key(), Some(&"carrot"));
        assert_eq!(response.scroll.map(|s| s.align), Some(ScrollAlign::Center));
        assert!(field.status().contains(FieldStatus::MEASURING));

        let placement = field.on_measured(Size::new(200.0, 240.0));
        assert_eq!(placement.top, 136.0);
        assert!(!field.status().contains(FieldStatus::MEASURING));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn navigation_skips_titles_and_disabled_entries() {
        let mut stack = OverlayStack::new();
        let mut field = SelectField::new("f", fruit(), FieldConfig::default());
        field.open(&mut stack, trigger(), VIEWPORT);

        let first = field.on_key(Key::Down, &mut stack);
        assert!(first.handled);
        assert_eq!(field.selected_key(), Some(&"apple"));
        assert_eq!(first.scroll.map(|s| s.align), Some(ScrollAlign::Center));

        let second = field.on_key(Key::Down, &mut stack);
        assert_eq!(field.selected_key(), Some(&"cherry"));
        assert_eq!(second.scroll.map(|s| s.align), Some(ScrollAlign::Nearest));

        field.on_key(Key::Down, &mut stack);
        assert_eq!(field.selected_key(), Some(&"carrot"));
        field.on_key(Key::Up, &mut stack);
        field.on_key(Key::Up, &mut stack);
        field.on_key(Key::Up, &mut stack);
        assert_eq!(field.selected_key(), Some(&"leek"));
    }

    #[test]
    fn filter_keeps_highlight_by_key_or_clears_it() {
        let mut stack = OverlayStack::new();
        let mut field = SelectField::new("f", fruit(), FieldConfig::default());
        field.open(&mut stack, trigger(), VIEWPORT);
        field.on_key(Key::End, &mut stack);
        assert_eq!(field.selected_key(), Some(&"leek"));

        field.set_filter("e");
        assert_eq!(field.selected_key(), Some(&"leek"));
        assert_eq!(field.items().key_at(field.selected().unwrap()), Some(&"leek"));

        let response = field.set_filter("ch");
        assert!(response.changes.contains(FieldChanges::SELECTION));
        assert_eq!(field.selected(), None);
        assert_eq!(field.items().selectable_count(), 1);
    }

    #[test]
    fn enter_commits_and_closes_and_resets() {
        let mut stack = OverlayStack::new();
        let mut field = SelectField::new("fruit", fruit(), FieldConfig::default());
        field.open(&mut stack, trigger(), VIEWPORT);
        field.set_filter("che");
        field.on_key(Key::Down, &mut stack);

        let response = field.on_key(Key::Enter, &mut stack);
        assert!(response.handled);
        assert!(response.closed());
        assert_eq!(
            response.commit,
            Some(Commit {
                name: "fruit".to_owned(),
                value: "cherry"
            })
        );
        assert_eq!(field.value(), Some(&"cherry"));
        assert_eq!(field.filter(), "");
        assert_eq!(field.selected(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn enter_with_nothing_highlighted_does_nothing() {
        let mut stack = OverlayStack::new();
        let mut field = SelectField::new("f", fruit(), FieldConfig::default());
        field.open(&mut stack, trigger(), VIEWPORT);
        let response = field.on_key(Key::Enter, &mut stack);
        assert!(response.handled);
        assert!(response.commit.is_none());
        assert!(field.is_open());
    }

    #[test]
    fn escape_closes_only_topmost_overlay() {
        let mut stack = OverlayStack::new();
        let mut outer = SelectField::new("outer", fruit(), FieldConfig::default());
        let mut inner = SelectField::new("inner", fruit(), FieldConfig::default());
        outer.open(&mut stack, trigger(), VIEWPORT);
        inner.open(&mut stack, trigger(), VIEWPORT);

        assert!(!outer.on_key(Key::Escape, &mut stack).handled);
        assert!(outer.is_open());

        let response = inner.on_key(Key::Escape, &mut stack);
        assert!(response.handled && response.closed());
        assert!(outer.on_key(Key::Escape, &mut stack).closed());
        assert!(stack.is_empty());
    }

    #[test]
    fn click_between_blur_and_close_wins() {
        let mut stack = OverlayStack::new();
        let mut field = SelectField::new("f", fruit(), FieldConfig::default());
        field.open(&mut stack, trigger(), VIEWPORT);

        field.on_blur(1000);
        assert!(field.status().contains(FieldStatus::CLOSE_PENDING));
        field.on_item_pointer_down();
        assert!(!field.tick(1500, &mut stack).closed());

        let response = field.click_item(3, &mut stack);
        assert_eq!(response.commit.map(|c| c.value), Some("cherry"));
        assert!(!field.is_open());
    }

    #[test]
    fn blur_without_click_closes_after_delay() {
        let mut stack = OverlayStack::new();
        let mut field = SelectField::new("f", fruit(), FieldConfig::default());
        field.open(&mut stack, trigger(), VIEWPORT);
        field.on_blur(1000);
        assert_eq!(field.next_deadline(), Some(1200));
        assert!(!field.tick(1199, &mut stack).closed());
        assert!(field.tick(1200, &mut stack).closed());
        assert!(stack.is_empty());
    }

    #[test]
    fn disabled_and_heading_clicks_are_ignored() {
        let mut stack = OverlayStack::new();
        let mut field = SelectField::new("f", fruit(), FieldConfig::default());
        field.open(&mut stack, trigger(), VIEWPORT);
        assert!(field.click_item(0, &mut stack).commit.is_none());
        assert!(field.click_item(2, &mut stack).commit.is_none());
        assert!(field.is_open());
    }

    #[test]
    fn keys_pass_through_while_closed() {
        let mut stack = OverlayStack::new();
        let mut field = SelectField::new("f", fruit(), FieldConfig::default());
        assert_eq!(field.on_key(Key::Down, &mut stack), FieldResponse::ignored());
        assert!(field.close(&mut stack).changes.is_empty());
    }

    #[test]
    fn long_list_scrolls_selection_into_view() {
        let mut stack = OverlayStack::new();
        let entries = (0..40).map(|i| MenuEntry::item(i, format!("Row {i}"))).collect();
        let config = FieldConfig::default().with_row_extent(20.0);
        let mut field = SelectField::new("rows", entries, config);
        field.open(&mut stack, trigger(), VIEWPORT);
        field.on_measured(Size::new(200.0, 800.0));

        field.on_key(Key::End, &mut stack);
        let max_offset = 40.0 * 20.0 - field.placement().unwrap().max_height;
        assert_eq!(field.scroll_offset(), max_offset);
    }
}
