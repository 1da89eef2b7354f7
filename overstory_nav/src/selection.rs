// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key-stable selection over a [`NavigableItemList`].

use crate::key::{Key, Travel};
use crate::list::NavigableItemList;
use crate::navigate::{NavIntent, NavOutcome, ScrollRequest, navigate};
use crate::scroll::ScrollAlign;

/// The highlighted entry of an open overlay.
///
/// Stores both the index into the current list and the key of the entry at that
/// index. When the list is rebuilt (for example after a filter keystroke or
/// when suggestions arrive) [`retain_by_key`](Self::retain_by_key) looks the key
/// up again, so the same *entry* stays selected even if it moved. If it is gone,
/// the selection becomes "none" rather than falling back to the first entry.
///
/// Every change goes through a method that returns what happened; hosts read
/// [`index`](Self::index)/[`key`](Self::key) when rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionState<K> {
    index: Option<usize>,
    key: Option<K>,
    /// Whether a scroll request has been emitted since the last reset.
    revealed: bool,
}

impl<K> Default for SelectionState<K> {
    fn default() -> Self {
        Self {
            index: None,
            key: None,
            revealed: false,
        }
    }
}

impl<K: Clone + PartialEq> SelectionState<K> {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected index, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Key of the selected entry, if any.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.index.is_none()
    }

    /// Clears the selection, as on open and close.
    pub fn reset(&mut self) {
        self.index = None;
        self.key = None;
        self.revealed = false;
    }

    /// Selects `index` if it is selectable; otherwise clears the selection.
    ///
    /// Returns a scroll request for the newly selected entry.
    pub fn select_index(
        &mut self,
        index: usize,
        list: &NavigableItemList<K>,
    ) -> Option<ScrollRequest> {
        if !list.is_selectable(index) {
            self.clear_keep_reveal();
            return None;
        }
        self.set(Some(index), list);
        Some(self.reveal(index))
    }

    /// Selects the entry with `key`, such as the field's current value on open.
    pub fn select_key(&mut self, key: &K, list: &NavigableItemList<K>) -> Option<ScrollRequest> {
        match list.position_of(key) {
            Some(index) => self.select_index(index, list),
            None => {
                self.clear_keep_reveal();
                None
            }
        }
    }

    /// Re-derives the index after `list` was rebuilt.
    ///
    /// Returns the new index, or `None` if the previously selected entry is no
    /// longer present (or no longer selectable).
    pub fn retain_by_key(&mut self, list: &NavigableItemList<K>) -> Option<usize> {
        let index = self
            .key
            .as_ref()
            .and_then(|k| list.position_of(k))
            .filter(|&i| list.is_selectable(i));
        if index.is_none() && self.key.is_some() {
            tracing::trace!("selected entry filtered out; selection cleared");
        }
        self.set(index, list);
        index
    }

    /// Applies a key press.
    ///
    /// Movement keys step past separators, titles, and disabled entries in the
    /// direction of travel, wrapping around. If nothing in the list is
    /// selectable, movement keys are passed through.
    pub fn handle_key(&mut self, key: Key, list: &NavigableItemList<K>) -> NavOutcome {
        let count = list.len();
        let mut outcome = navigate(key, self.index, count);
        if outcome.intent != NavIntent::Moved {
            return outcome;
        }
        let (Some(target), Some(travel)) = (outcome.selected, key.travel()) else {
            return outcome;
        };
        let Some(index) = next_selectable(list, target, travel) else {
            return NavOutcome::pass_through(self.index);
        };
        self.set(Some(index), list);
        let align = if self.revealed {
            ScrollAlign::Nearest
        } else {
            ScrollAlign::Center
        };
        self.revealed = true;
        outcome.selected = Some(index);
        outcome.scroll = Some(ScrollRequest { index, align });
        outcome
    }

    fn set(&mut self, index: Option<usize>, list: &NavigableItemList<K>) {
        self.index = index;
        self.key = index.and_then(|i| list.key_at(i)).cloned();
    }

    fn clear_keep_reveal(&mut self) {
        self.index = None;
        self.key = None;
    }

    fn reveal(&mut self, index: usize) -> ScrollRequest {
        let align = if self.revealed {
            ScrollAlign::Nearest
        } else {
            ScrollAlign::Center
        };
        self.revealed = true;
        ScrollRequest { index, align }
    }
}

/// First selectable index at or after `start` in the direction of travel, wrapping.
fn next_selectable<K>(list: &NavigableItemList<K>, start: usize, travel: Travel) -> Option<usize> {
    let count = list.len();
    if count == 0 {
        return None;
    }
    let mut i = start % count;
    for _ in 0..count {
        if list.is_selectable(i) {
            return Some(i);
        }
        i = match travel {
            Travel::Forward => (i + 1) % count,
            Travel::Backward => (i + count - 1) % count,
        };
    }
    None
}
