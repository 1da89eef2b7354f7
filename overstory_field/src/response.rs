// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use overstory_nav::ScrollRequest;

bitflags::bitflags! {
    /// Snapshot of a field's overlay state, for rendering.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FieldStatus: u8 {
        /// The overlay is open.
        const OPEN          = 0b0000_0001;
        /// The overlay is open but still needs its measuring render pass.
        const MEASURING     = 0b0000_0010;
        /// A suggestion fetch is in flight.
        const SEARCHING     = 0b0000_0100;
        /// Focus left the input; the overlay closes unless it comes back.
        const CLOSE_PENDING = 0b0000_1000;
        /// Some entry is highlighted.
        const SELECTED      = 0b0001_0000;
    }
}

bitflags::bitflags! {
    /// What an event changed, so hosts know what to re-render.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FieldChanges: u8 {
        /// The overlay opened.
        const OPENED    = 0b0000_0001;
        /// The overlay closed.
        const CLOSED    = 0b0000_0010;
        /// The highlighted entry changed.
        const SELECTION = 0b0000_0100;
        /// The visible entries changed.
        const ITEMS     = 0b0000_1000;
        /// A value was committed.
        const COMMITTED = 0b0001_0000;
    }
}

/// A value chosen by the user, to be reported as `onChange(name, value)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit<V> {
    /// Name of the field.
    pub name: String,
    /// Chosen value.
    pub value: V,
}

/// Value committed by an [`AutosuggestField`](crate::AutosuggestField).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Choice<K> {
    /// An existing suggestion.
    Existing(K),
    /// Typed text to be created as a new value.
    Create(String),
}

/// Result of feeding an event to a field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldResponse<V> {
    /// When `true` the host must prevent the event's default action.
    pub handled: bool,
    /// Row to bring into view.
    pub scroll: Option<ScrollRequest>,
    /// Value to report to the host's change handler.
    pub commit: Option<Commit<V>>,
    /// What changed.
    pub changes: FieldChanges,
}

impl<V> Default for FieldResponse<V> {
    fn default() -> Self {
        Self {
            handled: false,
            scroll: None,
            commit: None,
            changes: FieldChanges::empty(),
        }
    }
}

impl<V> FieldResponse<V> {
    /// A response for an event the field ignored.
    #[must_use]
    pub fn ignored() -> Self {
        Self::default()
    }

    pub(crate) fn changed(changes: FieldChanges) -> Self {
        Self {
            changes,
            ..Self::default()
        }
    }

    pub(crate) fn handled(mut self) -> Self {
        self.handled = true;
        self
    }

    pub(crate) fn with_scroll(mut self, scroll: Option<ScrollRequest>) -> Self {
        if scroll.is_some() {
            self.changes |= FieldChanges::SELECTION;
        }
        self.scroll = scroll;
        self
    }

    pub(crate) fn with_commit(mut self, commit: Commit<V>) -> Self {
        self.changes |= FieldChanges::COMMITTED;
        self.commit = Some(commit);
        self
    }

    /// Returns `true` if the overlay closed.
    #[must_use]
    pub fn closed(&self) -> bool {
        self.changes.contains(FieldChanges::CLOSED)
    }
}
