// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordering of simultaneously open overlays.

use smallvec::SmallVec;

/// Handle for an overlay registered in an [`OverlayStack`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u32);

/// The set of currently open overlays, most recently opened last.
///
/// Dialogs, menus, and dropdowns can nest (a select inside a dialog, a submenu
/// inside a menu). Only the topmost overlay should react to Escape or to an
/// outside click. The stack is an ordinary value owned by whichever object
/// coordinates a window's overlays and passed down to the fields that open
/// them, so independent windows or test fixtures never see each other's state.
///
/// ```rust
/// use overstory_placement::OverlayStack;
///
/// let mut stack = OverlayStack::new();
/// let dialog = stack.push();
/// let menu = stack.push();
/// assert_eq!(stack.escape_target(), Some(menu));
///
/// stack.remove(menu);
/// assert!(stack.is_topmost(dialog));
/// ```
#[derive(Clone, Debug, Default)]
pub struct OverlayStack {
    next: u32,
    open: SmallVec<[OverlayId; 4]>,
}

impl OverlayStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly opened overlay on top of the stack.
    pub fn push(&mut self) -> OverlayId {
        let id = OverlayId(self.next);
        self.next = self.next.wrapping_add(1);
        self.open.push(id);
        id
    }

    /// Removes an overlay wherever it sits in the stack.
    ///
    /// Returns `false` if it was not open.
    pub fn remove(&mut self, id: OverlayId) -> bool {
        match self.open.iter().position(|&o| o == id) {
            Some(pos) => {
                self.open.remove(pos);
                true
            }
            None => false,
        }
    }

    /// The most recently opened overlay still open.
    #[must_use]
    pub fn top(&self) -> Option<OverlayId> {
        self.open.last().copied()
    }

    /// The overlay that should handle an Escape press.
    #[must_use]
    pub fn escape_target(&self) -> Option<OverlayId> {
        self.top()
    }

    /// Returns `true` if `id` is the topmost open overlay.
    #[must_use]
    pub fn is_topmost(&self, id: OverlayId) -> bool {
        self.top() == Some(id)
    }

    /// Returns `true` if `id` is open.
    #[must_use]
    pub fn contains(&self, id: OverlayId) -> bool {
        self.open.contains(&id)
    }

    /// Number of open overlays.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Returns `true` if nothing is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Forgets every open overlay.
    pub fn clear(&mut self) {
        self.open.clear();
    }
}
