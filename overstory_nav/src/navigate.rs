// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pure key → index step function.

use crate::key::Key;
use crate::scroll::ScrollAlign;

/// How far PageUp and PageDown jump.
pub const PAGE_STEP: usize = 5;

/// What a key press asked the host to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavIntent {
    /// The selection moved.
    Moved,
    /// Close the overlay. The selection is unchanged.
    Close,
    /// Submit the current selection (which may be none). The selection is unchanged.
    Submit,
    /// Not a navigation key; let the host handle it normally.
    PassThrough,
}

/// Index the host should bring into view, and how.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScrollRequest {
    /// Row to reveal.
    pub index: usize,
    /// Alignment to reveal it with.
    pub align: ScrollAlign,
}

/// Result of feeding one key to [`navigate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NavOutcome {
    /// Selection after the key.
    pub selected: Option<usize>,
    /// When `true` the host must prevent the key's default action.
    pub handled: bool,
    /// What the key asked for.
    pub intent: NavIntent,
    /// Present when the selection moved and should be scrolled into view.
    pub scroll: Option<ScrollRequest>,
}

impl NavOutcome {
    pub(crate) const fn pass_through(selected: Option<usize>) -> Self {
        Self {
            selected,
            handled: false,
            intent: NavIntent::PassThrough,
            scroll: None,
        }
    }

    const fn signal(selected: Option<usize>, intent: NavIntent) -> Self {
        Self {
            selected,
            handled: true,
            intent,
            scroll: None,
        }
    }

    pub(crate) const fn moved(index: usize, align: ScrollAlign) -> Self {
        Self {
            selected: Some(index),
            handled: true,
            intent: NavIntent::Moved,
            scroll: Some(ScrollRequest { index, align }),
        }
    }
}

/// Maps a key press to a new selection over `count` items.
///
/// - Up/Left and Down/Right step by one and wrap around. From "nothing selected",
///   Down selects the first item and Up the last.
/// - Home selects the first item, End the last.
/// - PageUp and PageDown jump by [`PAGE_STEP`]. Jumping before the start lands on the
///   last item; jumping past the end lands on the first. "Nothing selected" counts as
///   the position just before the first item.
/// - Escape and Enter are handled but leave the selection alone.
/// - Tab, modifier keys, and anything else are passed through.
///
/// With `count == 0` movement keys are passed through and nothing is selected.
/// A `selected` index that is out of range is treated as nothing selected.
///
/// The scroll hint is [`ScrollAlign::Center`] when moving from nothing selected and
/// [`ScrollAlign::Nearest`] otherwise.
#[must_use]
pub fn navigate(key: Key, selected: Option<usize>, count: usize) -> NavOutcome {
    let selected = selected.filter(|&i| i < count);
    let next = match key {
        Key::Escape => return NavOutcome::signal(selected, NavIntent::Close),
        Key::Enter => return NavOutcome::signal(selected, NavIntent::Submit),
        _ if count == 0 => return NavOutcome::pass_through(None),
        Key::Up | Key::Left => match selected {
            Some(i) => (i + count - 1) % count,
            None => count - 1,
        },
        Key::Down | Key::Right => match selected {
            Some(i) => (i + 1) % count,
            None => 0,
        },
        Key::Home => 0,
        Key::End => count - 1,
        Key::PageUp => match selected {
            Some(i) if i >= PAGE_STEP => i - PAGE_STEP,
            _ => count - 1,
        },
        Key::PageDown => {
            let target = selected.map_or(PAGE_STEP - 1, |i| i + PAGE_STEP);
            if target >= count { 0 } else { target }
        }
        Key::Tab
        | Key::Shift
        | Key::Control
        | Key::Meta
        | Key::Alt
        | Key::Other => return NavOutcome::pass_through(selected),
    };
    let align = if selected.is_some() {
        ScrollAlign::Nearest
    } else {
        ScrollAlign::Center
    };
    NavOutcome::moved(next, align)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_wrap_in_both_directions() {
        assert_eq!(navigate(Key::Down, Some(4), 5).selected, Some(0));
        assert_eq!(navigate(Key::Up, Some(0), 5).selected, Some(4));
        assert_eq!(navigate(Key::Right, Some(1), 5).selected, Some(2));
        assert_eq!(navigate(Key::Left, Some(1), 5).selected, Some(0));
    }

    #[test]
    fn first_move_from_none() {
        let down = navigate(Key::Down, None, 5);
        assert_eq!(down.selected, Some(0));
        assert_eq!(
            down.scroll,
            Some(ScrollRequest {
                index: 0,
                align: ScrollAlign::Center
            })
        );
        assert_eq!(navigate(Key::Up, None, 5).selected, Some(4));
        let next = navigate(Key::Down, Some(0), 5);
        assert_eq!(next.scroll.map(|s| s.align), Some(ScrollAlign::Nearest));
    }

    #[test]
    fn home_end_and_paging() {
        assert_eq!(navigate(Key::Home, Some(7), 10).selected, Some(0));
        assert_eq!(navigate(Key::End, Some(2), 10).selected, Some(9));
        assert_eq!(navigate(Key::PageDown, Some(2), 10).selected, Some(7));
        assert_eq!(navigate(Key::PageDown, Some(5), 10).selected, Some(0));
        assert_eq!(navigate(Key::PageUp, Some(7), 10).selected, Some(2));
        assert_eq!(navigate(Key::PageUp, Some(4), 10).selected, Some(9));
        assert_eq!(navigate(Key::PageDown, None, 10).selected, Some(4));
        assert_eq!(navigate(Key::PageDown, None, 3).selected, Some(0));
        assert_eq!(navigate(Key::PageUp, None, 10).selected, Some(9));
    }

    #[test]
    fn escape_and_enter_signal_without_moving() {
        let esc = navigate(Key::Escape, Some(3), 5);
        assert_eq!(esc.intent, NavIntent::Close);
        assert!(esc.handled);
        assert_eq!(esc.selected, Some(3));

        let enter = navigate(Key::Enter, None, 5);
        assert_eq!(enter.intent, NavIntent::Submit);
        assert!(enter.handled);
        assert_eq!(enter.selected, None);
        assert_eq!(enter.scroll, None);
    }

    #[test]
    fn tab_and_modifiers_pass_through() {
        for key in [Key::Tab, Key::Shift, Key::Control, Key::Meta, Key::Alt, Key::Other] {
            let outcome = navigate(key, Some(1), 5);
            assert!(!outcome.handled, "{key:?}");
            assert_eq!(outcome.intent, NavIntent::PassThrough);
            assert_eq!(outcome.selected, Some(1));
        }
    }

    #[test]
    fn empty_list_is_a_no_op() {
        for key in [
            Key::Up,
            Key::Down,
            Key::Left,
            Key::Right,
            Key::Home,
            Key::End,
            Key::PageUp,
            Key::PageDown,
        ] {
            let outcome = navigate(key, None, 0);
            assert!(!outcome.handled, "{key:?}");
            assert_eq!(outcome.selected, None);
        }
        assert_eq!(navigate(Key::Enter, Some(2), 0).selected, None);
    }

    #[test]
    fn stale_index_is_treated_as_none() {
        assert_eq!(navigate(Key::Down, Some(9), 3).selected, Some(0));
        assert_eq!(navigate(Key::Escape, Some(9), 3).selected, None);
    }
}
