// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Nav: keyboard navigation primitives for menus, selects, and suggestion lists.
//!
//! This crate models list navigation as a combination of:
//! - **Keys** ([`Key`]) decoded from host key codes or key names, with modifier-only
//!   keys and Tab recognised so they can be passed through untouched.
//! - A **pure step function** ([`navigate`]) mapping a key, the current selection, and an
//!   item count to a [`NavOutcome`]: the new index, whether the host must prevent the
//!   key's default action, and what the key asked for ([`NavIntent`]).
//! - A **typed entry list** ([`NavigableItemList`]) built from tagged [`MenuEntry`]
//!   variants (items, separators, titles) rather than by walking a component tree.
//! - A **key-stable selection** ([`SelectionState`]) that follows the selected entry's
//!   key across list rebuilds instead of its numeric index.
//! - A **scroll helper** ([`ListViewport`]) that brings the selected row into view with
//!   [`ScrollAlign::Center`] on the first selection and [`ScrollAlign::Nearest`] after.
//!
//! ## Minimal example
//!
//! ```rust
//! use overstory_nav::{Key, MenuEntry, NavIntent, NavigableItemList, SelectionState};
//!
//! let list = NavigableItemList::new(vec![
//!     MenuEntry::item("apple", "Apple"),
//!     MenuEntry::separator(),
//!     MenuEntry::item("banana", "Banana"),
//! ]);
//! let mut selection = SelectionState::new();
//!
//! // Down from "nothing selected" lands on the first item…
//! let outcome = selection.handle_key(Key::Down, &list);
//! assert!(outcome.handled);
//! assert_eq!(selection.key(), Some(&"apple"));
//!
//! // …and the separator is skipped on the way to the next one.
//! selection.handle_key(Key::Down, &list);
//! assert_eq!(selection.index(), Some(2));
//!
//! // Enter asks the host to submit; it does not move the selection.
//! let outcome = selection.handle_key(Key::Enter, &list);
//! assert_eq!(outcome.intent, NavIntent::Submit);
//! assert_eq!(outcome.selected, Some(2));
//! ```
//!
//! "Nothing selected" is a distinct state from "first item selected": hosts commonly
//! treat Enter differently in each case, so rebuilding the list never silently
//! selects index `0`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod key;
mod list;
mod navigate;
mod scroll;
mod selection;

pub use key::{Key, Travel};
pub use list::{ItemRole, MenuEntry, NavigableItemList};
pub use navigate::{NavIntent, NavOutcome, PAGE_STEP, ScrollRequest, navigate};
pub use scroll::{ListViewport, ScrollAlign};
pub use selection::SelectionState;
