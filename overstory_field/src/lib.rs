// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Field: select and autosuggest controllers.
//!
//! This crate composes the other Overstory crates into the two field kinds most
//! overlay-bearing forms need:
//!
//! - [`SelectField`] owns a fixed [`NavigableItemList`](overstory_nav::NavigableItemList)
//!   of options with an optional text filter.
//! - [`AutosuggestField`] owns a [`SuggestionFetcher`](overstory_suggest::SuggestionFetcher)
//!   and the keys chosen so far.
//!
//! Both share the same overlay lifecycle: open registers the overlay on the host's
//! [`OverlayStack`](overstory_placement::OverlayStack) and starts the two-pass
//! placement; key presses move a key-stable selection and return what changed in a
//! [`FieldResponse`]; losing focus closes after a short delay unless the user
//! pressed an overlay row; closing synchronously resets the selection, filter, and
//! timers, and makes any in-flight fetch stale.
//!
//! Nothing here renders. A chosen value comes back as a [`Commit`] carrying the
//! field's name, for the host's `onChange(name, value)`.
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use overstory_field::{AutosuggestField, Choice, FieldConfig};
//! use overstory_nav::Key;
//! use overstory_placement::OverlayStack;
//! use overstory_suggest::{SuggestConfig, SuggestItem};
//!
//! let mut stack = OverlayStack::new();
//! let mut field: AutosuggestField<u32> =
//!     AutosuggestField::new("assignee", FieldConfig::default(), SuggestConfig::default());
//! field.open(&mut stack, Some(Rect::new(0.0, 0.0, 240.0, 32.0)), Size::new(1024.0, 768.0));
//!
//! field.on_input("ann", 0);
//! let request = field.poll(500).expect("debounced");
//! field.on_response(request.token, Ok(vec![SuggestItem::new(9, "Ann Lee")]));
//!
//! field.on_key(Key::Down, &mut stack);
//! let commit = field.on_key(Key::Enter, &mut stack).commit.expect("committed");
//! assert_eq!(commit.value, Choice::Existing(9));
//! assert!(stack.is_empty());
//! ```

mod autosuggest;
mod config;
mod overlay;
mod response;
mod select;
pub mod translate;

pub use autosuggest::AutosuggestField;
pub use config::FieldConfig;
pub use response::{Choice, Commit, FieldChanges, FieldResponse, FieldStatus};
pub use select::SelectField;
pub use translate::Translate;
