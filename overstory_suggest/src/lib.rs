// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Suggest: debounced suggestion fetching that never shows stale results.
//!
//! An autosuggest input must not call the network on every keystroke, and a slow
//! response for an old query must never overwrite the results of a newer one.
//! This crate splits that job in two:
//!
//! - [`SuggestionFetcher`] is a sans-IO state machine driven by the host's event
//!   loop. It debounces keystrokes on a logical clock, issues [`SuggestionRequest`]s
//!   tagged with monotonically increasing [`RequestToken`]s, and only applies the
//!   response whose token matches the latest issued request.
//! - [`FetchDispatcher`] runs the host's async fetch function on a tokio runtime,
//!   waits on the fetcher's debounce deadline, and feeds responses back. Dropping it
//!   cancels everything still in flight.
//!
//! ## Minimal example
//!
//! ```rust
//! use overstory_suggest::{SuggestConfig, SuggestItem, SuggestionFetcher};
//!
//! let mut fetcher: SuggestionFetcher<u32> = SuggestionFetcher::new(SuggestConfig::default());
//!
//! // The user types; nothing is fetched until the 500ms window passes quietly.
//! fetcher.on_input("jo", 0);
//! fetcher.on_input("john", 150);
//! assert!(fetcher.poll(600).is_none());
//! let request = fetcher.poll(650).expect("debounce window elapsed");
//! assert_eq!(request.query, "john");
//! assert!(fetcher.is_searching());
//!
//! // The host performs the fetch and hands the result back.
//! let items = vec![SuggestItem::new(1, "John Smith")];
//! fetcher.on_response(request.token, Ok(items));
//! assert_eq!(fetcher.suggestions().len(), 1);
//! assert!(!fetcher.is_searching());
//! ```
//!
//! ## Rules
//!
//! 1. Text of fewer than [`SuggestConfig::min_query_chars`] characters clears the
//!    suggestions and cancels any pending fetch.
//! 2. Each keystroke restarts the debounce window.
//! 3. Results exclude keys the host marked as already chosen and carry a
//!    [`Highlight`] of the first case-insensitive match of the query.
//! 4. A newer keystroke or [`SuggestionFetcher::close`] makes every in-flight
//!    response stale; stale responses change nothing.
//! 5. Fetch failures are logged and shown as an empty result, never surfaced as errors.

mod config;
mod dispatcher;
mod fetcher;
mod highlight;

pub use config::SuggestConfig;
pub use dispatcher::{DispatchEvent, FetchDispatcher, FetchResponse};
pub use fetcher::{
    FetchError, InputEffect, RequestToken, ResponseOutcome, SuggestItem, SuggestParams,
    Suggestion, SuggestionFetcher, SuggestionRequest,
};
pub use highlight::{Highlight, Segment, find_ignore_case};
