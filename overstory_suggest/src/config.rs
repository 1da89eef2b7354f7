// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Tunables for [`SuggestionFetcher`](crate::SuggestionFetcher).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SuggestConfig {
    /// Quiet period after the last keystroke before fetching (milliseconds).
    pub debounce_ms: u64,
    /// Minimum query length, in characters, worth fetching for.
    pub min_query_chars: usize,
    /// Cap on the number of suggestions kept from one response.
    pub max_results: Option<usize>,
}

impl SuggestConfig {
    /// Returns a copy with a different debounce window.
    #[must_use]
    pub fn with_debounce(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Returns a copy with a different minimum query length.
    #[must_use]
    pub fn with_min_query_chars(mut self, min_query_chars: usize) -> Self {
        self.min_query_chars = min_query_chars;
        self
    }

    /// Returns a copy that keeps at most `max_results` suggestions.
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            min_query_chars: 2,
            max_results: None,
        }
    }
}
