// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sans-IO debounce / staleness state machine.

use core::hash::Hash;

use hashbrown::HashSet;
use overstory_event_state::timer::DeadlineTimer;

use crate::config::SuggestConfig;
use crate::highlight::Highlight;

/// A suggestion as returned by the host's fetch function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestItem<K> {
    /// Stable identity.
    pub id: K,
    /// Display text.
    pub title: String,
}

impl<K> SuggestItem<K> {
    /// Creates an item.
    pub fn new(id: K, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A suggestion ready to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion<K> {
    /// The fetched item.
    pub item: SuggestItem<K>,
    /// Where the query matched the title.
    pub highlight: Highlight,
}

/// Why a fetch produced no usable result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The fetch failed (network error, server error, …).
    #[error("suggestion fetch failed: {0}")]
    Rejected(String),
    /// The response could not be decoded as a list of items.
    #[error("malformed suggestion response: {0}")]
    Malformed(String),
}

/// Identifies one issued fetch. Later requests have larger tokens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Parameters passed to the host's fetch function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestParams {
    /// Text to search for.
    pub query: String,
    /// Upper bound on useful results, if configured.
    pub limit: Option<usize>,
}

/// A fetch the host should perform now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionRequest {
    /// Text to search for.
    pub query: String,
    /// Token to hand back with the response.
    pub token: RequestToken,
    /// Upper bound on useful results, if configured.
    pub limit: Option<usize>,
}

impl SuggestionRequest {
    /// Parameters for the fetch function.
    #[must_use]
    pub fn params(&self) -> SuggestParams {
        SuggestParams {
            query: self.query.clone(),
            limit: self.limit,
        }
    }
}

/// What a keystroke did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEffect {
    /// The text is too short; suggestions were cleared.
    Cleared,
    /// A fetch is scheduled for the given time.
    Scheduled {
        /// When [`SuggestionFetcher::poll`] will issue the request.
        deadline: u64,
    },
}

/// What happened to a response.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The suggestions were replaced; holds how many are visible.
    Applied(usize),
    /// The response belonged to a superseded request and was dropped.
    Stale,
    /// The fetch failed; suggestions were cleared.
    Failed,
}

/// Debounces text input into fetch requests and applies only the latest response.
///
/// See the [crate docs](crate) for the rules.
#[derive(Clone, Debug)]
pub struct SuggestionFetcher<K> {
    config: SuggestConfig,
    timer: DeadlineTimer,
    text: String,
    next_token: u64,
    /// Request whose response is still awaited and still relevant.
    in_flight: Option<(RequestToken, String)>,
    suggestions: Vec<Suggestion<K>>,
    excluded: HashSet<K>,
}

impl<K: Clone + Eq + Hash> SuggestionFetcher<K> {
    /// Creates an idle fetcher.
    #[must_use]
    pub fn new(config: SuggestConfig) -> Self {
        Self {
            config,
            timer: DeadlineTimer::new(),
            text: String::new(),
            next_token: 0,
            in_flight: None,
            suggestions: Vec::new(),
            excluded: HashSet::new(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    /// Records the input's new text at time `now`.
    ///
    /// Any in-flight request becomes stale.
    pub fn on_input(&mut self, text: &str, now: u64) -> InputEffect {
        self.text.clear();
        self.text.push_str(text);
        self.invalidate_in_flight();

        if text.trim().chars().count() < self.config.min_query_chars {
            self.timer.cancel();
            self.suggestions.clear();
            return InputEffect::Cleared;
        }
        self.timer.arm(now, self.config.debounce_ms);
        InputEffect::Scheduled {
            deadline: now.saturating_add(self.config.debounce_ms),
        }
    }

    /// Issues the pending request if the debounce window has elapsed by `now`.
    pub fn poll(&mut self, now: u64) -> Option<SuggestionRequest> {
        self.timer.poll(now)?;
        self.next_token = self.next_token.wrapping_add(1);
        let token = RequestToken(self.next_token);
        let query = self.text.trim().to_owned();
        tracing::debug!(query = %query, token = token.0, "issuing suggestion fetch");
        self.in_flight = Some((token, query.clone()));
        Some(SuggestionRequest {
            query,
            token,
            limit: self.config.max_results,
        })
    }

    /// Applies a fetch result if `token` is the latest relevant request.
    pub fn on_response(
        &mut self,
        token: RequestToken,
        result: Result<Vec<SuggestItem<K>>, FetchError>,
    ) -> ResponseOutcome {
        let query = match self.in_flight.take() {
            Some((current, query)) if current == token => query,
            other => {
                self.in_flight = other;
                tracing::trace!(token = token.0, "discarding stale suggestion response");
                return ResponseOutcome::Stale;
            }
        };

        match result {
            Ok(items) => {
                let limit = self.config.max_results.unwrap_or(usize::MAX);
                let excluded = &self.excluded;
                self.suggestions = items
                    .into_iter()
                    .filter(|item| !excluded.contains(&item.id))
                    .take(limit)
                    .map(|item| Suggestion {
                        highlight: Highlight::new(&item.title, &query),
                        item,
                    })
                    .collect();
                ResponseOutcome::Applied(self.suggestions.len())
            }
            Err(err) => {
                tracing::warn!(%err, query = %query, "suggestion fetch failed");
                self.suggestions.clear();
                ResponseOutcome::Failed
            }
        }
    }

    /// Drops pending and in-flight work and clears suggestions, as when the overlay closes.
    pub fn close(&mut self) {
        self.timer.cancel();
        self.invalidate_in_flight();
        self.suggestions.clear();
        self.text.clear();
    }

    /// Marks a key as already chosen so it is left out of future results.
    ///
    /// Also removes it from the visible suggestions.
    pub fn exclude(&mut self, key: K) {
        self.suggestions.retain(|s| s.item.id != key);
        self.excluded.insert(key);
    }

    /// Makes a previously excluded key eligible again.
    pub fn include(&mut self, key: &K) -> bool {
        self.excluded.remove(key)
    }

    /// Replaces the set of excluded keys.
    pub fn set_excluded(&mut self, keys: impl IntoIterator<Item = K>) {
        self.excluded = keys.into_iter().collect();
        let excluded = &self.excluded;
        self.suggestions.retain(|s| !excluded.contains(&s.item.id));
    }

    /// Visible suggestions.
    #[must_use]
    pub fn suggestions(&self) -> &[Suggestion<K>] {
        &self.suggestions
    }

    /// Returns `true` while the latest issued request has not answered.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns `true` while a debounce window is running.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// When [`poll`](Self::poll) will next issue a request, if scheduled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    /// Current input text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn invalidate_in_flight(&mut self) {
        if let Some((token, _)) = self.in_flight.take() {
            tracing::trace!(token = token.0, "suggestion request superseded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(titles: &[&str]) -> Vec<SuggestItem<u32>> {
        titles
            .iter()
            .zip(1..)
            .map(|(t, id)| SuggestItem::new(id, *t))
            .collect()
    }

    fn titles(fetcher: &SuggestionFetcher<u32>) -> Vec<&str> {
        fetcher
            .suggestions()
            .iter()
            .map(|s| s.item.title.as_str())
            .collect()
    }

    #[test]
    fn typing_burst_issues_one_fetch() {
        let mut f: SuggestionFetcher<u32> = SuggestionFetcher::new(SuggestConfig::default());
        let mut issued = Vec::new();

        assert_eq!(f.on_input("j", 0), InputEffect::Cleared);
        for t in (0..100).step_by(10) {
            issued.extend(f.poll(t));
        }
        f.on_input("jo", 100);
        issued.extend(f.poll(150));
        f.on_input("john", 200);
        for t in (200..2000).step_by(10) {
            issued.extend(f.poll(t));
        }

        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].query, "john");
    }

    #[test]
    fn out_of_order_responses_keep_latest_issued() {
        let config = SuggestConfig::default().with_min_query_chars(1);
        let mut f: SuggestionFetcher<u32> = SuggestionFetcher::new(config);

        f.on_input("a", 0);
        let a = f.poll(500).unwrap();
        f.on_input("ab", 510);
        let ab = f.poll(1010).unwrap();
        f.on_input("abc", 1020);
        let abc = f.poll(1520).unwrap();
        assert!(a.token < ab.token && ab.token < abc.token);

        assert_eq!(f.on_response(a.token, Ok(items(&["a1"]))), ResponseOutcome::Stale);
        assert_eq!(f.on_response(abc.token, Ok(items(&["abc1", "abc2"]))), ResponseOutcome::Applied(2));
        assert_eq!(f.on_response(ab.token, Ok(items(&["ab1"]))), ResponseOutcome::Stale);
        assert_eq!(titles(&f), vec!["abc1", "abc2"]);
        assert!(!f.is_searching());
    }

    #[test]
    fn keystroke_during_flight_makes_response_stale() {
        let mut f: SuggestionFetcher<u32> = SuggestionFetcher::new(SuggestConfig::default());
        f.on_input("mar", 0);
        let req = f.poll(500).unwrap();
        assert!(f.is_searching());
        f.on_input("mari", 600);
        assert!(!f.is_searching());
        assert_eq!(f.on_response(req.token, Ok(items(&["Mark"]))), ResponseOutcome::Stale);
        assert!(f.suggestions().is_empty());
    }

    #[test]
    fn close_discards_in_flight_response() {
        let mut f: SuggestionFetcher<u32> = SuggestionFetcher::new(SuggestConfig::default());
        f.on_input("mar", 0);
        let req = f.poll(500).unwrap();
        f.close();
        assert_eq!(f.on_response(req.token, Ok(items(&["Mark"]))), ResponseOutcome::Stale);
        assert!(f.suggestions().is_empty());
        assert_eq!(f.text(), "");
    }

    #[test]
    fn short_text_clears_and_cancels() {
        let mut f: SuggestionFetcher<u32> = SuggestionFetcher::new(SuggestConfig::default());
        f.on_input("ma", 0);
        let req = f.poll(500).unwrap();
        f.on_response(req.token, Ok(items(&["Mark", "Mary"])));
        assert_eq!(f.suggestions().len(), 2);

        f.on_input("mar", 600);
        assert!(f.is_pending());
        assert_eq!(f.on_input("m", 700), InputEffect::Cleared);
        assert!(!f.is_pending());
        assert!(f.suggestions().is_empty());
        assert_eq!(f.poll(5000), None);
    }

    #[test]
    fn failure_clears_and_stops_searching() {
        let mut f: SuggestionFetcher<u32> = SuggestionFetcher::new(SuggestConfig::default());
        f.on_input("ma", 0);
        let req = f.poll(500).unwrap();
        f.on_response(req.token, Ok(items(&["Mark"])));

        f.on_input("mar", 600);
        let req = f.poll(1100).unwrap();
        let outcome = f.on_response(req.token, Err(FetchError::Rejected("503".into())));
        assert_eq!(outcome, ResponseOutcome::Failed);
        assert!(f.suggestions().is_empty());
        assert!(!f.is_searching());
    }

    #[test]
    fn chosen_keys_are_excluded_and_titles_highlighted() {
        let config = SuggestConfig::default().with_max_results(2);
        let mut f: SuggestionFetcher<u32> = SuggestionFetcher::new(config);
        f.exclude(2);
        f.on_input("an", 0);
        let req = f.poll(500).unwrap();
        assert_eq!(req.limit, Some(2));
        f.on_response(req.token, Ok(items(&["Ann", "Dan", "Jan", "Stan"])));
        assert_eq!(titles(&f), vec!["Ann", "Jan"]);

        let jan = &f.suggestions()[1];
        let parts: Vec<_> = jan.highlight.parts(&jan.item.title).collect();
        assert_eq!(parts, vec![("J", false), ("an", true)]);

        f.exclude(1);
        assert_eq!(titles(&f), vec!["Jan"]);
        assert!(f.include(&1));
        f.set_excluded([3]);
        assert!(f.suggestions().is_empty());
    }
}
