// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text input with fetched suggestions.

use core::hash::Hash;

use kurbo::{Rect, Size};
use overstory_nav::{Key, MenuEntry, NavIntent, NavigableItemList, SelectionState};
use overstory_placement::{OverlayId, OverlayPlacement, OverlayStack};
use overstory_suggest::{
    FetchError, InputEffect, RequestToken, ResponseOutcome, SuggestConfig, SuggestItem,
    Suggestion, SuggestionFetcher, SuggestionRequest,
};

use crate::config::FieldConfig;
use crate::overlay::OverlayHost;
use crate::response::{Choice, Commit, FieldChanges, FieldResponse, FieldStatus};
use crate::translate::{self, Translate};

/// Controller of an autosuggest input.
///
/// The host forwards the input's text with [`on_input`](Self::on_input), performs
/// each request returned by [`poll`](Self::poll) (or lets a
/// [`FetchDispatcher`](overstory_suggest::FetchDispatcher) do it), and hands the
/// result to [`on_response`](Self::on_response). Committed suggestions are
/// remembered as chosen and left out of later results.
#[derive(Clone, Debug)]
pub struct AutosuggestField<K> {
    name: String,
    allow_create: bool,
    fetcher: SuggestionFetcher<K>,
    items: NavigableItemList<K>,
    selection: SelectionState<K>,
    chosen: Vec<K>,
    text: String,
    /// A response for the current text has been applied.
    answered: bool,
    overlay: OverlayHost,
}

impl<K: Clone + Eq + Hash> AutosuggestField<K> {
    /// Creates a closed field with empty text.
    pub fn new(name: impl Into<String>, config: FieldConfig, suggest: SuggestConfig) -> Self {
        Self {
            name: name.into(),
            allow_create: config.allow_create,
            fetcher: SuggestionFetcher::new(suggest),
            items: NavigableItemList::default(),
            selection: SelectionState::new(),
            chosen: Vec::new(),
            text: String::new(),
            answered: false,
            overlay: OverlayHost::new(&config),
        }
    }

    /// Name reported in commits.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opens the suggestion overlay below (or above) `reference`.
    pub fn open(
        &mut self,
        stack: &mut OverlayStack,
        reference: Option<Rect>,
        viewport: Size,
    ) -> FieldResponse<Choice<K>> {
        if !self.overlay.open(stack, reference, viewport, self.items.len()) {
            return FieldResponse::ignored();
        }
        tracing::debug!(field = %self.name, "autosuggest opened");
        self.selection.reset();
        FieldResponse::changed(FieldChanges::OPENED)
    }

    /// Closes the overlay and clears the text, suggestions, highlight, and timers.
    ///
    /// Responses to requests issued before this call are ignored.
    pub fn close(&mut self, stack: &mut OverlayStack) -> FieldResponse<Choice<K>> {
        self.fetcher.close();
        self.items = NavigableItemList::default();
        self.selection.reset();
        self.text.clear();
        self.answered = false;
        self.overlay.set_rows(0);
        if !self.overlay.close(stack) {
            return FieldResponse::ignored();
        }
        tracing::debug!(field = %self.name, "autosuggest closed");
        FieldResponse::changed(FieldChanges::CLOSED | FieldChanges::ITEMS)
    }

    /// Records the input's new text at `now`.
    ///
    /// The text itself is never consumed. Suggestions and the highlight are
    /// dropped until the response for the new text is applied; the returned
    /// response reports which of them were visible.
    pub fn on_input(&mut self, text: &str, now: u64) -> FieldResponse<Choice<K>> {
        self.text.clear();
        self.text.push_str(text);
        self.answered = false;
        let effect = self.fetcher.on_input(text, now);
        if let InputEffect::Scheduled { deadline } = effect {
            tracing::trace!(field = %self.name, deadline, "suggestions stale until next response");
        }
        let had_selection = !self.selection.is_none();
        let had_items = !self.items.is_empty();
        self.items = NavigableItemList::default();
        self.selection.reset();
        self.overlay.set_rows(0);
        let mut changes = FieldChanges::empty();
        changes.set(FieldChanges::ITEMS, had_items || effect == InputEffect::Cleared);
        changes.set(FieldChanges::SELECTION, had_selection);
        FieldResponse::changed(changes)
    }

    /// Issues the pending fetch once the debounce window has elapsed.
    pub fn poll(&mut self, now: u64) -> Option<SuggestionRequest> {
        self.fetcher.poll(now)
    }

    /// Applies a fetch result. Stale results change nothing.
    pub fn on_response(
        &mut self,
        token: RequestToken,
        result: Result<Vec<SuggestItem<K>>, FetchError>,
    ) -> FieldResponse<Choice<K>> {
        if self.fetcher.on_response(token, result) == ResponseOutcome::Stale {
            return FieldResponse::ignored();
        }
        self.answered = true;
        let before = self.selection.index();
        self.items = self
            .fetcher
            .suggestions()
            .iter()
            .map(|s| MenuEntry::item(s.item.id.clone(), s.item.title.clone()))
            .collect();
        self.selection.retain_by_key(&self.items);
        self.overlay.set_rows(self.items.len());
        let mut changes = FieldChanges::ITEMS;
        changes.set(FieldChanges::SELECTION, self.selection.index() != before);
        FieldResponse::changed(changes)
    }

    /// Applies a key press while the input has focus.
    ///
    /// Left and Right always belong to the text caret. Enter with nothing
    /// highlighted commits the typed text as [`Choice::Create`] when creation is
    /// allowed.
    pub fn on_key(&mut self, key: Key, stack: &mut OverlayStack) -> FieldResponse<Choice<K>> {
        if matches!(key, Key::Left | Key::Right) || !self.is_open() {
            return FieldResponse::ignored();
        }
        if key == Key::Escape && !self.overlay.owns_escape(stack) {
            return FieldResponse::ignored();
        }
        let outcome = self.selection.handle_key(key, &self.items);
        match outcome.intent {
            NavIntent::Moved => {
                let scroll = self.overlay.reveal(outcome.scroll);
                FieldResponse::ignored().handled().with_scroll(scroll)
            }
            NavIntent::Close => self.close(stack).handled(),
            NavIntent::Submit => {
                if let Some(key) = self.selection.key().cloned() {
                    return self.commit(Choice::Existing(key), stack).handled();
                }
                let typed = self.text.trim();
                if self.allow_create && !typed.is_empty() {
                    let typed = typed.to_owned();
                    return self.commit(Choice::Create(typed), stack).handled();
                }
                FieldResponse::ignored().handled()
            }
            NavIntent::PassThrough => FieldResponse::ignored(),
        }
    }

    /// Commits the suggestion at `index` of [`items`](Self::items).
    pub fn click_item(&mut self, index: usize, stack: &mut OverlayStack) -> FieldResponse<Choice<K>> {
        if !self.is_open() {
            return FieldResponse::ignored();
        }
        match self.items.key_at(index).cloned() {
            Some(key) => self.commit(Choice::Existing(key), stack),
            None => FieldResponse::ignored(),
        }
    }

    /// Records that the input lost focus at `now`.
    pub fn on_blur(&mut self, now: u64) {
        self.overlay.on_blur(now);
    }

    /// Records that focus returned to the input.
    pub fn on_focus(&mut self) {
        self.overlay.on_focus();
    }

    /// Records a pointer press on a suggestion row, ahead of its click.
    pub fn on_item_pointer_down(&mut self) {
        self.overlay.on_pointer_down();
    }

    /// Advances time; closes the overlay once a pending blur-close expires.
    pub fn tick(&mut self, now: u64, stack: &mut OverlayStack) -> FieldResponse<Choice<K>> {
        if self.overlay.blur_expired(now) {
            return self.close(stack);
        }
        FieldResponse::ignored()
    }

    /// Earliest time at which [`poll`](Self::poll) or [`tick`](Self::tick) has work.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.fetcher.next_deadline(), self.overlay.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Status line to show under the suggestions, if any.
    ///
    /// "Searching" while a fetch is in flight, "no results" once the latest
    /// fetch came back empty.
    pub fn status_text(&self, translator: &dyn Translate) -> Option<String> {
        if self.fetcher.is_searching() {
            return Some(translator.get(translate::SEARCHING));
        }
        if self.answered && self.items.is_empty() {
            return Some(translator.format(translate::NO_RESULTS, &[("query", self.text.trim())]));
        }
        None
    }

    /// Marks `key` as chosen outside this field, such as when restoring saved state.
    pub fn set_chosen(&mut self, keys: impl IntoIterator<Item = K>) {
        self.chosen = keys.into_iter().collect();
        self.fetcher.set_excluded(self.chosen.iter().cloned());
    }

    /// Forgets a chosen key so it can be suggested again.
    pub fn remove_chosen(&mut self, key: &K) -> bool {
        let before = self.chosen.len();
        self.chosen.retain(|k| k != key);
        self.fetcher.include(key);
        self.chosen.len() != before
    }

    /// Keys committed so far.
    #[must_use]
    pub fn chosen(&self) -> &[K] {
        &self.chosen
    }

    /// Suggestions with their highlights, parallel to [`items`](Self::items).
    ///
    /// Empty between a keystroke and the response for its text.
    #[must_use]
    pub fn suggestions(&self) -> &[Suggestion<K>] {
        if self.answered {
            self.fetcher.suggestions()
        } else {
            &[]
        }
    }

    /// Visible entries.
    #[must_use]
    pub fn items(&self) -> &NavigableItemList<K> {
        &self.items
    }

    /// Index of the highlighted suggestion.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selection.index()
    }

    /// Key of the highlighted suggestion.
    #[must_use]
    pub fn selected_key(&self) -> Option<&K> {
        self.selection.key()
    }

    /// Current input text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` while a fetch is in flight.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.fetcher.is_searching()
    }

    /// Completes placement with the overlay's rendered size.
    pub fn on_measured(&mut self, size: Size) -> OverlayPlacement {
        self.overlay.on_measured(size)
    }

    /// Recomputes placement after a window resize.
    pub fn on_viewport_resized(&mut self, viewport: Size) -> Option<OverlayPlacement> {
        self.overlay.on_viewport_resized(viewport)
    }

    /// Current placement, once measured.
    #[must_use]
    pub fn placement(&self) -> Option<&OverlayPlacement> {
        self.overlay.placement()
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
        status.set(FieldStatus::SEARCHING, self.fetcher.is_searching());
        status.set(FieldStatus::SELECTED, !self.selection.is_none());
        status
    }

    fn commit(&mut self, choice: Choice<K>, stack: &mut OverlayStack) -> FieldResponse<Choice<K>> {
        if let Choice::Existing(key) = &choice {
            if !self.chosen.contains(key) {
                self.chosen.push(key.clone());
            }
            self.fetcher.exclude(key.clone());
        }
        tracing::debug!(
            field = %self.name,
            created = matches!(choice, Choice::Create(_)),
            "autosuggest committed"
        );
        let commit = Commit {
            name: self.name.clone(),
            value: choice,
        };
        self.close(stack).with_commit(commit)
    }
}
