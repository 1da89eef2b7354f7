// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Async driver that runs fetches for a [`SuggestionFetcher`] on tokio.

use core::fmt;
use core::hash::Hash;
use core::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::fetcher::{
    FetchError, InputEffect, RequestToken, ResponseOutcome, SuggestItem, SuggestParams,
    SuggestionFetcher, SuggestionRequest,
};

/// A completed fetch, tagged with the request it answers.
#[derive(Clone, Debug)]
pub struct FetchResponse<K> {
    /// Token of the request.
    pub token: RequestToken,
    /// What the fetch returned.
    pub result: Result<Vec<SuggestItem<K>>, FetchError>,
}

/// Something [`FetchDispatcher::step`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DispatchEvent {
    /// The debounce window elapsed and a fetch was started.
    Issued(RequestToken),
    /// A fetch finished and was handed to the fetcher.
    Response(ResponseOutcome),
}

/// Runs the host's async fetch function for a [`SuggestionFetcher`].
///
/// The dispatcher owns the logical clock: milliseconds since it was created, on
/// tokio's clock so paused-time tests work. Every spawned fetch is cancelled when
/// the dispatcher is shut down or dropped.
pub struct FetchDispatcher<K, F> {
    fetch: F,
    tx: mpsc::UnboundedSender<FetchResponse<K>>,
    rx: mpsc::UnboundedReceiver<FetchResponse<K>>,
    cancel: CancellationToken,
    origin: Instant,
}

impl<K, F> fmt::Debug for FetchDispatcher<K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchDispatcher")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl<K, F, Fut> FetchDispatcher<K, F>
where
    K: Clone + Eq + Hash + Send + 'static,
    F: Fn(SuggestParams) -> Fut,
    Fut: Future<Output = Result<Vec<SuggestItem<K>>, FetchError>> + Send + 'static,
{
    /// Creates a dispatcher around `fetch`. Must be called inside a tokio runtime.
    pub fn new(fetch: F) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            fetch,
            tx,
            rx,
            cancel: CancellationToken::new(),
            origin: Instant::now(),
        }
    }

    /// Current logical time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Feeds the input's text to `fetcher`, stamped with the current time.
    pub fn input(&self, fetcher: &mut SuggestionFetcher<K>, text: &str) -> InputEffect {
        fetcher.on_input(text, self.now())
    }

    /// Spawns the fetch for `request`. Its response arrives through [`step`](Self::step).
    pub fn dispatch(&self, request: SuggestionRequest) {
        if self.cancel.is_cancelled() {
            return;
        }
        let token = request.token;
        let fut = (self.fetch)(request.params());
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                () = cancel.cancelled() => return,
                result = fut => result,
            };
            // The receiver only goes away with the dispatcher.
            let _ = tx.send(FetchResponse { token, result });
        });
    }

    /// Waits for the next thing to happen to `fetcher`.
    ///
    /// Either the debounce deadline passes and a fetch is issued, or a response
    /// arrives and is applied. Returns `None` when nothing is pending or in flight.
    pub async fn step(&mut self, fetcher: &mut SuggestionFetcher<K>) -> Option<DispatchEvent> {
        loop {
            let deadline = fetcher.next_deadline();
            if deadline.is_none() && !fetcher.is_searching() {
                return None;
            }
            let origin = self.origin;
            let timer = async move {
                match deadline {
                    Some(at) => tokio::time::sleep_until(origin + Duration::from_millis(at)).await,
                    None => core::future::pending::<()>().await,
                }
            };

            tokio::select! {
                Some(response) = self.rx.recv() => {
                    let outcome = fetcher.on_response(response.token, response.result);
                    return Some(DispatchEvent::Response(outcome));
                }
                () = timer => {
                    if let Some(request) = fetcher.poll(self.now()) {
                        let token = request.token;
                        self.dispatch(request);
                        return Some(DispatchEvent::Issued(token));
                    }
                }
            }
        }
    }

    /// Cancels every fetch still in flight. Later dispatches are ignored.
    pub fn shutdown(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!("suggestion dispatcher shut down");
        }
        self.cancel.cancel();
    }
}

impl<K, F> Drop for FetchDispatcher<K, F> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
