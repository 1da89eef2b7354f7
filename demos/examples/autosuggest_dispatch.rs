// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced suggestion fetching against a slow fake directory service.
//!
//! Shows a typing burst collapsing into one fetch, and a slow response for an
//! older query arriving after a newer keystroke and being discarded.
//!
//! Run:
//! - `RUST_LOG=info,overstory_suggest=trace cargo run -p overstory_demos --example autosuggest_dispatch`

use std::time::Duration;

use overstory_suggest::{
    DispatchEvent, FetchDispatcher, FetchError, SuggestConfig, SuggestItem, SuggestParams,
    ResponseOutcome, SuggestionFetcher,
};
use tracing_subscriber::EnvFilter;

const PEOPLE: &[(u32, &str)] = &[
    (1, "Ann Lee"),
    (2, "Anna Karlsson"),
    (3, "Hannah Ortiz"),
    (4, "Mark Twain"),
    (5, "Maria Gomez"),
    (6, "Omar Haddad"),
];

async fn directory(params: SuggestParams) -> Result<Vec<SuggestItem<u32>>, FetchError> {
    // Short queries are expensive for the fake backend.
    let latency = if params.query.chars().count() < 3 { 600 } else { 120 };
    tracing::debug!(query = %params.query, latency, "directory lookup");
    tokio::time::sleep(Duration::from_millis(latency)).await;
    let needle = params.query.to_lowercase();
    Ok(PEOPLE
        .iter()
        .filter(|(_, name)| name.to_lowercase().contains(&needle))
        .take(params.limit.unwrap_or(usize::MAX))
        .map(|&(id, name)| SuggestItem::new(id, name))
        .collect())
}

async fn settle<F, Fut>(dispatcher: &mut FetchDispatcher<u32, F>, fetcher: &mut SuggestionFetcher<u32>)
where
    F: Fn(SuggestParams) -> Fut,
    Fut: Future<Output = Result<Vec<SuggestItem<u32>>, FetchError>> + Send + 'static,
{
    while let Some(event) = dispatcher.step(fetcher).await {
        match event {
            DispatchEvent::Issued(token) => {
                println!("[{:>5}ms] fetch issued {token:?}", dispatcher.now());
            }
            DispatchEvent::Response(outcome) => {
                if outcome == ResponseOutcome::Stale {
                    tracing::info!("discarded a response for a superseded query");
                }
                println!("[{:>5}ms] response {outcome:?}", dispatcher.now());
            }
        }
    }
    for suggestion in fetcher.suggestions() {
        let rendered: String = suggestion
            .highlight
            .parts(&suggestion.item.title)
            .map(|(text, matched)| if matched { format!("[{text}]") } else { text.to_owned() })
            .collect();
        println!("    {rendered}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut dispatcher = FetchDispatcher::new(directory);
    let mut fetcher = SuggestionFetcher::new(SuggestConfig::default().with_max_results(5));

    println!("typing \"h\", \"ha\", \"han\" quickly:");
    for text in ["h", "ha", "han"] {
        dispatcher.input(&mut fetcher, text);
        tokio::time::sleep(Duration::from_millis(80)).await;
    }
    settle(&mut dispatcher, &mut fetcher).await;

    println!("typing \"ma\", pausing for the fetch, then \"mar\":");
    dispatcher.input(&mut fetcher, "ma");
    if let Some(DispatchEvent::Issued(token)) = dispatcher.step(&mut fetcher).await {
        println!("[{:>5}ms] fetch issued {token:?}", dispatcher.now());
    }
    tokio::time::sleep(Duration::from_millis(100)).await;
    dispatcher.input(&mut fetcher, "mar");
    settle(&mut dispatcher, &mut fetcher).await;

    dispatcher.shutdown();
}
