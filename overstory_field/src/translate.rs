// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookup of user-visible strings.

/// Key of the "searching…" status line.
pub const SEARCHING: &str = "suggest.searching";
/// Key of the "no results" status line. Receives the query as `{query}`.
pub const NO_RESULTS: &str = "suggest.no_results";

/// Translates message keys into display strings.
///
/// Closures `Fn(&str) -> String` implement this trait directly.
///
/// ```rust
/// use overstory_field::translate::{self, Translate};
///
/// let t = |key: &str| match key {
///     translate::NO_RESULTS => "Nothing matches '{query}'".to_owned(),
///     other => other.to_owned(),
/// };
/// assert_eq!(t.format(translate::NO_RESULTS, &[("query", "zz")]), "Nothing matches 'zz'");
/// ```
pub trait Translate {
    /// Returns the string for `key`.
    fn get(&self, key: &str) -> String;

    /// Returns the string for `key` with each `{name}` placeholder replaced.
    fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.get(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }
}

impl<F: Fn(&str) -> String> Translate for F {
    fn get(&self, key: &str) -> String {
        self(key)
    }
}
