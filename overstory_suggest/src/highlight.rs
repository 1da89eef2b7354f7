// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Match highlighting for suggestion titles.

use core::ops::Range;

use smallvec::SmallVec;

/// A run of a title, by byte range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Byte range into the title.
    pub range: Range<usize>,
    /// Whether this run matched the query.
    pub matched: bool,
}

/// A title split into matched and unmatched runs.
///
/// Only the first case-insensitive occurrence of the query is marked.
///
/// ```rust
/// use overstory_suggest::Highlight;
///
/// let title = "Johnny John";
/// let h = Highlight::new(title, "JOHN");
/// let parts: Vec<_> = h.parts(title).collect();
/// assert_eq!(parts, vec![("John", true), ("ny John", false)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
    segments: SmallVec<[Segment; 3]>,
}

impl Highlight {
    /// Splits `title` around the first occurrence of `query`.
    #[must_use]
    pub fn new(title: &str, query: &str) -> Self {
        let mut segments = SmallVec::new();
        match find_ignore_case(title, query.trim()) {
            Some(found) => {
                if found.start > 0 {
                    segments.push(Segment {
                        range: 0..found.start,
                        matched: false,
                    });
                }
                let end = found.end;
                segments.push(Segment {
                    range: found,
                    matched: true,
                });
                if end < title.len() {
                    segments.push(Segment {
                        range: end..title.len(),
                        matched: false,
                    });
                }
            }
            None if !title.is_empty() => segments.push(Segment {
                range: 0..title.len(),
                matched: false,
            }),
            None => {}
        }
        Self { segments }
    }

    /// The runs, in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns `true` if some run matched.
    #[must_use]
    pub fn has_match(&self) -> bool {
        self.segments.iter().any(|s| s.matched)
    }

    /// Yields `(text, matched)` pairs for the title this highlight was built from.
    pub fn parts<'a>(&'a self, title: &'a str) -> impl Iterator<Item = (&'a str, bool)> + 'a {
        self.segments
            .iter()
            .filter_map(move |s| title.get(s.range.clone()).map(|text| (text, s.matched)))
    }
}

/// Byte range of the first case-insensitive occurrence of `needle` in `haystack`.
///
/// Comparison is per character using Unicode lowercase mappings. An empty needle
/// matches nothing.
#[must_use]
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    for (start, _) in haystack.char_indices() {
        let mut rest = haystack[start..].char_indices();
        let mut end = start;
        let mut matched = true;
        for nc in needle.chars() {
            match rest.next() {
                Some((offset, hc)) if chars_eq_ignore_case(hc, nc) => {
                    end = start + offset + hc.len_utf8();
                }
                _ => {
                    matched = false;
                    break;
                }
            }
        }
        if matched {
            return Some(start..end);
        }
    }
    None
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
