// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed entry lists.

use alloc::string::String;
use alloc::vec::Vec;

/// Role tag of a selectable entry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemRole {
    /// An ordinary option.
    #[default]
    Normal,
    /// Shown but skipped by navigation and never committed.
    Disabled,
    /// "Create …" entry offering to add the typed text as a new value.
    ///
    /// Create entries survive every filter.
    Create,
}

/// One entry of a menu or option list.
///
/// Callers build lists of these directly; there is no component tree to walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEntry<K> {
    /// A selectable (unless disabled) option.
    Item {
        /// Stable identity of the option, preserved across rebuilds.
        key: K,
        /// Display text, also used for filtering.
        label: String,
        /// Role tag.
        role: ItemRole,
    },
    /// A horizontal rule between groups.
    Separator,
    /// A non-selectable group heading.
    Title(String),
}

impl<K> MenuEntry<K> {
    /// A normal item.
    pub fn item(key: K, label: impl Into<String>) -> Self {
        Self::Item {
            key,
            label: label.into(),
            role: ItemRole::Normal,
        }
    }

    /// A disabled item.
    pub fn disabled(key: K, label: impl Into<String>) -> Self {
        Self::Item {
            key,
            label: label.into(),
            role: ItemRole::Disabled,
        }
    }

    /// A "create" item.
    pub fn create(key: K, label: impl Into<String>) -> Self {
        Self::Item {
            key,
            label: label.into(),
            role: ItemRole::Create,
        }
    }

    /// A separator.
    #[must_use]
    pub const fn separator() -> Self {
        Self::Separator
    }

    /// A group title.
    pub fn title(label: impl Into<String>) -> Self {
        Self::Title(label.into())
    }

    /// The key of an item entry.
    pub fn key(&self) -> Option<&K> {
        match self {
            Self::Item { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The display text of an item or title.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Item { label, .. } | Self::Title(label) => Some(label),
            Self::Separator => None,
        }
    }

    /// Returns `true` if navigation may land on this entry.
    pub fn is_selectable(&self) -> bool {
        matches!(
            self,
            Self::Item {
                role: ItemRole::Normal | ItemRole::Create,
                ..
            }
        )
    }
}

/// An ordered list of entries; order is the arrow-key traversal order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigableItemList<K> {
    entries: Vec<MenuEntry<K>>,
}

impl<K> Default for NavigableItemList<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K> FromIterator<MenuEntry<K>> for NavigableItemList<K> {
    fn from_iter<I: IntoIterator<Item = MenuEntry<K>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<K> NavigableItemList<K> {
    /// Wraps an entry list.
    #[must_use]
    pub fn new(entries: Vec<MenuEntry<K>>) -> Self {
        Self { entries }
    }

    /// Number of entries, including separators and titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MenuEntry<K>> {
        self.entries.get(index)
    }

    /// All entries in order.
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry<K>] {
        &self.entries
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> core::slice::Iter<'_, MenuEntry<K>> {
        self.entries.iter()
    }

    /// Returns `true` if navigation may land on `index`.
    #[must_use]
    pub fn is_selectable(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(MenuEntry::is_selectable)
    }

    /// Number of entries navigation may land on.
    #[must_use]
    pub fn selectable_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_selectable()).count()
    }

    /// Key of the entry at `index`, if it is an item.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.entries.get(index).and_then(MenuEntry::key)
    }
}

impl<K: PartialEq> NavigableItemList<K> {
    /// Index of the item with `key`.
    #[must_use]
    pub fn position_of(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|e| e.key() == Some(key))
    }
}

impl<K: Clone> NavigableItemList<K> {
    /// Returns the entries whose label contains `query`, ignoring case.
    ///
    /// Create entries are always kept. Titles are kept only when at least one
    /// item of their group survives, and separators only between surviving
    /// groups. An empty query keeps everything. The result is deterministic for a
    /// given query.
    #[must_use]
    pub fn filtered(&self, query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            return self.clone();
        }
        let needle = query.to_lowercase();

        let mut out: Vec<MenuEntry<K>> = Vec::with_capacity(self.entries.len());
        let mut pending_title: Option<&MenuEntry<K>> = None;
        let mut pending_separator = false;
        for entry in &self.entries {
            match entry {
                MenuEntry::Separator => {
                    pending_separator = true;
                    pending_title = None;
                }
                MenuEntry::Title(_) => pending_title = Some(entry),
                MenuEntry::Item { label, role, .. } => {
                    let keep = *role == ItemRole::Create || label.to_lowercase().contains(&needle);
                    if !keep {
                        continue;
                    }
                    if pending_separator && !out.is_empty() {
                        out.push(MenuEntry::Separator);
                    }
                    pending_separator = false;
                    if let Some(title) = pending_title.take() {
                        out.push(title.clone());
                    }
                    out.push(entry.clone());
                }
            }
        }
        Self::new(out)
    }
}
