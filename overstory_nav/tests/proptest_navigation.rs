// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for keyboard navigation.

use overstory_nav::{Key, MenuEntry, NavigableItemList, SelectionState, navigate};
use proptest::prelude::*;

fn arrow_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![Just(Key::Up), Just(Key::Down)]
}

fn any_key_strategy() -> impl Strategy<Value = Key> {
    prop::sample::select(vec![
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Home,
        Key::End,
        Key::PageUp,
        Key::PageDown,
        Key::Escape,
        Key::Enter,
        Key::Tab,
        Key::Shift,
        Key::Control,
        Key::Meta,
        Key::Alt,
        Key::Other,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn arrows_keep_index_in_range(count in 1usize..64, keys in prop::collection::vec(arrow_strategy(), 0..200)) {
        let mut selected = None;
        for key in keys {
            let outcome = navigate(key, selected, count);
            prop_assert!(outcome.handled);
            let index = outcome.selected.expect("arrows always select on a non-empty list");
            prop_assert!(index < count);
            selected = Some(index);
        }
    }

    #[test]
    fn count_downs_return_to_start(count in 1usize..64, start in 0usize..64) {
        let start = start % count;
        let mut selected = Some(start);
        for _ in 0..count {
            selected = navigate(Key::Down, selected, count).selected;
        }
        prop_assert_eq!(selected, Some(start));
    }

    #[test]
    fn any_key_in_range(count in 0usize..64, selected in prop::option::of(0usize..80), key in any_key_strategy()) {
        let outcome = navigate(key, selected, count);
        if let Some(index) = outcome.selected {
            prop_assert!(index < count);
        }
        if count == 0 && key.is_movement() {
            prop_assert!(!outcome.handled);
        }
    }

    #[test]
    fn refilter_keeps_selected_key(len in 1usize..40, pick in 0usize..40, keep_mask in prop::collection::vec(any::<bool>(), 40)) {
        let pick = pick % len;
        let full: NavigableItemList<usize> = (0..len).map(|k| MenuEntry::item(k, format!("item {k}"))).collect();
        let mut selection = SelectionState::new();
        selection.select_index(pick, &full);

        let filtered: NavigableItemList<usize> = (0..len)
            .filter(|&k| keep_mask[k])
            .map(|k| MenuEntry::item(k, format!("item {k}")))
            .collect();
        let index = selection.retain_by_key(&filtered);

        if keep_mask[pick] {
            let index = index.expect("kept key stays selected");
            prop_assert_eq!(filtered.key_at(index), Some(&pick));
        } else {
            prop_assert_eq!(index, None);
            prop_assert!(selection.is_none());
        }
    }
}

#[test]
fn refilter_moves_selection_to_new_index_of_same_key() {
    let before: NavigableItemList<&str> = ["ant", "bee", "cat", "cow"]
        .into_iter()
        .map(|k| MenuEntry::item(k, k))
        .collect();
    let mut selection = SelectionState::new();
    selection.select_index(2, &before);

    let after: NavigableItemList<&str> = before.filtered("c");
    assert_eq!(selection.retain_by_key(&after), Some(0));

    let gone: NavigableItemList<&str> = before.filtered("ow");
    assert_eq!(selection.retain_by_key(&gone), None);
    assert!(selection.is_none());
}
