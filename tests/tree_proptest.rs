//! Property tests: TernaryTree behaves like an ordered map of inserted keys

use std::collections::BTreeMap;

use proptest::prelude::*;

use tstree::TernaryTree;

/// Small alphabet so keys share prefixes and collide often.
fn key() -> impl Strategy<Value = String> {
    "[a-dé]{1,6}"
}

fn entries() -> impl Strategy<Value = Vec<(String, i32)>> {
    prop::collection::vec((key(), any::<i32>()), 0..64)
}

/// Inserts like the tree does: first value for a key wins.
fn build(entries: &[(String, i32)]) -> (TernaryTree<i32>, BTreeMap<String, i32>, usize) {
    let mut tree = TernaryTree::new();
    let mut model = BTreeMap::new();
    let mut successes = 0;
    for (k, v) in entries {
        let inserted = tree.insert(k, *v).unwrap();
        assert_eq!(inserted, !model.contains_key(k));
        if inserted {
            model.insert(k.clone(), *v);
            successes += 1;
        }
    }
    (tree, model, successes)
}

proptest! {
    #[test]
    fn insert_then_get_returns_first_value(entries in entries()) {
        let (tree, model, _) = build(&entries);
        for (k, v) in &model {
            prop_assert_eq!(tree.get(k).unwrap(), Some(v));
        }
    }

    #[test]
    fn reinsert_fails_and_keeps_value(entries in entries(), value in any::<i32>()) {
        let (mut tree, model, _) = build(&entries);
        for (k, v) in &model {
            prop_assert!(!tree.insert(k, value).unwrap());
            prop_assert_eq!(tree.get(k).unwrap(), Some(v));
        }
    }

    #[test]
    fn contains_agrees_with_get(entries in entries(), lookups in prop::collection::vec(key(), 0..32)) {
        let (tree, model, _) = build(&entries);
        for k in lookups.iter().chain(model.keys()) {
            prop_assert_eq!(tree.contains(k).unwrap(), tree.get(k).unwrap().is_some());
            prop_assert_eq!(tree.contains(k).unwrap(), model.contains_key(k));
        }
    }

    #[test]
    fn size_counts_successful_inserts(entries in entries()) {
        let (tree, model, successes) = build(&entries);
        prop_assert_eq!(tree.size(), successes);
        prop_assert_eq!(tree.size(), model.len());
        prop_assert_eq!(tree.is_empty(), entries.is_empty());
    }

    #[test]
    fn autocomplete_empty_lists_all_keys_ascending(entries in entries()) {
        let (tree, model, _) = build(&entries);
        let keys = tree.autocomplete("");
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(keys, model.keys().cloned().collect::<Vec<_>>());
    }

    #[test]
    fn autocomplete_is_exactly_the_prefix_set(entries in entries(), prefix in "[a-dé]{0,3}") {
        let (tree, model, _) = build(&entries);
        let expected: Vec<String> = model
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .cloned()
            .collect();
        prop_assert_eq!(tree.autocomplete(&prefix), expected);
    }

    #[test]
    fn anchored_literal_pattern_matches_only_that_key(entries in entries()) {
        let (tree, model, _) = build(&entries);
        for k in model.keys() {
            let pattern = format!("^{}$", regex::escape(k));
            prop_assert_eq!(tree.partial_match(&pattern).unwrap(), vec![k.clone()]);
        }
    }

    #[test]
    fn literal_key_pattern_matches_only_that_key(entries in entries()) {
        let (tree, model, _) = build(&entries);
        for k in model.keys() {
            prop_assert_eq!(tree.partial_match(&regex::escape(k)).unwrap(), vec![k.clone()]);
        }
    }

    #[test]
    fn make_empty_forgets_everything(entries in entries()) {
        let (mut tree, model, _) = build(&entries);
        tree.make_empty();
        prop_assert_eq!(tree.size(), 0);
        prop_assert!(tree.is_empty());
        for k in model.keys() {
            prop_assert_eq!(tree.get(k).unwrap(), None);
        }
    }
}
