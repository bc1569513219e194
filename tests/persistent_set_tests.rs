#![cfg(feature = "persistent")]
//! Unit and property tests for PersistentSet.

use std::collections::BTreeSet;

use persistent_dict::persistent::PersistentSet;
use proptest::prelude::*;
use rstest::rstest;

fn set_of(elements: &[i32]) -> PersistentSet<i32> {
    elements.iter().copied().collect()
}

// =============================================================================
// Basic Operations
// =============================================================================

#[rstest]
fn test_new_and_default_are_empty() {
    let set: PersistentSet<i32> = PersistentSet::new();
    assert!(set.is_empty());
    assert_eq!(set, PersistentSet::default());
}

#[rstest]
fn test_singleton_contains_only_its_element() {
    let set = PersistentSet::singleton("only");
    assert_eq!(set.len(), 1);
    assert!(set.contains("only"));
    assert!(!set.contains("other"));
}

#[rstest]
fn test_insert_and_remove_preserve_original() {
    let set = set_of(&[1, 2, 3]);
    let inserted = set.insert(4);
    let removed = set.remove(&2);

    assert_eq!(set.to_list(), vec![1, 2, 3]);
    assert_eq!(inserted.to_list(), vec![1, 2, 3, 4]);
    assert_eq!(removed.to_list(), vec![1, 3]);
}

#[rstest]
fn test_iteration_is_sorted_both_ways() {
    let set = set_of(&[5, 1, 4, 2, 3]);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    assert_eq!(set.iter().rev().copied().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
    assert_eq!(set.iter().len(), 5);
}

#[rstest]
fn test_borrowed_into_iter() {
    let set = set_of(&[1, 2, 3]);
    let mut total = 0;
    for element in &set {
        total += element;
    }
    assert_eq!(total, 6);
}

// =============================================================================
// Set Operations
// =============================================================================

#[rstest]
#[case(&[1, 2, 3], &[2, 3, 4], &[1, 2, 3, 4], &[2, 3], &[1])]
#[case(&[], &[1], &[1], &[], &[])]
#[case(&[1, 2], &[], &[1, 2], &[], &[1, 2])]
#[case(&[1, 3], &[2, 4], &[1, 2, 3, 4], &[], &[1, 3])]
fn test_set_operations(
    #[case] left: &[i32],
    #[case] right: &[i32],
    #[case] union: &[i32],
    #[case] intersection: &[i32],
    #[case] difference: &[i32],
) {
    let left = set_of(left);
    let right = set_of(right);
    assert_eq!(left.union(&right).to_list(), union);
    assert_eq!(left.intersection(&right).to_list(), intersection);
    assert_eq!(left.difference(&right).to_list(), difference);
}

#[rstest]
fn test_is_subset() {
    assert!(set_of(&[]).is_subset(&set_of(&[1])));
    assert!(set_of(&[1, 2]).is_subset(&set_of(&[1, 2])));
    assert!(!set_of(&[1, 5]).is_subset(&set_of(&[1, 2, 3])));
}

#[rstest]
fn test_map_collapses_duplicates() {
    let set = set_of(&[1, 2, 3, 4]);
    let parity = set.map(|element| element % 2);
    assert_eq!(parity.to_list(), vec![0, 1]);
}

#[rstest]
fn test_filter_fold_and_extremes() {
    let set = set_of(&[10, 3, 7, 1]);
    let odd = set.filter(|element| element % 2 == 1);
    assert_eq!(odd.to_list(), vec![1, 3, 7]);
    assert_eq!(set.fold_left(0, |sum, element| sum + element), 21);
    assert_eq!(set.min(), Some(&1));
    assert_eq!(set.max(), Some(&10));
}

#[rstest]
fn test_hash_and_equality_ignore_insertion_order() {
    use std::collections::HashSet;

    let mut seen = HashSet::new();
    seen.insert(set_of(&[1, 2, 3]));
    assert!(seen.contains(&set_of(&[3, 2, 1])));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Law: set operations agree with BTreeSet.
    #[test]
    fn prop_set_operations_match_btreeset(
        left in prop::collection::vec(-50_i32..50, 0..60),
        right in prop::collection::vec(-50_i32..50, 0..60)
    ) {
        let left_model: BTreeSet<i32> = left.iter().copied().collect();
        let right_model: BTreeSet<i32> = right.iter().copied().collect();
        let left = set_of(&left);
        let right = set_of(&right);

        prop_assert_eq!(
            left.union(&right).to_list(),
            left_model.union(&right_model).copied().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            left.intersection(&right).to_list(),
            left_model.intersection(&right_model).copied().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            left.difference(&right).to_list(),
            left_model.difference(&right_model).copied().collect::<Vec<_>>()
        );
    }

    /// Law: insert then remove of a fresh element restores the set.
    #[test]
    fn prop_insert_remove_fresh_element(
        elements in prop::collection::vec(any::<i32>(), 0..60),
        element: i32
    ) {
        let set = set_of(&elements);
        prop_assume!(!set.contains(&element));
        prop_assert_eq!(set.insert(element).remove(&element), set);
    }
}
