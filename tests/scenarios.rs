use avl_index::{Aa, DuplicateKey, Map, Set};
use std::ops::Bound::*;

/// Height in edges, as opposed to the node count `height()` reports.
fn edges<T>(set: &Set<T>) -> usize where T: Ord {
    set.height().saturating_sub(1)
}

fn set(items: &[i32]) -> Set<i32> {
    let mut set = Set::new();
    for &item in items { assert!(set.insert(item), "{} inserted twice", item); }
    set
}

fn items(set: &Set<i32>) -> Vec<i32> { set.iter().cloned().collect() }

#[test]
fn seven_keys_form_perfect_tree() {
    let tree = set(&[50, 25, 75, 10, 30, 60, 80]);
    assert_eq!(edges(&tree), 2);
    assert_eq!(tree.height(), 3);
    assert_eq!(items(&tree), [10, 25, 30, 50, 60, 75, 80]);
    assert_eq!(tree.pred(&50, false), Some(&30));
    assert_eq!(tree.succ(&50, false), Some(&60));
}

#[test]
fn insert_below_perfect_tree_keeps_order() {
    let mut tree = set(&[50, 25, 75, 10, 30, 60, 80]);
    assert!(tree.insert(5));
    assert_eq!(items(&tree), [5, 10, 25, 30, 50, 60, 75, 80]);
    assert_eq!(edges(&tree), 3);
    assert_eq!(tree.min(), Some(&5));
}

#[test]
fn remove_leaf_without_rotation() {
    let mut tree = set(&[10, 5, 15]);
    assert!(tree.remove(&5));
    assert_eq!(items(&tree), [10, 15]);
    assert_eq!(edges(&tree), 1);
}

#[test]
fn remove_inner_key_from_twelve() {
    let mut tree = set(&[50, 25, 75, 10, 30, 60, 80, 5, 15, 27, 35, 65]);
    assert_eq!(edges(&tree), 3);

    assert!(tree.remove(&10));
    assert_eq!(items(&tree), [5, 15, 25, 27, 30, 35, 50, 60, 65, 75, 80]);
    assert_eq!(edges(&tree), 3);

    assert!(tree.remove(&5));
    assert!(tree.remove(&15));
    assert_eq!(items(&tree), [25, 27, 30, 35, 50, 60, 65, 75, 80]);
    assert_eq!(edges(&tree), 3);
}

#[test]
fn ascending_inserts_rebalance() {
    let tree = set(&[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(edges(&tree), 2);
    assert_eq!(items(&tree), [1, 2, 3, 4, 5, 6, 7]);

    let tree: Set<i32> = (1..=7).rev().collect();
    assert_eq!(edges(&tree), 2);
}

#[test]
fn len_counts_distinct_inserts() {
    let tree: Set<u32> = (0..100).map(|i| i * 7 % 101).collect();
    assert_eq!(tree.len(), 100);
}

#[test]
fn height_within_avl_bound() {
    for n in 1..300u32 {
        let tree: Set<u32> = (0..n).map(|i| i.wrapping_mul(2_654_435_761) % 1000).collect();
        let bound = 1.44 * ((tree.len() + 2) as f64).log2() - 1.0;
        assert!(edges(&tree) as f64 <= bound, "{} keys, {} edges", tree.len(), edges(&tree));
    }
}

#[test]
fn inserted_key_is_found() {
    let mut tree = set(&[3, 1, 4]);
    assert!(!tree.contains(&5));
    assert!(tree.insert(5));
    assert!(tree.contains(&5));
}

#[test]
fn removed_key_is_gone() {
    let mut tree = set(&[3, 1, 4, 5, 9, 2, 6]);
    assert!(tree.remove(&4));
    assert!(!tree.contains(&4));
    assert!(!tree.remove(&4));
    assert_eq!(tree.len(), 6);
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut tree = set(&[8, 4, 12, 2, 6]);
    let before = (items(&tree), tree.height(), tree.len());

    assert!(!tree.insert(6));
    assert_eq!((items(&tree), tree.height(), tree.len()), before);

    assert_eq!(tree.try_insert(4), Err(DuplicateKey { key: 4, value: () }));
    assert_eq!(tree.try_insert(5), Ok(()));
}

#[test]
fn duplicate_insert_keeps_value() {
    let mut map = Map::new();
    assert!(map.insert("k", 1));
    assert!(!map.insert("k", 2));
    assert_eq!(map.get(&"k"), Some(&1));

    let err = map.try_insert("k", 3).unwrap_err();
    assert_eq!(err.to_string(), "duplicate key \"k\"");
    assert_eq!(err.into_inner(), ("k", 3));

    assert_eq!(map.replace("k", 4), Some(1));
    assert_eq!(map.get(&"k"), Some(&4));
}

#[test]
fn empty_tree_has_no_extrema() {
    let mut tree = Set::<i32>::new();
    assert_eq!(tree.min(), None);
    assert_eq!(tree.max(), None);
    assert_eq!(tree.remove_min(), None);
    assert_eq!(tree.remove_max(), None);
    assert_eq!(tree.pred(&0, true), None);
    assert_eq!(tree.succ(&0, true), None);
    assert_eq!(tree.height(), 0);
    assert!(!tree.remove(&0));
}

#[test]
fn removing_sole_key_empties_tree() {
    let mut tree = set(&[42]);
    assert_eq!(tree.height(), 1);
    assert!(tree.remove(&42));
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
}

#[test]
fn neighbours_of_absent_keys() {
    let tree = set(&[10, 20, 30, 40]);
    assert_eq!(tree.pred(&25, false), Some(&20));
    assert_eq!(tree.succ(&25, false), Some(&30));
    assert_eq!(tree.pred(&10, false), None);
    assert_eq!(tree.succ(&40, false), None);
    assert_eq!(tree.pred(&20, true), Some(&20));
    assert_eq!(tree.succ(&30, true), Some(&30));
}

#[test]
fn range_and_reverse() {
    let tree: Set<i32> = (1..=10).collect();
    assert_eq!(tree.range(Included(&3), Excluded(&6)).cloned().collect::<Vec<_>>(), [3, 4, 5]);
    let tail = tree.range::<i32, i32>(Excluded(&7), Unbounded);
    assert_eq!(tail.rev().cloned().collect::<Vec<_>>(), [10, 9, 8]);
    assert_eq!(tree.iter().rev().take(2).cloned().collect::<Vec<_>>(), [10, 9]);
}

#[test]
fn custom_comparator_orders_keys() {
    let mut tree: Set<i32, _> = Set::with_cmp(|a: &i32, b: &i32| b.cmp(a));
    tree.extend(vec![1, 5, 3]);
    assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), [5, 3, 1]);
    assert_eq!(tree.min(), Some(&5));
}

#[test]
fn aa_policy_answers_the_same_queries() {
    let mut tree: Set<i32, _, Aa> = Set::with_balance(compare::natural());
    for item in &[50, 25, 75, 10, 30, 60, 80, 5, 15, 27, 35, 65] { assert!(tree.insert(*item)); }

    assert!(tree.remove(&10));
    assert_eq!(tree.succ(&5, false), Some(&15));
    assert_eq!(tree.pred(&27, false), Some(&25));
    assert_eq!(tree.len(), 11);
    assert!(tree.height() <= 2 * 4);
}
