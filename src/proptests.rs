use super::*;

use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Multiset model: key -> number of occurrences.
type Model = BTreeMap<i32, usize>;

fn model_keys(model: &Model) -> Vec<i32> {
    model
        .iter()
        .flat_map(|(&key, &count)| std::iter::repeat(key).take(count))
        .collect()
}

fn model_size(model: &Model) -> usize {
    model.values().sum()
}

#[derive(Clone, Debug)]
enum Op {
    Insert(i32),
    Remove(i32),
    Search(i32),
}

fn key_strategy() -> impl Strategy<Value = i32> + Clone {
    // Small range so duplicates and removals of present keys are common; zero
    // and negative keys exercise the domain check.
    -4i32..=64
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => key.clone().prop_map(Op::Insert),
        35 => key.clone().prop_map(Op::Remove),
        15 => key.clone().prop_map(Op::Search),
    ];
    prop::collection::vec(op, 0..=500)
}

fn tree_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(1i32..=200, 0..=300)
}

#[derive(Clone, Debug)]
enum TableOp {
    Put(u16, u32),
    Remove(u16),
    Get(u16),
}

fn table_ops_strategy() -> impl Strategy<Value = Vec<TableOp>> {
    let key = 0u16..512;
    let op = prop_oneof![
        55 => (key.clone(), any::<u32>()).prop_map(|(k, v)| TableOp::Put(k, v)),
        30 => key.clone().prop_map(TableOp::Remove),
        15 => key.prop_map(TableOp::Get),
    ];
    prop::collection::vec(op, 0..=1500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_tree_matches_model(ops in ops_strategy()) {
        let mut tree = AvlTree::new();
        let mut model = Model::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let result = tree.insert(key);
                    if key > 0 {
                        prop_assert!(result.is_ok());
                        *model.entry(key).or_default() += 1;
                    } else {
                        prop_assert_eq!(result, Err(Error::Domain(key.to_string())));
                    }
                }
                Op::Remove(key) => {
                    let removed = tree.remove(&key);
                    let expected = match model.get_mut(&key) {
                        Some(count) => {
                            *count -= 1;
                            if *count == 0 {
                                model.remove(&key);
                            }
                            true
                        }
                        None => false,
                    };
                    prop_assert_eq!(removed, expected);
                }
                Op::Search(key) => {
                    prop_assert_eq!(tree.search(&key), model.contains_key(&key));
                    prop_assert_eq!(tree.count_of(&key), model.get(&key).copied().unwrap_or(0));
                }
            }
            prop_assert!(tree.validate_invariant());
            prop_assert_eq!(tree.size(), model_size(&model));
        }

        prop_assert_eq!(tree.traverse(Order::Inorder), model_keys(&model));
        prop_assert_eq!(tree.min().ok(), model.keys().next().copied());
        prop_assert_eq!(tree.max().ok(), model.keys().next_back().copied());
    }

    #[test]
    fn prop_split_partitions(keys in tree_strategy(), pivot in 0i32..=210) {
        let tree = AvlTree::try_from_iter(keys.iter().copied()).unwrap();
        let size = tree.size();
        let mut expected = keys.clone();
        expected.sort();
        let (expected_left, expected_right): (Vec<i32>, Vec<i32>) =
            expected.into_iter().partition(|key| *key <= pivot);

        let (left, right) = tree.split(pivot);
        prop_assert!(left.validate_invariant());
        prop_assert!(right.validate_invariant());
        prop_assert_eq!(left.size() + right.size(), size);
        prop_assert_eq!(left.traverse(Order::Inorder), expected_left);
        prop_assert_eq!(right.traverse(Order::Inorder), expected_right);
    }

    #[test]
    fn prop_split_halves_stay_usable(
        keys in tree_strategy(),
        pivot in 0i32..=210,
        extra in tree_strategy(),
    ) {
        let (mut left, mut right) = AvlTree::try_from_iter(keys).unwrap().split(pivot);
        for key in extra {
            if key <= pivot {
                left.insert(key).unwrap();
                left.remove(&key);
            } else {
                right.insert(key).unwrap();
            }
        }
        prop_assert!(left.validate_invariant());
        prop_assert!(right.validate_invariant());
    }

    #[test]
    fn prop_merge_is_multiset_union(a in tree_strategy(), b in tree_strategy()) {
        let mut tree = AvlTree::try_from_iter(a.iter().copied()).unwrap();
        let other = AvlTree::try_from_iter(b.iter().copied()).unwrap();
        let other_before = other.traverse(Order::Inorder);

        tree.merge(&other);

        let mut expected: Vec<i32> = a.iter().chain(b.iter()).copied().collect();
        expected.sort();
        prop_assert!(tree.validate_invariant());
        prop_assert_eq!(tree.traverse(Order::Inorder), expected);
        prop_assert_eq!(other.traverse(Order::Inorder), other_before);
    }

    #[test]
    fn prop_copy_is_independent(keys in tree_strategy(), removals in tree_strategy()) {
        let tree = AvlTree::try_from_iter(keys).unwrap();
        let snapshot = tree.nodes();
        let mut copy = tree.copy();
        prop_assert_eq!(copy.nodes(), snapshot.clone());

        for key in removals {
            copy.remove(&key);
        }
        prop_assert!(copy.validate_invariant());
        prop_assert_eq!(tree.nodes(), snapshot);
    }

    #[test]
    fn prop_table_matches_model(ops in table_ops_strategy()) {
        let mut table = HashTable::new();
        let mut model: HashMap<u16, u32> = HashMap::new();

        for op in ops {
            match op {
                TableOp::Put(key, value) => {
                    prop_assert_eq!(table.put(key, value), model.insert(key, value));
                }
                TableOp::Remove(key) => {
                    prop_assert_eq!(table.remove(&key).ok(), model.remove(&key));
                }
                TableOp::Get(key) => {
                    prop_assert_eq!(table.get(&key).ok(), model.get(&key));
                    prop_assert_eq!(table.contains(&key), model.contains_key(&key));
                }
            }
            prop_assert_eq!(table.len(), model.len());
            prop_assert!(table.len() as f64 <= table.capacity() as f64 * 0.75);
        }

        let mut keys: Vec<u16> = table.keys().copied().collect();
        keys.sort();
        let mut expected: Vec<u16> = model.keys().copied().collect();
        expected.sort();
        prop_assert_eq!(keys, expected);
    }
}
