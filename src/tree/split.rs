use tracing::debug;

use super::balance::{balance, rebalance_all};
use super::node::Link;
use super::walk::{self, Order};
use super::AvlTree;
use crate::key::Key;

impl<K: Key> AvlTree<K> {
    /// Splits the tree into two trees, the first holding every key less than
    /// or equal to `key`, the second every key greater than `key`.
    ///
    /// The nodes along the search path are cut and balanced on the way up,
    /// which leaves both halves stitched together from subtrees of unrelated
    /// heights. Both halves are therefore rebalanced node by node afterwards,
    /// which costs O(n).
    ///
    /// ```
    /// use avl_multiset::{AvlTree, Order};
    /// let tree = AvlTree::try_from_iter([5, 1, 9, 3, 3, 7]).unwrap();
    /// let (left, right) = tree.split(3);
    /// assert_eq!(left.traverse(Order::Inorder), vec![1, 3, 3]);
    /// assert_eq!(right.traverse(Order::Inorder), vec![5, 7, 9]);
    /// ```
    pub fn split(mut self, key: K) -> (AvlTree<K>, AvlTree<K>) {
        let (left, right) = Self::split_at(self.root.take(), &key);
        let left = AvlTree::from_root(rebalance_all(left));
        let right = AvlTree::from_root(rebalance_all(right));
        debug!(%key, left = left.size(), right = right.size(), "split tree");
        left.check_consistency();
        right.check_consistency();
        (left, right)
    }

    fn split_at(link: Link<K>, key: &K) -> (Link<K>, Link<K>) {
        let mut node = match link {
            None => return (None, None),
            Some(node) => node,
        };
        if *key < node.key {
            let (left, rest) = Self::split_at(node.left.take(), key);
            node.left = rest;
            (left, Some(balance(node)))
        } else {
            let (rest, right) = Self::split_at(node.right.take(), key);
            node.right = rest;
            (Some(balance(node)), right)
        }
    }

    /// Inserts every key of `other` into this tree, duplicates included.
    ///
    /// Runs in O(m log(n + m)) for a tree of n keys merged with m keys. `other`
    /// is left unchanged.
    pub fn merge(&mut self, other: &AvlTree<K>) {
        let keys = walk::collect_keys(&other.root, Order::Inorder);
        debug!(keys = keys.len(), into = self.size(), "merge trees");
        // Keys of `other` already passed the domain check of `insert`.
        for key in keys {
            self.root = Some(Self::insert_at(self.root.take(), key));
        }
        self.check_consistency();
    }

    /// Returns a deep copy of the tree that shares no node with it.
    pub fn copy(&self) -> AvlTree<K> {
        self.clone()
    }
}
