//! An ordered multiset implemented with an AVL tree.

use std::cmp::Ordering;

use tracing::trace;

use crate::error::{Error, Result};
use crate::key::Key;

mod balance;
mod node;
mod split;
mod walk;

use balance::{balance, effective_size, height};
use node::{Link, Node};

pub use walk::{NodeView, Order};

/// An ordered multiset of positive scalar keys implemented with an AVL tree.
///
/// Every key is stored once together with the number of times it was
/// inserted, so [`size`](AvlTree::size) counts duplicates while the tree
/// shape only depends on the distinct keys.
///
/// ```
/// use avl_multiset::{AvlTree, Order};
/// let mut tree = AvlTree::new();
/// for key in [3, 1, 2, 2] {
///     tree.insert(key).unwrap();
/// }
/// assert_eq!(tree.traverse(Order::Inorder), vec![1, 2, 2, 3]);
/// assert_eq!(tree.size(), 4);
/// tree.remove(&2);
/// assert_eq!(tree.count_of(&2), 1);
/// assert!(tree.insert(0).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct AvlTree<K: Key> {
    root: Link<K>,
}

impl<K: Key> AvlTree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Builds a tree by inserting every key, stopping at the first rejected one.
    pub fn try_from_iter<I: IntoIterator<Item = K>>(keys: I) -> Result<Self> {
        let mut tree = Self::new();
        for key in keys {
            tree.insert(key)?;
        }
        Ok(tree)
    }

    pub(crate) fn from_root(root: Link<K>) -> Self {
        Self { root }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree, duplicates included.
    pub fn size(&self) -> usize {
        effective_size(&self.root)
    }

    /// Same as [`size`](AvlTree::size).
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Returns the height of the tree, 0 for an empty tree and 1 for a single node.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Removes all keys, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Inserts a key. Inserting a key that is already present increments its count.
    ///
    /// Fails with [`Error::Domain`] if the key is not greater than zero, in which
    /// case the tree is left untouched.
    pub fn insert(&mut self, key: K) -> Result<()> {
        if !key.is_positive() {
            return Err(Error::Domain(key.to_string()));
        }
        self.root = Some(Self::insert_at(self.root.take(), key));
        self.check_consistency();
        Ok(())
    }

    /// Removes one occurrence of a key.
    /// Returns whether the key was present; removing an absent key is a no-op.
    pub fn remove(&mut self, key: &K) -> bool {
        let mut removed = false;
        self.root = Self::remove_at(self.root.take(), key, &mut removed);
        if !removed {
            trace!(%key, "remove: key not present");
        }
        self.check_consistency();
        removed
    }

    /// Returns whether the tree contains the key.
    pub fn search(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Same as [`search`](AvlTree::search).
    pub fn contains(&self, key: &K) -> bool {
        self.search(key)
    }

    /// Returns how many times the key has been inserted and not yet removed.
    pub fn count_of(&self, key: &K) -> usize {
        self.find(key).map_or(0, |node| node.count)
    }

    /// Returns the smallest key.
    pub fn min(&self) -> Result<K> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyTree)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(node.key)
    }

    /// Returns the largest key.
    pub fn max(&self) -> Result<K> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyTree)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(node.key)
    }

    /// Returns all keys in the given order.
    /// Each key is repeated as many times as it was inserted, so the inorder
    /// sequence is sorted and non-decreasing.
    pub fn traverse(&self, order: Order) -> Vec<K> {
        walk::collect_keys(&self.root, order)
    }

    /// Returns an iterator over the keys in ascending order, duplicates included.
    pub fn iter(&self) -> std::vec::IntoIter<K> {
        self.traverse(Order::Inorder).into_iter()
    }

    /// Returns a preorder snapshot of every node, for rendering the tree shape.
    pub fn nodes(&self) -> Vec<NodeView<K>> {
        walk::collect_views(&self.root)
    }

    /// Checks ordering, balance, height and size bookkeeping of every node.
    pub fn validate_invariant(&self) -> bool {
        Self::validate_at(&self.root, None, None)
    }

    fn find(&self, key: &K) -> Option<&Node<K>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    fn insert_at(link: Link<K>, key: K) -> Box<Node<K>> {
        let mut node = match link {
            None => return Node::create(key),
            Some(node) => node,
        };
        match key.cmp(&node.key) {
            Ordering::Less => node.left = Some(Self::insert_at(node.left.take(), key)),
            Ordering::Greater => node.right = Some(Self::insert_at(node.right.take(), key)),
            Ordering::Equal => {
                // Only the count changes; ancestors read it through the effective size.
                node.count += 1;
                trace!(%key, count = node.count, "insert: duplicate key");
                return node;
            }
        }
        balance(node)
    }

    fn remove_at(link: Link<K>, key: &K, removed: &mut bool) -> Link<K> {
        let mut node = link?;
        match key.cmp(&node.key) {
            Ordering::Less => node.left = Self::remove_at(node.left.take(), key, removed),
            Ordering::Greater => node.right = Self::remove_at(node.right.take(), key, removed),
            Ordering::Equal => {
                *removed = true;
                if node.count > 1 {
                    node.count -= 1;
                    return Some(node);
                }
                match (node.left.take(), node.right.take()) {
                    (None, child) | (child, None) => return child,
                    (left, Some(right)) => {
                        // Take over the in-order successor's key and count, then unlink it.
                        let (successor, rest) = Self::take_min(right);
                        node.key = successor.key;
                        node.count = successor.count;
                        node.left = left;
                        node.right = rest;
                    }
                }
            }
        }
        Some(balance(node))
    }

    // Detaches the leftmost node of the subtree and returns it together with
    // the rebalanced remainder.
    fn take_min(mut node: Box<Node<K>>) -> (Box<Node<K>>, Link<K>) {
        match node.left.take() {
            None => {
                let rest = node.right.take();
                (node, rest)
            }
            Some(left) => {
                let (min, rest) = Self::take_min(left);
                node.left = rest;
                (min, Some(balance(node)))
            }
        }
    }

    fn validate_at(link: &Link<K>, lower: Option<K>, upper: Option<K>) -> bool {
        let node = match link {
            None => return true,
            Some(node) => node,
        };
        if lower.is_some_and(|lower| node.key <= lower)
            || upper.is_some_and(|upper| node.key >= upper)
        {
            return false;
        }
        if balance::balance_factor(node).abs() > 1 {
            return false;
        }
        if node.height != height(&node.left).max(height(&node.right)) + 1 {
            return false;
        }
        if node.size != effective_size(&node.left) + effective_size(&node.right) + 1 {
            return false;
        }
        if node.count == 0 {
            return false;
        }
        Self::validate_at(&node.left, lower, Some(node.key))
            && Self::validate_at(&node.right, Some(node.key), upper)
    }

    #[cfg(feature = "consistency_check")]
    fn check_consistency(&self) {
        debug_assert!(self.validate_invariant());
    }

    #[cfg(not(feature = "consistency_check"))]
    #[inline(always)]
    fn check_consistency(&self) {}
}

impl<K: Key> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K: Key> IntoIterator for &'a AvlTree<K> {
    type Item = K;
    type IntoIter = std::vec::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
