//! An ordered multiset implemented with an AVL tree, and an open-chaining hash table.
//!
//! [`AvlTree`] keeps positive scalar keys sorted, counts duplicates per key and
//! supports splitting at a pivot key and merging two trees.
//! [`HashTable`] is an associative array whose bucket count doubles when the
//! load factor is exceeded.
//!
//! ```
//! use avl_multiset::{AvlTree, HashTable, Order};
//!
//! let tree = AvlTree::try_from_iter([10, 20, 30, 40, 50, 25, 5, 5]).unwrap();
//! assert_eq!(tree.min(), Ok(5));
//! let (small, large) = tree.split(25);
//! assert_eq!(small.traverse(Order::Inorder), vec![5, 5, 10, 20, 25]);
//! assert_eq!(large.traverse(Order::Inorder), vec![30, 40, 50]);
//!
//! let mut table = HashTable::new();
//! table.put(1, "one");
//! assert_eq!(table[&1], "one");
//! ```

mod error;
mod key;
mod tree;

pub mod table;

pub use error::{Error, Result};
pub use key::Key;
pub use table::{HashTable, TableOptions};
pub use tree::{AvlTree, NodeView, Order};


#[cfg(test)]
mod proptests;
