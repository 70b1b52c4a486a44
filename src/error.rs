use thiserror::Error;

/// Errors reported by the tree and the hash table.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A key outside the tree's domain was offered for insertion.
    #[error("key must be greater than 0, got {0}")]
    Domain(String),

    /// `min` or `max` was called on a tree without elements.
    #[error("the AVL tree is empty")]
    EmptyTree,

    /// The hash table holds no entry for the key.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A traversal order name was not one of `preorder`, `inorder` or `postorder`.
    #[error("unknown traversal order '{0}'")]
    UnknownOrder(String),

    #[error("invalid table options: {0}")]
    InvalidOptions(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
