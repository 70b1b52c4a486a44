use std::fmt;
use std::str::FromStr;

use super::node::{Link, Node};
use crate::error::Error;

/// Depth-first visiting order for [`AvlTree::traverse`](crate::AvlTree::traverse).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    Preorder,
    #[default]
    Inorder,
    Postorder,
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preorder" => Ok(Order::Preorder),
            "inorder" => Ok(Order::Inorder),
            "postorder" => Ok(Order::Postorder),
            _ => Err(Error::UnknownOrder(s.to_string())),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::Preorder => "preorder",
            Order::Inorder => "inorder",
            Order::Postorder => "postorder",
        })
    }
}

/// Read-only snapshot of a single node, as handed to tree renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeView<K> {
    pub key: K,
    pub height: usize,
    pub size: usize,
    pub count: usize,
    pub left: Option<K>,
    pub right: Option<K>,
}

impl<K: Copy> NodeView<K> {
    fn of(node: &Node<K>) -> Self {
        NodeView {
            key: node.key,
            height: node.height,
            size: node.size,
            count: node.count,
            left: node.left.as_ref().map(|left| left.key),
            right: node.right.as_ref().map(|right| right.key),
        }
    }
}

pub(crate) fn traverse<Pre, In, Post, K>(
    link: &Link<K>,
    preorder: &mut Pre,
    inorder: &mut In,
    postorder: &mut Post,
) where
    Pre: FnMut(&Node<K>),
    In: FnMut(&Node<K>),
    Post: FnMut(&Node<K>),
{
    if let Some(node) = link {
        preorder(node);
        traverse(&node.left, preorder, inorder, postorder);
        inorder(node);
        traverse(&node.right, preorder, inorder, postorder);
        postorder(node);
    }
}

fn skip<K>(_: &Node<K>) {}

/// Collects keys in the given order, each repeated by its duplicate count.
pub(crate) fn collect_keys<K: Copy>(link: &Link<K>, order: Order) -> Vec<K> {
    let mut keys = Vec::with_capacity(super::balance::effective_size(link));
    let mut push = |node: &Node<K>| {
        keys.extend(std::iter::repeat(node.key).take(node.count));
    };
    match order {
        Order::Preorder => traverse(link, &mut push, &mut skip, &mut skip),
        Order::Inorder => traverse(link, &mut skip, &mut push, &mut skip),
        Order::Postorder => traverse(link, &mut skip, &mut skip, &mut push),
    }
    keys
}

pub(crate) fn collect_views<K: Copy>(link: &Link<K>) -> Vec<NodeView<K>> {
    let mut views = Vec::new();
    traverse(
        link,
        &mut |node: &Node<K>| views.push(NodeView::of(node)),
        &mut skip,
        &mut skip,
    );
    views
}
