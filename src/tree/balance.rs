//! Balancing primitives shared by every mutating tree operation.
//!
//! Every function takes ownership of a subtree root and hands back the root
//! that the caller links into the parent, so no parent pointers are needed.

use std::cmp;

use super::node::{Link, Node};

/// Height of the subtree behind `link`, 0 for an empty link.
#[inline]
pub(crate) fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Number of logical elements behind `link`, duplicates included.
#[inline]
pub(crate) fn effective_size<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.effective_size())
}

/// Recomputes height and size from the node's current children.
/// Must run after any child link changed and before an ancestor reads the node.
#[inline]
pub(crate) fn update<K>(node: &mut Node<K>) {
    node.height = cmp::max(height(&node.left), height(&node.right)) + 1;
    node.size = effective_size(&node.left) + effective_size(&node.right) + 1;
}

#[inline]
pub(crate) fn balance_factor<K>(node: &Node<K>) -> isize {
    height(&node.left) as isize - height(&node.right) as isize
}

//     y        x
//    / \      / \
//   x   c -> a   y
//  / \          / \
// a   b        b   c
pub(crate) fn rotate_right<K>(mut y: Box<Node<K>>) -> Box<Node<K>> {
    match y.left.take() {
        None => y,
        Some(mut x) => {
            y.left = x.right.take();
            update(&mut y);
            x.right = Some(y);
            update(&mut x);
            x
        }
    }
}

//   x            y
//  / \          / \
// a   y   ->   x   c
//    / \      / \
//   b   c    a   b
pub(crate) fn rotate_left<K>(mut x: Box<Node<K>>) -> Box<Node<K>> {
    match x.right.take() {
        None => x,
        Some(mut y) => {
            x.right = y.left.take();
            update(&mut x);
            y.left = Some(x);
            update(&mut y);
            y
        }
    }
}

/// Restores the AVL condition at `node` after one of its subtrees changed,
/// adjusting height and size on the way.
/// Handles the left-right and right-left cases with a preparatory rotation
/// of the heavy child.
pub(crate) fn balance<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    update(&mut node);
    let factor = balance_factor(&node);
    if factor > 1 {
        // Rebalance right
        if let Some(left) = node.left.take() {
            node.left = Some(if balance_factor(&left) < 0 {
                rotate_left(left)
            } else {
                left
            });
        }
        rotate_right(node)
    } else if factor < -1 {
        // Rebalance left
        if let Some(right) = node.right.take() {
            node.right = Some(if balance_factor(&right) > 0 {
                rotate_right(right)
            } else {
                right
            });
        }
        rotate_left(node)
    } else {
        node
    }
}

/// Balances every node of the subtree in post-order, children before parents.
///
/// Both children of a node are valid AVL trees by the time the node is
/// visited, but their heights may differ by more than a single rotation can
/// repair, so the node is re-linked with [`join`].
pub(crate) fn rebalance_all<K>(link: Link<K>) -> Link<K> {
    let mut node = link?;
    let left = rebalance_all(node.left.take());
    let right = rebalance_all(node.right.take());
    Some(join(left, node, right))
}

/// Links two valid AVL trees below `mid`, where every key of `left` is
/// smaller and every key of `right` is greater than `mid.key`.
/// Runs in O(|height(left) - height(right)|).
pub(crate) fn join<K>(left: Link<K>, mut mid: Box<Node<K>>, right: Link<K>) -> Box<Node<K>> {
    let (left_height, right_height) = (height(&left), height(&right));
    match (left, right) {
        (Some(left), right) if left_height > right_height + 1 => join_right(left, mid, right),
        (left, Some(right)) if right_height > left_height + 1 => join_left(left, mid, right),
        (left, right) => {
            mid.left = left;
            mid.right = right;
            update(&mut mid);
            mid
        }
    }
}

// Descends the right spine of the taller `left` tree until the subtree there
// is at most one level taller than `right`, links `mid` in and balances on
// the way back up.
fn join_right<K>(mut left: Box<Node<K>>, mut mid: Box<Node<K>>, right: Link<K>) -> Box<Node<K>> {
    let spine = left.right.take();
    if height(&spine) <= height(&right) + 1 {
        mid.left = spine;
        mid.right = right;
        update(&mut mid);
        left.right = Some(mid);
    } else if let Some(spine) = spine {
        left.right = Some(join_right(spine, mid, right));
    }
    balance(left)
}

fn join_left<K>(left: Link<K>, mut mid: Box<Node<K>>, mut right: Box<Node<K>>) -> Box<Node<K>> {
    let spine = right.left.take();
    if height(&spine) <= height(&left) + 1 {
        mid.left = left;
        mid.right = spine;
        update(&mut mid);
        right.left = Some(mid);
    } else if let Some(spine) = spine {
        right.left = Some(join_left(left, mid, spine));
    }
    balance(right)
}
