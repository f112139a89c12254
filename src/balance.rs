//! Balancing policies for the tree's nodes.
//!
//! A policy owns a small piece of metadata on every node and decides how a node is repaired
//! after one of its subtrees changed. The descent, splice and traversal logic lives once in the
//! tree itself and is shared by every policy.

use log::trace;
use std::cmp;

/// The view of a tree node that a balancing policy works through.
///
/// Policies only read and write their own metadata, follow child links and ask for rotations.
pub trait Node {
    /// The policy metadata stored on the node.
    type Balance: Balance;

    /// Shared access to the metadata.
    fn balance(&self) -> &Self::Balance;
    /// Exclusive access to the metadata.
    fn balance_mut(&mut self) -> &mut Self::Balance;

    /// Left child.
    fn left(&self) -> Option<&Self>;
    /// Left child, mutably.
    fn left_mut(&mut self) -> Option<&mut Self>;
    /// Right child.
    fn right(&self) -> Option<&Self>;
    /// Right child, mutably.
    fn right_mut(&mut self) -> Option<&mut Self>;

    /// Promotes the right child into this position, demoting the current node to its left.
    ///
    /// Does nothing without a right child. Metadata is not updated.
    fn rotate_left(&mut self);

    /// Mirror image of [`Node::rotate_left`].
    fn rotate_right(&mut self);
}

/// Balance metadata for a single binary search tree node.
pub trait Balance: Clone + Default {
    /// Rebalances the given node after an insertion in one of its subtrees.
    fn rebalance_insert<N>(node: &mut N) where N: Node<Balance = Self>;

    /// Rebalances the given node after a removal in one of its subtrees.
    fn rebalance_remove<N>(node: &mut N) where N: Node<Balance = Self>;

    /// Returns the height of the subtree rooted at the given node, counted in nodes.
    ///
    /// The default implementation walks the whole subtree.
    fn subtree_height<N>(node: &N) -> usize where N: Node<Balance = Self> {
        let left = node.left().map_or(0, |left| Self::subtree_height(left));
        let right = node.right().map_or(0, |right| Self::subtree_height(right));
        1 + cmp::max(left, right)
    }
}

/// Metadata for the AVL balance scheme: the height of the node's subtree, counted in nodes.
///
/// A leaf has height 1 and an absent child counts as 0. Every node keeps the heights of its two
/// subtrees within one of each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Avl(usize);

impl Avl {
    /// Returns the cached height of the node's subtree.
    pub fn height(&self) -> usize { self.0 }

    fn height_of<N>(node: Option<&N>) -> usize where N: Node<Balance = Self> {
        node.map_or(0, |node| node.balance().0)
    }

    /// Returns the difference between the heights of the node's left and right subtrees.
    pub fn balance_factor<N>(node: &N) -> isize where N: Node<Balance = Self> {
        Self::height_of(node.left()) as isize - Self::height_of(node.right()) as isize
    }

    /// Recomputes the node's height from its children's cached heights.
    fn refresh<N>(node: &mut N) where N: Node<Balance = Self> {
        let height = 1 + cmp::max(Self::height_of(node.left()), Self::height_of(node.right()));
        node.balance_mut().0 = height;
    }

    fn rotate_right<N>(node: &mut N) where N: Node<Balance = Self> {
        node.rotate_right();
        // the demoted node is now the right child and must be refreshed first
        if let Some(right) = node.right_mut() { Self::refresh(right); }
        Self::refresh(node);
    }

    fn rotate_left<N>(node: &mut N) where N: Node<Balance = Self> {
        node.rotate_left();
        if let Some(left) = node.left_mut() { Self::refresh(left); }
        Self::refresh(node);
    }

    // Case selection reads the child's current balance factor, after insertions and removals
    // alike.
    fn rebalance<N>(node: &mut N) where N: Node<Balance = Self> {
        Self::refresh(node);
        let factor = Self::balance_factor(node);

        if factor > 1 {
            if node.left().map_or(0, |left| Self::balance_factor(left)) < 0 {
                trace!("avl: left-right rotation at balance factor {}", factor);
                if let Some(left) = node.left_mut() { Self::rotate_left(left); }
            } else {
                trace!("avl: right rotation at balance factor {}", factor);
            }

            Self::rotate_right(node);
        } else if factor < -1 {
            if node.right().map_or(0, |right| Self::balance_factor(right)) > 0 {
                trace!("avl: right-left rotation at balance factor {}", factor);
                if let Some(right) = node.right_mut() { Self::rotate_right(right); }
            } else {
                trace!("avl: left rotation at balance factor {}", factor);
            }

            Self::rotate_left(node);
        }
    }
}

impl Default for Avl {
    fn default() -> Self { Avl(1) }
}

impl Balance for Avl {
    fn rebalance_insert<N>(node: &mut N) where N: Node<Balance = Self> { Self::rebalance(node); }

    fn rebalance_remove<N>(node: &mut N) where N: Node<Balance = Self> { Self::rebalance(node); }

    fn subtree_height<N>(node: &N) -> usize where N: Node<Balance = Self> { node.balance().0 }
}

/// Metadata for the AA balance scheme: the node's level.
///
/// An AA tree is a red-black tree whose red nodes may only hang to the right, so a left child
/// always sits one level below its parent. Heights are not cached and
/// [`Balance::subtree_height`] walks the subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aa(usize);

impl Aa {
    /// Returns the node's level. Leaves are at level 1.
    pub fn level(&self) -> usize { self.0 }

    fn level_of<N>(node: Option<&N>) -> usize where N: Node<Balance = Self> {
        node.map_or(0, |node| node.balance().0)
    }

    // A left child on the parent's own level is rotated up.
    fn skew<N>(node: &mut N) where N: Node<Balance = Self> {
        let level = node.balance().0;
        if Self::level_of(node.left()) != level { return; }

        trace!("aa: skew at level {}", level);
        node.rotate_right();
    }

    // Two consecutive right children on one level: the middle one moves up a level.
    fn split<N>(node: &mut N) where N: Node<Balance = Self> {
        let level = node.balance().0;
        if Self::level_of(node.right().and_then(N::right)) != level { return; }

        trace!("aa: split at level {}", level);
        node.rotate_left();
        node.balance_mut().0 += 1;
    }
}

impl Default for Aa {
    fn default() -> Self { Aa(1) }
}

impl Balance for Aa {
    fn rebalance_insert<N>(node: &mut N) where N: Node<Balance = Self> {
        Self::skew(node);
        Self::split(node);
    }

    fn rebalance_remove<N>(node: &mut N) where N: Node<Balance = Self> {
        let level = node.balance().0;
        let target = cmp::min(Self::level_of(node.left()), Self::level_of(node.right())) + 1;
        if target >= level { return; }

        // Drop the node to one above its lower child, capping a taller right child likewise.
        node.balance_mut().0 = target;
        if let Some(right) = node.right_mut() {
            if right.balance().0 > target { right.balance_mut().0 = target; }
        }

        Self::skew(node);
        if let Some(right) = node.right_mut() {
            Self::skew(right);
            if let Some(grandchild) = right.right_mut() { Self::skew(grandchild); }
        }

        Self::split(node);
        if let Some(right) = node.right_mut() { Self::split(right); }
    }
}
