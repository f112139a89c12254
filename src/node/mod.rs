mod iter;


use compare::Compare;
use std::cmp::Ordering::*;
use std::mem::{replace, swap};
use super::balance::{self, Balance};

pub use self::iter::Iter;

pub type Link<K, V, B> = Option<Box<Node<K, V, B>>>;

#[derive(Clone)]
pub struct Node<K, V, B> {
    left: Link<K, V, B>,
    right: Link<K, V, B>,
    balance: B,
    key: K,
    value: V,
}

impl<K, V, B> Node<K, V, B> where B: Balance {
    fn new(key: K, value: V) -> Self {
        Node { left: None, right: None, balance: B::default(), key, value }
    }
}

impl<K, V, B> Node<K, V, B> {
    pub fn value_mut(&mut self) -> &mut V { &mut self.value }

    pub fn key_value(&self) -> (&K, &V) { (&self.key, &self.value) }
}

impl<K, V, B> balance::Node for Box<Node<K, V, B>> where B: Balance {
    type Balance = B;

    fn balance(&self) -> &B { &self.balance }

    fn balance_mut(&mut self) -> &mut B { &mut self.balance }

    fn left(&self) -> Option<&Self> { self.left.as_ref() }

    fn left_mut(&mut self) -> Option<&mut Self> { self.left.as_mut() }

    fn right(&self) -> Option<&Self> { self.right.as_ref() }

    fn right_mut(&mut self) -> Option<&mut Self> { self.right.as_mut() }

    fn rotate_left(&mut self) {
        if let Some(mut save) = self.right.take() {
            swap(&mut self.right, &mut save.left); // save.left now None
            swap(self, &mut save);
            self.left = Some(save);
        }
    }

    fn rotate_right(&mut self) {
        if let Some(mut save) = self.left.take() {
            swap(&mut self.left, &mut save.right); // save.right now None
            swap(self, &mut save);
            self.right = Some(save);
        }
    }
}

/// Inserts the key and value below the given link, rebalancing every node on the way back up.
///
/// If the key is already present, the tree is left untouched and the key and value are
/// returned.
pub fn insert<K, V, B, C>(link: &mut Link<K, V, B>, cmp: &C, key: K, value: V)
    -> Result<(), (K, V)> where B: Balance, C: Compare<K> {

    match *link {
        None => {
            *link = Some(Box::new(Node::new(key, value)));
            Ok(())
        }
        Some(ref mut node) => {
            match cmp.compare(&key, &node.key) {
                Equal => return Err((key, value)),
                Less => insert(&mut node.left, cmp, key, value)?,
                Greater => insert(&mut node.right, cmp, key, value)?,
            }

            B::rebalance_insert(node);
            Ok(())
        }
    }
}

/// Removes the key below the given link, rebalancing every node on the way back up.
pub fn remove<K, V, B, C, Q: ?Sized>(link: &mut Link<K, V, B>, cmp: &C, key: &Q)
    -> Option<(K, V)> where B: Balance, C: Compare<Q, K> {

    let key_value = match *link {
        None => None,
        Some(ref mut node) => match cmp.compare(key, &node.key) {
            Equal => return unlink(link),
            Less => remove(&mut node.left, cmp, key),
            Greater => remove(&mut node.right, cmp, key),
        },
    };

    if key_value.is_some() {
        if let Some(ref mut node) = *link { B::rebalance_remove(node); }
    }

    key_value
}

// Removes the node at the given link.
//
// A node with two children keeps its place and takes over its in-order successor's key and
// value; the successor's own node is unlinked from the right subtree instead.
fn unlink<K, V, B>(link: &mut Link<K, V, B>) -> Option<(K, V)> where B: Balance {
    match *link {
        None => None,
        Some(ref mut node) if node.left.is_some() && node.right.is_some() => {
            let (key, value) = Left::remove_extremum(&mut node.right)?;
            let key_value = (replace(&mut node.key, key), replace(&mut node.value, value));
            B::rebalance_remove(node);
            Some(key_value)
        }
        Some(_) => link.take().map(|node| {
            let node = *node;
            *link = node.left.or(node.right);
            (node.key, node.value)
        }),
    }
}

pub fn get<'a, K, V, B, C, Q: ?Sized>(link: &'a Link<K, V, B>, cmp: &C, key: &Q)
    -> Option<&'a Node<K, V, B>> where C: Compare<Q, K> {

    let mut link = link;

    while let Some(node) = link.as_deref() {
        link = match cmp.compare(key, &node.key) {
            Equal => return Some(node),
            Less => &node.left,
            Greater => &node.right,
        };
    }

    None
}

pub fn get_mut<'a, K, V, B, C, Q: ?Sized>(link: &'a mut Link<K, V, B>, cmp: &C, key: &Q)
    -> Option<&'a mut Node<K, V, B>> where C: Compare<Q, K> {

    match *link {
        None => None,
        Some(ref mut node) => match cmp.compare(key, &node.key) {
            Equal => Some(&mut **node),
            Less => get_mut(&mut node.left, cmp, key),
            Greater => get_mut(&mut node.right, cmp, key),
        },
    }
}

pub trait Dir: Sized {
    type Opposite: Dir<Opposite = Self>;

    fn left() -> bool;

    fn forward<K, V, B>(node: &Node<K, V, B>) -> &Link<K, V, B>;
    fn forward_mut<K, V, B>(node: &mut Node<K, V, B>) -> &mut Link<K, V, B>;

    fn extremum<K, V, B>(link: &Link<K, V, B>) -> Option<&Node<K, V, B>> {
        let mut node = link.as_deref()?;
        while let Some(child) = Self::forward(node).as_deref() { node = child; }
        Some(node)
    }

    fn remove_extremum<K, V, B>(link: &mut Link<K, V, B>) -> Option<(K, V)> where B: Balance {
        match *link {
            Some(ref mut node) if Self::forward(&**node).is_some() => {
                let key_value = Self::remove_extremum(Self::forward_mut(&mut **node));
                B::rebalance_remove(node);
                key_value
            }
            _ => link.take().map(|node| {
                let mut node = *node;
                *link = Self::Opposite::forward_mut(&mut node).take();
                (node.key, node.value)
            }),
        }
    }

    /// Finds the node closest to the given key in this direction: the predecessor for `Left`,
    /// the successor for `Right`. With `inc`, a node holding the key itself qualifies.
    fn closest<'a, K, V, B, C, Q: ?Sized>(link: &'a Link<K, V, B>, cmp: &C, key: &Q, inc: bool)
        -> Option<&'a Node<K, V, B>> where C: Compare<Q, K> {

        let mut link = link;
        let mut closest_ancstr = None;

        while let Some(node) = link.as_deref() {
            match cmp.compare(key, &node.key) {
                Equal => return
                    if inc {
                        Some(node)
                    } else if Self::forward(node).is_some() {
                        Self::Opposite::extremum(Self::forward(node))
                    } else {
                        closest_ancstr
                    },
                order => link =
                    if Self::left() == (order == Less) {
                        Self::forward(node)
                    } else {
                        closest_ancstr = Some(node);
                        Self::Opposite::forward(node)
                    },
            }
        }

        closest_ancstr
    }
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    fn left() -> bool { true }

    fn forward<K, V, B>(node: &Node<K, V, B>) -> &Link<K, V, B> { &node.left }
    fn forward_mut<K, V, B>(node: &mut Node<K, V, B>) -> &mut Link<K, V, B> { &mut node.left }
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    fn left() -> bool { false }

    fn forward<K, V, B>(node: &Node<K, V, B>) -> &Link<K, V, B> { &node.right }
    fn forward_mut<K, V, B>(node: &mut Node<K, V, B>) -> &mut Link<K, V, B> { &mut node.right }
}
