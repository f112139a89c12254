use compare::Compare;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::ops::Bound;
use self::pending::{Pending, Taken};
use super::{Link, Node};

/// A handle on a tree node that a traversal can split into its entry and its children.
///
/// Borrowed handles leave the tree intact. Owned handles tear it down as they go.
pub trait Handle: Sized {
    type Key;
    type Entry;
    fn key(&self) -> &Self::Key;
    fn into_entry(self) -> Self::Entry;
    fn take_left(&mut self) -> Option<Self>;
    fn take_right(&mut self) -> Option<Self>;
}

impl<'a, K, V, B> Handle for &'a Node<K, V, B> {
    type Key = K;
    type Entry = (&'a K, &'a V);

    fn key(&self) -> &K { &self.key }

    fn into_entry(self) -> (&'a K, &'a V) { self.key_value() }

    fn take_left(&mut self) -> Option<&'a Node<K, V, B>> {
        let node: &'a Node<K, V, B> = *self;
        node.left.as_deref()
    }

    fn take_right(&mut self) -> Option<&'a Node<K, V, B>> {
        let node: &'a Node<K, V, B> = *self;
        node.right.as_deref()
    }
}

impl<K, V, B> Handle for Box<Node<K, V, B>> {
    type Key = K;
    type Entry = (K, V);

    fn key(&self) -> &K { &self.key }

    fn into_entry(self) -> (K, V) {
        let Node { key, value, .. } = *self;
        (key, value)
    }

    fn take_left(&mut self) -> Link<K, V, B> { self.left.take() }

    fn take_right(&mut self) -> Link<K, V, B> { self.right.take() }
}

/// An in-order traversal over a deque of partially expanded nodes.
///
/// Ascending iteration expands and yields from the back of the deque, descending iteration from
/// the front, so both ends can be consumed independently. `remaining` is exact for a full
/// traversal and an upper bound once a range has trimmed the deque.
#[derive(Clone)]
pub struct Iter<N> where N: Handle {
    pending: VecDeque<Pending<N>>,
    remaining: usize,
}

/// One move of the traversal at an end of the deque.
enum Step<N> {
    /// Push the child, if there is one, and keep going.
    Descend(Option<N>),
    /// Yield or drop the end node, replacing it with its other child, if any.
    Emit(Option<N>),
    /// Yield or drop the end node, whose children are both already taken.
    Retire,
}

fn endpoint<T>(bound: Bound<T>) -> Option<(T, bool)> {
    match bound {
        Bound::Included(at) => Some((at, true)),
        Bound::Excluded(at) => Some((at, false)),
        Bound::Unbounded => None,
    }
}

impl<N> Iter<N> where N: Handle {
    pub fn new(root: Option<N>, len: usize) -> Iter<N> {
        Iter { pending: root.into_iter().map(Pending::new).collect(), remaining: len }
    }

    /// Creates a traversal restricted to the keys lying between `min` and `max`.
    ///
    /// Each bound walks its own end of the deque down to the boundary key, dropping the nodes
    /// (and, on the way, the subtrees) that fall outside.
    pub fn range<C, Min: ?Sized, Max: ?Sized>(root: Option<N>, len: usize, cmp: &C,
                                              min: Bound<&Min>, max: Bound<&Max>)
        -> Iter<N> where C: Compare<Min, N::Key> + Compare<Max, N::Key> {

        let mut it = Iter::new(root, len);

        if let Some((min, inclusive)) = endpoint(min) {
            while let Some(end) = it.pending.back_mut() {
                let (step, last) = match cmp.compare(min, end.key()) {
                    Ordering::Less => (Step::Descend(end.take_left()), false),
                    Ordering::Greater => (Step::Emit(end.take_right()), false),
                    Ordering::Equal if inclusive => {
                        if end.take_left().is_some() { it.remaining -= 1; }
                        break;
                    }
                    Ordering::Equal => (Step::Emit(end.take_right()), true),
                };

                if !it.trim_back(step) || last { break; }
            }
        }

        if let Some((max, inclusive)) = endpoint(max) {
            while let Some(end) = it.pending.front_mut() {
                let (step, last) = match cmp.compare(max, end.key()) {
                    Ordering::Greater => (Step::Descend(end.take_right()), false),
                    Ordering::Less => (Step::Emit(end.take_left()), false),
                    Ordering::Equal if inclusive => {
                        if end.take_right().is_some() { it.remaining -= 1; }
                        break;
                    }
                    Ordering::Equal => (Step::Emit(end.take_left()), true),
                };

                if !it.trim_front(step) || last { break; }
            }
        }

        it
    }

    // Drops out-of-range nodes from the back, returning whether the walk can continue.
    fn trim_back(&mut self, step: Step<N>) -> bool {
        match step {
            Step::Descend(Some(child)) => { self.pending.push_back(Pending::new(child)); true }
            Step::Emit(child) => {
                self.pending.pop_back();
                self.remaining -= 1;
                self.pending.extend(child.map(Pending::new));
                true
            }
            Step::Descend(None) | Step::Retire => false,
        }
    }

    fn trim_front(&mut self, step: Step<N>) -> bool {
        match step {
            Step::Descend(Some(child)) => { self.pending.push_front(Pending::new(child)); true }
            Step::Emit(child) => {
                self.pending.pop_front();
                self.remaining -= 1;
                if let Some(child) = child { self.pending.push_front(Pending::new(child)); }
                true
            }
            Step::Descend(None) | Step::Retire => false,
        }
    }

    pub fn range_size_hint(&self) -> (usize, Option<usize>) {
        (self.pending.len(), Some(self.remaining))
    }
}

impl<N> Iterator for Iter<N> where N: Handle {
    type Item = N::Entry;

    fn next(&mut self) -> Option<N::Entry> {
        loop {
            let step = {
                let end = self.pending.back_mut()?;
                match end.taken() {
                    Taken::Neither | Taken::Right => Step::Descend(end.take_left()),
                    Taken::Left => Step::Emit(end.take_right()),
                    Taken::Both => Step::Retire,
                }
            };

            match step {
                Step::Descend(child) => self.pending.extend(child.map(Pending::new)),
                Step::Emit(child) => {
                    let end = self.pending.pop_back()?;
                    self.remaining -= 1;
                    self.pending.extend(child.map(Pending::new));
                    return Some(end.into_entry());
                }
                Step::Retire => {
                    self.remaining -= 1;
                    return self.pending.pop_back().map(Pending::into_entry);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<N> DoubleEndedIterator for Iter<N> where N: Handle {
    fn next_back(&mut self) -> Option<N::Entry> {
        loop {
            let step = {
                let end = self.pending.front_mut()?;
                match end.taken() {
                    Taken::Neither | Taken::Left => Step::Descend(end.take_right()),
                    Taken::Right => Step::Emit(end.take_left()),
                    Taken::Both => Step::Retire,
                }
            };

            match step {
                Step::Descend(child) =>
                    if let Some(child) = child { self.pending.push_front(Pending::new(child)); },
                Step::Emit(child) => {
                    let end = self.pending.pop_front()?;
                    self.remaining -= 1;
                    if let Some(child) = child { self.pending.push_front(Pending::new(child)); }
                    return Some(end.into_entry());
                }
                Step::Retire => {
                    self.remaining -= 1;
                    return self.pending.pop_front().map(Pending::into_entry);
                }
            }
        }
    }
}

impl<N> ExactSizeIterator for Iter<N> where N: Handle {}

mod pending {
    use super::Handle;

    /// A node on the traversal deque, with a record of which children were handed out.
    #[derive(Clone)]
    pub struct Pending<N> where N: Handle {
        node: N,
        taken: Taken,
    }

    impl<N> Pending<N> where N: Handle {
        pub fn new(node: N) -> Pending<N> { Pending { node, taken: Taken::Neither } }

        // Each child is handed out at most once.
        pub fn take_left(&mut self) -> Option<N> {
            self.taken = match self.taken {
                Taken::Neither => Taken::Left,
                Taken::Right => Taken::Both,
                Taken::Left | Taken::Both => return None,
            };
            self.node.take_left()
        }

        pub fn take_right(&mut self) -> Option<N> {
            self.taken = match self.taken {
                Taken::Neither => Taken::Right,
                Taken::Left => Taken::Both,
                Taken::Right | Taken::Both => return None,
            };
            self.node.take_right()
        }

        pub fn key(&self) -> &N::Key { self.node.key() }

        pub fn into_entry(self) -> N::Entry { self.node.into_entry() }

        pub fn taken(&self) -> Taken { self.taken }
    }

    #[derive(Clone, Copy)]
    pub enum Taken {
        Neither,
        Left,
        Right,
        Both,
    }
}
