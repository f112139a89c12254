//! An ordered map based on a self-balancing binary search tree.

use compare::{Compare, Natural};
use log::debug;
use std::fmt::{self, Debug};
use std::iter::FromIterator;
use std::mem;
use std::ops::Bound;
use super::balance::{Avl, Balance};
use super::error::DuplicateKey;
use super::node::{self, Dir, Left, Node, Right};

/// An ordered map based on a self-balancing binary search tree.
///
/// Entries are kept sorted by the comparator `C` (the keys' `Ord` implementation unless one is
/// given) and the tree is kept balanced by the policy `B` (AVL unless one is given). Every
/// lookup, insertion and removal walks a single root-to-leaf path.
///
/// A key whose ordering relative to the other keys changes while it is stored, through interior
/// mutability or unsafe code, leaves the map in an unspecified but memory-safe state.
///
/// # Examples
///
/// ```
/// let mut services = avl_index::Map::new();
///
/// services.insert(443, "https");
/// services.insert(22, "ssh");
/// services.insert(80, "http");
///
/// assert_eq!(services.get(&80), Some(&"http"));
/// assert_eq!(services.succ(&100, false), Some((&443, &"https")));
/// assert_eq!(services.iter().map(|e| *e.0).collect::<Vec<_>>(), [22, 80, 443]);
/// ```
#[derive(Clone)]
pub struct Map<K, V, C = Natural<K>, B = Avl> where C: Compare<K>, B: Balance {
    root: node::Link<K, V, B>,
    len: usize,
    cmp: C,
}

impl<K, V> Map<K, V> where K: Ord {
    /// Creates an empty map ordered by `K`'s `Ord` implementation.
    ///
    /// ```
    /// let map = avl_index::Map::<String, u32>::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self { Map::with_cmp(compare::natural()) }
}

impl<K, V, C> Map<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered by the given comparator.
    ///
    /// Any `Compare` implementation works, including closures and the adaptors the `compare`
    /// crate provides.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut scores = avl_index::Map::with_cmp(natural().rev());
    ///
    /// scores.insert(71, "carol");
    /// scores.insert(93, "alice");
    /// scores.insert(85, "bob");
    ///
    /// let ranking: Vec<_> = scores.iter().map(|e| *e.1).collect();
    /// assert_eq!(ranking, ["alice", "bob", "carol"]);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { Map::with_balance(cmp) }
}

impl<K, V, C, B> Map<K, V, C, B> where C: Compare<K>, B: Balance {
    /// Creates an empty map ordered by the given comparator and balanced by the policy `B`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::{Aa, Map};
    ///
    /// let mut map: Map<_, _, _, Aa> = Map::with_balance(compare::natural());
    /// map.extend((0..64).map(|i| (i, i * i)));
    ///
    /// assert_eq!(map.get(&12), Some(&144));
    /// assert_eq!(map.len(), 64);
    /// ```
    pub fn with_balance(cmp: C) -> Self { Map { root: None, len: 0, cmp } }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize { self.len }

    /// Returns the height of the map's tree, counted in nodes, or `0` if the map is empty.
    ///
    /// Under the AVL policy this reads a cached value; other policies may walk the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = avl_index::Map::new();
    /// assert_eq!(map.height(), 0);
    ///
    /// map.insert(1, ());
    /// assert_eq!(map.height(), 1);
    ///
    /// // Ascending insertions are rotated into shape instead of forming a chain.
    /// map.extend((2..=7).map(|i| (i, ())));
    /// assert_eq!(map.len(), 7);
    /// assert_eq!(map.height(), 3);
    /// ```
    pub fn height(&self) -> usize { self.root.as_ref().map_or(0, |root| B::subtree_height(root)) }

    /// Returns the map's comparator.
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let map: avl_index::Map<u8, (), _> = avl_index::Map::with_cmp(natural().rev());
    /// assert!(map.cmp().compares_lt(&9, &1));
    /// ```
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Drops every entry, leaving the map empty.
    pub fn clear(&mut self) {
        debug!("clearing map of {} entries", self.len);
        self.root = None;
        self.len = 0;
    }

    /// Inserts an entry, returning `true` if the key was not yet present.
    ///
    /// A key that is already present keeps its value: the map is left untouched and the given
    /// key and value are dropped. [`try_insert`](Map::try_insert) hands them back instead and
    /// [`replace`](Map::replace) overwrites the stored value.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut owners = avl_index::Map::new();
    ///
    /// assert!(owners.insert("/var/log", "root"));
    /// assert!(!owners.insert("/var/log", "nobody"));
    /// assert_eq!(owners.get(&"/var/log"), Some(&"root"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let inserted = node::insert(&mut self.root, &self.cmp, key, value).is_ok();
        if inserted { self.len += 1; }
        inserted
    }

    /// Inserts an entry, failing if the key is already present.
    ///
    /// On failure the map is left unchanged and the error carries the rejected key and value.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut owners = avl_index::Map::new();
    /// owners.try_insert("/home", "root").unwrap();
    ///
    /// let err = owners.try_insert("/home", "alice").unwrap_err();
    /// assert_eq!(err.to_string(), "duplicate key \"/home\"");
    /// assert_eq!(err.into_inner(), ("/home", "alice"));
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), DuplicateKey<K, V>>
        where K: Debug, V: Debug {

        match node::insert(&mut self.root, &self.cmp, key, value) {
            Ok(()) => {
                self.len += 1;
                Ok(())
            }
            Err((key, value)) => {
                debug!("rejected duplicate key {:?}", key);
                Err(DuplicateKey { key, value })
            }
        }
    }

    /// Inserts an entry, overwriting and returning the value already stored under the key.
    ///
    /// The stored key itself is kept; only its value changes.
    ///
    /// ```
    /// let mut hits = avl_index::Map::new();
    ///
    /// assert_eq!(hits.replace("/index.html", 1), None);
    /// assert_eq!(hits.replace("/index.html", 2), Some(1));
    /// assert_eq!(hits.len(), 1);
    /// ```
    pub fn replace(&mut self, key: K, value: V) -> Option<V> {
        match node::insert(&mut self.root, &self.cmp, key, value) {
            Ok(()) => {
                self.len += 1;
                None
            }
            Err((key, value)) => self.get_mut(&key).map(|old| mem::replace(old, value)),
        }
    }

    // Accounts for an entry that was unlinked from the tree.
    fn unlinked(&mut self, entry: Option<(K, V)>) -> Option<(K, V)> {
        if entry.is_some() { self.len -= 1; }
        entry
    }

    /// Removes the entry whose key equals the given one, returning it if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: avl_index::Map<_, _> = (1..=4).map(|i| (i, i * 10)).collect();
    ///
    /// assert_eq!(map.remove(&2), Some((2, 20)));
    /// assert_eq!(map.remove(&2), None);
    /// assert_eq!(map.len(), 3);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)> where C: Compare<Q, K> {
        let entry = node::remove(&mut self.root, &self.cmp, key);
        self.unlinked(entry)
    }

    /// Returns `true` if the map holds the given key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.get(key).is_some()
    }

    /// Returns the value stored under the given key.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        node::get(&self.root, &self.cmp, key).map(|node| node.key_value().1)
    }

    /// Returns a mutable reference to the value stored under the given key.
    ///
    /// ```
    /// let mut counts = avl_index::Map::new();
    ///
    /// for word in "to be or not to be".split(' ') {
    ///     match counts.get_mut(&word) {
    ///         Some(count) => *count += 1,
    ///         None => { counts.insert(word, 1); }
    ///     }
    /// }
    ///
    /// assert_eq!(counts.get(&"be"), Some(&2));
    /// assert_eq!(counts.get(&"or"), Some(&1));
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        node::get_mut(&mut self.root, &self.cmp, key).map(Node::value_mut)
    }

    /// Returns the entry with the greatest key, or `None` if the map is empty.
    pub fn max(&self) -> Option<(&K, &V)> { Right::extremum(&self.root).map(Node::key_value) }

    /// Returns the entry with the least key, or `None` if the map is empty.
    ///
    /// ```
    /// let mut map = avl_index::Map::new();
    /// assert_eq!(map.min(), None);
    ///
    /// map.extend(vec![("kiwi", 3), ("apple", 5), ("pear", 1)]);
    /// assert_eq!(map.min(), Some((&"apple", &5)));
    /// assert_eq!(map.max(), Some((&"pear", &1)));
    /// ```
    pub fn min(&self) -> Option<(&K, &V)> { Left::extremum(&self.root).map(Node::key_value) }

    /// Removes and returns the entry with the greatest key, or `None` if the map is empty.
    pub fn remove_max(&mut self) -> Option<(K, V)> {
        let entry = Right::remove_extremum(&mut self.root);
        self.unlinked(entry)
    }

    /// Removes and returns the entry with the least key, or `None` if the map is empty.
    ///
    /// ```
    /// let mut queue: avl_index::Map<_, _> = vec![(30, 'c'), (10, 'a'), (20, 'b')]
    ///     .into_iter().collect();
    ///
    /// assert_eq!(queue.remove_min(), Some((10, 'a')));
    /// assert_eq!(queue.remove_min(), Some((20, 'b')));
    /// assert_eq!(queue.len(), 1);
    /// ```
    pub fn remove_min(&mut self) -> Option<(K, V)> {
        let entry = Left::remove_extremum(&mut self.root);
        self.unlinked(entry)
    }

    /// Returns the entry whose key is the in-order predecessor of the given key.
    ///
    /// That is the greatest key strictly below the given one or, when `inclusive` is `true`,
    /// the greatest key at most equal to it. The given key need not be stored in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let releases: avl_index::Map<_, _> =
    ///     vec![(2015, "1.0"), (2018, "2018"), (2021, "2021")].into_iter().collect();
    ///
    /// assert_eq!(releases.pred(&2020, false), Some((&2018, &"2018")));
    /// assert_eq!(releases.pred(&2018, false), Some((&2015, &"1.0")));
    /// assert_eq!(releases.pred(&2018, true), Some((&2018, &"2018")));
    /// assert_eq!(releases.pred(&2015, false), None);
    /// ```
    pub fn pred<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
        where C: Compare<Q, K> {

        Left::closest(&self.root, &self.cmp, key, inclusive).map(Node::key_value)
    }

    /// Returns the entry whose key is the in-order successor of the given key.
    ///
    /// That is the least key strictly above the given one or, when `inclusive` is `true`, the
    /// least key at least equal to it. The given key need not be stored in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let releases: avl_index::Map<_, _> =
    ///     vec![(2015, "1.0"), (2018, "2018"), (2021, "2021")].into_iter().collect();
    ///
    /// assert_eq!(releases.succ(&2016, false), Some((&2018, &"2018")));
    /// assert_eq!(releases.succ(&2018, false), Some((&2021, &"2021")));
    /// assert_eq!(releases.succ(&2018, true), Some((&2018, &"2018")));
    /// assert_eq!(releases.succ(&2021, false), None);
    /// ```
    pub fn succ<Q: ?Sized>(&self, key: &Q, inclusive: bool) -> Option<(&K, &V)>
        where C: Compare<Q, K> {

        Right::closest(&self.root, &self.cmp, key, inclusive).map(Node::key_value)
    }

    /// Returns an in-order iterator over the map's entries.
    ///
    /// ```
    /// let map: avl_index::Map<_, _> = "cab".chars().zip(1..).collect();
    ///
    /// let keys: String = map.iter().map(|e| *e.0).collect();
    /// assert_eq!(keys, "abc");
    /// assert_eq!(map.iter().rev().next(), Some((&'c', &1)));
    /// ```
    pub fn iter(&self) -> Iter<K, V, B> { Iter(node::Iter::new(self.root.as_deref(), self.len)) }

    /// Returns an in-order iterator over the entries whose keys lie between the given bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Excluded, Included, Unbounded};
    ///
    /// let log: avl_index::Map<_, _> =
    ///     vec![(100, "boot"), (250, "mount"), (400, "login"), (900, "halt")]
    ///         .into_iter().collect();
    ///
    /// let window: Vec<_> = log.range(Included(&250), Excluded(&900)).map(|e| *e.1).collect();
    /// assert_eq!(window, ["mount", "login"]);
    ///
    /// let late = log.range::<i32, i32>(Excluded(&250), Unbounded);
    /// assert_eq!(late.rev().map(|e| *e.1).collect::<Vec<_>>(), ["halt", "login"]);
    /// ```
    pub fn range<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>)
        -> Range<K, V, B> where C: Compare<Min, K> + Compare<Max, K> {

        Range(node::Iter::range(self.root.as_deref(), self.len, &self.cmp, min, max))
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &node::Link<K, V, B> { &self.root }
}

impl<K, V, C, B> Debug for Map<K, V, C, B>
    where K: Debug, V: Debug, C: Compare<K>, B: Balance {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, B> Default for Map<K, V, C, B> where C: Compare<K> + Default, B: Balance {
    fn default() -> Self { Map::with_balance(C::default()) }
}

/// Keys already present in the map keep their existing values.
impl<K, V, C, B> Extend<(K, V)> for Map<K, V, C, B> where C: Compare<K>, B: Balance {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        for (key, value) in entries { self.insert(key, value); }
    }
}

/// When a key repeats, its first value wins.
impl<K, V, C, B> FromIterator<(K, V)> for Map<K, V, C, B>
    where C: Compare<K> + Default, B: Balance {

    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let mut map = Map::default();
        map.extend(entries);
        map
    }
}

impl<'a, K, V, C, B> IntoIterator for &'a Map<K, V, C, B> where C: Compare<K>, B: Balance {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, B>;
    fn into_iter(self) -> Iter<'a, K, V, B> { self.iter() }
}

/// Consumes the map, yielding its entries in ascending key order.
///
/// ```
/// let map: avl_index::Map<_, _> = vec![(2, 'b'), (3, 'c'), (1, 'a')].into_iter().collect();
/// let letters: String = map.into_iter().map(|(_, c)| c).collect();
/// assert_eq!(letters, "abc");
/// ```
impl<K, V, C, B> IntoIterator for Map<K, V, C, B> where C: Compare<K>, B: Balance {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, B>;
    fn into_iter(self) -> IntoIter<K, V, B> { IntoIter(node::Iter::new(self.root, self.len)) }
}

impl<K, V, C, B> PartialEq for Map<K, V, C, B>
    where K: PartialEq, V: PartialEq, C: Compare<K>, B: Balance {

    fn eq(&self, other: &Self) -> bool { self.len == other.len && self.iter().eq(other.iter()) }
}

impl<K, V, C, B> Eq for Map<K, V, C, B> where K: Eq, V: Eq, C: Compare<K>, B: Balance {}

/// An owning in-order iterator over a map's entries.
///
/// Acquire through the map's `IntoIterator` implementation.
#[derive(Clone)]
pub struct IntoIter<K, V, B = Avl>(node::Iter<Box<Node<K, V, B>>>);

impl<K, V, B> Iterator for IntoIter<K, V, B> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V, B> DoubleEndedIterator for IntoIter<K, V, B> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back() }
}

impl<K, V, B> ExactSizeIterator for IntoIter<K, V, B> {}

/// A borrowing in-order iterator over a map's entries.
///
/// Acquire through [`Map::iter`] or by iterating over `&map`:
///
/// ```
/// let map: avl_index::Map<_, _> = (0..3).map(|i| (i, i * 2)).collect();
/// let mut total = 0;
///
/// for (key, value) in &map { total += key + value; }
///
/// assert_eq!(total, 9);
/// ```
pub struct Iter<'a, K: 'a, V: 'a, B: 'a = Avl>(node::Iter<&'a Node<K, V, B>>);

impl<'a, K, V, B> Clone for Iter<'a, K, V, B> {
    fn clone(&self) -> Self { Iter(self.0.clone()) }
}

impl<'a, K, V, B> Iterator for Iter<'a, K, V, B> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V, B> DoubleEndedIterator for Iter<'a, K, V, B> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> { self.0.next_back() }
}

impl<'a, K, V, B> ExactSizeIterator for Iter<'a, K, V, B> {}

/// A borrowing in-order iterator over the entries of a map whose keys lie between two bounds.
///
/// Acquire through [`Map::range`]. The size hint's upper bound is the number of entries not yet
/// excluded by either bound.
pub struct Range<'a, K: 'a, V: 'a, B: 'a = Avl>(node::Iter<&'a Node<K, V, B>>);

impl<'a, K, V, B> Clone for Range<'a, K, V, B> {
    fn clone(&self) -> Self { Range(self.0.clone()) }
}

impl<'a, K, V, B> Iterator for Range<'a, K, V, B> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.range_size_hint() }
}

impl<'a, K, V, B> DoubleEndedIterator for Range<'a, K, V, B> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> { self.0.next_back() }
}

#[cfg(feature = "ordered_iter")]
mod ordered {
    use ordered_iter::OrderedMapIterator;
    use super::{IntoIter, Iter, Range};

    impl<K, V, B> OrderedMapIterator for IntoIter<K, V, B> where K: Ord {
        type Key = K;
        type Val = V;
    }

    impl<'a, K, V, B> OrderedMapIterator for Iter<'a, K, V, B> where K: Ord {
        type Key = &'a K;
        type Val = &'a V;
    }

    impl<'a, K, V, B> OrderedMapIterator for Range<'a, K, V, B> where K: Ord {
        type Key = &'a K;
        type Val = &'a V;
    }
}

#[cfg(feature = "quickcheck")]
mod arbitrary {
    use compare::Compare;
    use quickcheck::{Arbitrary, Gen};
    use super::Map;
    use crate::balance::Balance;

    impl<K, V, C, B> Arbitrary for Map<K, V, C, B>
        where K: Arbitrary, V: Arbitrary, C: 'static + Clone + Compare<K> + Default,
              B: 'static + Balance {

        fn arbitrary(gen: &mut Gen) -> Self {
            let entries = Vec::<(K, V)>::arbitrary(gen);
            entries.into_iter().collect()
        }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            let entries: Vec<(K, V)> = self.clone().into_iter().collect();
            Box::new(entries.shrink().map(|entries| entries.into_iter().collect()))
        }
    }
}
