//! An ordered set based on a self-balancing binary search tree.

use compare::{Compare, Natural};
use std::fmt::{self, Debug};
use std::iter::FromIterator;
use std::ops::Bound;
use super::balance::{Avl, Balance};
use super::error::DuplicateKey;
use super::map::{self, Map};

/// An ordered set based on a self-balancing binary search tree.
///
/// A `Set<T, C, B>` is a [`Map`] from `T` to `()`: it shares the map's comparator `C`, its
/// balancing policy `B` and its duplicate handling. Two items the comparator deems equal are
/// never both stored.
///
/// # Examples
///
/// ```
/// use avl_index::Set;
///
/// let mut ids: Set<u32> = [40, 10, 30].iter().cloned().collect();
///
/// assert!(ids.insert(20));
/// assert!(!ids.insert(30));
/// assert_eq!(ids.iter().cloned().collect::<Vec<_>>(), [10, 20, 30, 40]);
/// assert_eq!(ids.succ(&25, false), Some(&30));
/// ```
#[derive(Clone)]
pub struct Set<T, C = Natural<T>, B = Avl> where C: Compare<T>, B: Balance {
    map: Map<T, (), C, B>,
}

impl<T> Set<T> where T: Ord {
    /// Creates an empty set ordered by `T`'s `Ord` implementation.
    ///
    /// ```
    /// let set = avl_index::Set::<char>::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.height(), 0);
    /// ```
    pub fn new() -> Self { Set { map: Map::new() } }
}

impl<T, C> Set<T, C> where C: Compare<T> {
    /// Creates an empty set ordered by the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_index::Set::with_cmp(|a: &i32, b: &i32| b.cmp(a));
    /// set.extend(vec![7, -2, 11]);
    ///
    /// assert_eq!(set.iter().collect::<Vec<_>>(), [&11, &7, &-2]);
    /// assert_eq!(set.min(), Some(&11));
    /// ```
    pub fn with_cmp(cmp: C) -> Self { Set { map: Map::with_cmp(cmp) } }
}

impl<T, C, B> Set<T, C, B> where C: Compare<T>, B: Balance {
    /// Creates an empty set ordered by the given comparator and balanced by `B`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::{Aa, Set};
    ///
    /// let mut set: Set<_, _, Aa> = Set::with_balance(compare::natural());
    /// set.extend(0..100);
    ///
    /// assert_eq!(set.len(), 100);
    /// assert_eq!(set.max(), Some(&99));
    /// ```
    pub fn with_balance(cmp: C) -> Self { Set { map: Map::with_balance(cmp) } }

    /// Returns `true` if the set holds no items.
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Returns the number of items in the set.
    ///
    /// ```
    /// let set: avl_index::Set<_> = "mississippi".chars().collect();
    /// assert_eq!(set.len(), 4);
    /// ```
    pub fn len(&self) -> usize { self.map.len() }

    /// Returns the height of the set's tree, counted in nodes, or `0` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_index::Set::new();
    /// assert_eq!(set.height(), 0);
    ///
    /// set.extend(1..8);
    /// assert_eq!(set.height(), 3);
    /// ```
    pub fn height(&self) -> usize { self.map.height() }

    /// Returns the set's comparator.
    pub fn cmp(&self) -> &C { self.map.cmp() }

    /// Drops every item, leaving the set empty.
    pub fn clear(&mut self) { self.map.clear(); }

    /// Adds an item to the set, returning `false` and leaving the set untouched if an equal
    /// item is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_index::Set::new();
    ///
    /// assert!(set.insert("beta"));
    /// assert!(set.insert("alpha"));
    /// assert!(!set.insert("beta"));
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn insert(&mut self, item: T) -> bool { self.map.insert(item, ()) }

    /// Adds an item to the set, failing if an equal item is already present.
    ///
    /// On failure the set is left unchanged and the error carries the rejected item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = avl_index::Set::new();
    ///
    /// assert!(set.try_insert(8080).is_ok());
    /// assert_eq!(set.try_insert(8080).unwrap_err().key, 8080);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn try_insert(&mut self, item: T) -> Result<(), DuplicateKey<T>> where T: Debug {
        self.map.try_insert(item, ())
    }

    /// Removes an item equal to the given one, returning whether one was found.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set: avl_index::Set<_> = (1..=5).collect();
    ///
    /// assert!(set.remove(&3));
    /// assert!(!set.remove(&3));
    /// assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [1, 2, 4, 5]);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> bool where C: Compare<Q, T> {
        self.map.remove(item).is_some()
    }

    /// Returns `true` if the set holds an item equal to the given one.
    ///
    /// The lookup type need not be `T` itself, as long as the comparator can order it against
    /// the set's items.
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where C: Compare<Q, T> {
        self.map.contains_key(item)
    }

    /// Returns the greatest item, or `None` if the set is empty.
    pub fn max(&self) -> Option<&T> { self.map.max().map(|e| e.0) }

    /// Returns the least item, or `None` if the set is empty.
    ///
    /// ```
    /// let mut set = avl_index::Set::new();
    /// assert_eq!(set.min(), None);
    ///
    /// set.extend(vec![12, 3, 7]);
    /// assert_eq!((set.min(), set.max()), (Some(&3), Some(&12)));
    /// ```
    pub fn min(&self) -> Option<&T> { self.map.min().map(|e| e.0) }

    /// Removes and returns the greatest item, or `None` if the set is empty.
    pub fn remove_max(&mut self) -> Option<T> { self.map.remove_max().map(|e| e.0) }

    /// Removes and returns the least item, or `None` if the set is empty.
    ///
    /// Draining a set this way yields its items in ascending order:
    ///
    /// ```
    /// let mut set: avl_index::Set<_> = vec![5, 1, 4].into_iter().collect();
    /// let mut drained = vec![];
    ///
    /// while let Some(item) = set.remove_min() { drained.push(item); }
    ///
    /// assert_eq!(drained, [1, 4, 5]);
    /// assert!(set.is_empty());
    /// ```
    pub fn remove_min(&mut self) -> Option<T> { self.map.remove_min().map(|e| e.0) }

    /// Returns the in-order predecessor of the given item: the greatest stored item below it,
    /// or at most equal to it when `inclusive` is `true`.
    ///
    /// The given item need not be stored in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: avl_index::Set<_> = vec![10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(set.pred(&25, false), Some(&20));
    /// assert_eq!(set.pred(&20, false), Some(&10));
    /// assert_eq!(set.pred(&20, true), Some(&20));
    /// assert_eq!(set.pred(&10, false), None);
    /// ```
    pub fn pred<Q: ?Sized>(&self, item: &Q, inclusive: bool) -> Option<&T> where C: Compare<Q, T> {
        self.map.pred(item, inclusive).map(|e| e.0)
    }

    /// Returns the in-order successor of the given item: the least stored item above it, or at
    /// least equal to it when `inclusive` is `true`.
    ///
    /// The given item need not be stored in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: avl_index::Set<_> = vec![10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(set.succ(&15, false), Some(&20));
    /// assert_eq!(set.succ(&20, false), Some(&30));
    /// assert_eq!(set.succ(&20, true), Some(&20));
    /// assert_eq!(set.succ(&30, false), None);
    /// ```
    pub fn succ<Q: ?Sized>(&self, item: &Q, inclusive: bool) -> Option<&T> where C: Compare<Q, T> {
        self.map.succ(item, inclusive).map(|e| e.0)
    }

    /// Returns an in-order iterator over the set's items.
    ///
    /// The iterator is double-ended, so `iter().rev()` walks the items in descending order.
    ///
    /// ```
    /// let set: avl_index::Set<_> = "tree".chars().collect();
    ///
    /// assert_eq!(set.iter().collect::<String>(), "ert");
    /// assert_eq!(set.iter().rev().collect::<String>(), "tre");
    /// ```
    pub fn iter(&self) -> Iter<T, B> { Iter(self.map.iter()) }

    /// Returns an in-order iterator over the items lying between the given bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Excluded, Included, Unbounded};
    ///
    /// let set: avl_index::Set<_> = (1..=9).collect();
    ///
    /// assert_eq!(set.range(Included(&3), Excluded(&6)).collect::<Vec<_>>(), [&3, &4, &5]);
    /// assert_eq!(set.range::<i32, i32>(Excluded(&7), Unbounded).count(), 2);
    /// assert_eq!(set.range(Excluded(&5), Excluded(&6)).next(), None);
    /// ```
    pub fn range<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>)
        -> Range<T, B> where C: Compare<Min, T> + Compare<Max, T> {

        Range(self.map.range(min, max))
    }

    #[cfg(test)]
    pub(crate) fn map(&self) -> &Map<T, (), C, B> { &self.map }
}

impl<T, C, B> Debug for Set<T, C, B> where T: Debug, C: Compare<T>, B: Balance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C, B> Default for Set<T, C, B> where C: Compare<T> + Default, B: Balance {
    fn default() -> Self { Set::with_balance(C::default()) }
}

/// Items equal to one already in the set are dropped.
impl<T, C, B> Extend<T> for Set<T, C, B> where C: Compare<T>, B: Balance {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.map.extend(items.into_iter().map(|item| (item, ())));
    }
}

impl<T, C, B> FromIterator<T> for Set<T, C, B> where C: Compare<T> + Default, B: Balance {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        Set { map: items.into_iter().map(|item| (item, ())).collect() }
    }
}

impl<'a, T, C, B> IntoIterator for &'a Set<T, C, B> where C: Compare<T>, B: Balance {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B>;
    fn into_iter(self) -> Iter<'a, T, B> { self.iter() }
}

/// Consumes the set, yielding its items in ascending order.
///
/// ```
/// let set: avl_index::Set<_> = vec![3, 1, 2].into_iter().collect();
/// assert_eq!(set.into_iter().rev().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
impl<T, C, B> IntoIterator for Set<T, C, B> where C: Compare<T>, B: Balance {
    type Item = T;
    type IntoIter = IntoIter<T, B>;
    fn into_iter(self) -> IntoIter<T, B> { IntoIter(self.map.into_iter()) }
}

impl<T, C, B> PartialEq for Set<T, C, B> where T: PartialEq, C: Compare<T>, B: Balance {
    fn eq(&self, other: &Self) -> bool { self.map == other.map }
}

impl<T, C, B> Eq for Set<T, C, B> where T: Eq, C: Compare<T>, B: Balance {}

/// An owning in-order iterator over a set's items.
///
/// Acquire through the set's `IntoIterator` implementation.
#[derive(Clone)]
pub struct IntoIter<T, B = Avl>(map::IntoIter<T, (), B>);

impl<T, B> Iterator for IntoIter<T, B> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next().map(|(item, ())| item) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<T, B> DoubleEndedIterator for IntoIter<T, B> {
    fn next_back(&mut self) -> Option<T> { self.0.next_back().map(|(item, ())| item) }
}

impl<T, B> ExactSizeIterator for IntoIter<T, B> {}

/// A borrowing in-order iterator over a set's items.
///
/// Acquire through [`Set::iter`] or by iterating over `&set`.
pub struct Iter<'a, T: 'a, B: 'a = Avl>(map::Iter<'a, T, (), B>);

impl<'a, T, B> Clone for Iter<'a, T, B> {
    fn clone(&self) -> Self { Iter(self.0.clone()) }
}

impl<'a, T, B> Iterator for Iter<'a, T, B> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next().map(|(item, _)| item) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T, B> DoubleEndedIterator for Iter<'a, T, B> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back().map(|(item, _)| item) }
}

impl<'a, T, B> ExactSizeIterator for Iter<'a, T, B> {}

/// A borrowing in-order iterator over the items of a set lying between two bounds.
///
/// Acquire through [`Set::range`].
pub struct Range<'a, T: 'a, B: 'a = Avl>(map::Range<'a, T, (), B>);

impl<'a, T, B> Clone for Range<'a, T, B> {
    fn clone(&self) -> Self { Range(self.0.clone()) }
}

impl<'a, T, B> Iterator for Range<'a, T, B> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next().map(|(item, _)| item) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T, B> DoubleEndedIterator for Range<'a, T, B> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back().map(|(item, _)| item) }
}

#[cfg(feature = "ordered_iter")]
mod ordered {
    use ordered_iter::OrderedSetIterator;
    use super::{IntoIter, Iter, Range};

    impl<T, B> OrderedSetIterator for IntoIter<T, B> where T: Ord {}

    impl<'a, T, B> OrderedSetIterator for Iter<'a, T, B> where T: Ord {}

    impl<'a, T, B> OrderedSetIterator for Range<'a, T, B> where T: Ord {}
}

#[cfg(feature = "quickcheck")]
mod arbitrary {
    use compare::Compare;
    use quickcheck::{Arbitrary, Gen};
    use super::Set;
    use crate::balance::Balance;
    use crate::map::Map;

    impl<T, C, B> Arbitrary for Set<T, C, B>
        where T: Arbitrary, C: 'static + Clone + Compare<T> + Default, B: 'static + Balance {

        fn arbitrary(gen: &mut Gen) -> Self { Set { map: Map::arbitrary(gen) } }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            Box::new(self.map.shrink().map(|map| Set { map }))
        }
    }
}
