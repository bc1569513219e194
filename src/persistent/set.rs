//! Persistent (immutable) ordered set.
//!
//! This module provides [`PersistentSet`], an immutable ordered set that uses
//! [`PersistentDict`] internally with `()` values.
//!
//! # Overview
//!
//! - O(log N) contains, insert and remove
//! - O(N + M) union, intersection and difference
//! - O(1) len and `is_empty`
//!
//! Elements are kept in ascending order; every update returns a new set and
//! leaves the original untouched.
//!
//! # Examples
//!
//! ```rust
//! use persistent_dict::persistent::PersistentSet;
//!
//! let set = PersistentSet::new().insert(3).insert(1).insert(2);
//! assert!(set.contains(&1));
//! assert!(!set.contains(&4));
//!
//! let updated = set.insert(4);
//! assert_eq!(set.len(), 3);      // Original unchanged
//! assert_eq!(updated.len(), 4);  // New version
//! ```
//!
//! # Set Operations
//!
//! ```rust
//! use persistent_dict::persistent::PersistentSet;
//!
//! let set_a: PersistentSet<i32> = [1, 2, 3].into_iter().collect();
//! let set_b: PersistentSet<i32> = [2, 3, 4].into_iter().collect();
//!
//! assert_eq!(set_a.union(&set_b).to_list(), vec![1, 2, 3, 4]);
//! assert_eq!(set_a.intersection(&set_b).to_list(), vec![2, 3]);
//! assert_eq!(set_a.difference(&set_b).to_list(), vec![1]);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{FromIterator, FusedIterator};

use super::dict::{PersistentDictIntoIterator, PersistentDictIterator};
use super::PersistentDict;

// =============================================================================
// PersistentSet Definition
// =============================================================================

/// A persistent (immutable) ordered set based on [`PersistentDict`].
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `contains`     | O(log N)   |
/// | `insert`       | O(log N)   |
/// | `remove`       | O(log N)   |
/// | `union`        | O(N + M)   |
/// | `intersection` | O(N + M)   |
/// | `difference`   | O(N + M)   |
/// | `len`          | O(1)       |
pub struct PersistentSet<T> {
    inner: PersistentDict<T, ()>,
}

impl<T> PersistentSet<T> {
    /// Creates a new empty set.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: PersistentDict::new(),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if the set contains `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentSet;
    ///
    /// let set: PersistentSet<String> = ["a".to_string()].into_iter().collect();
    /// assert!(set.contains("a"));
    /// assert!(!set.contains("b"));
    /// ```
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.contains_key(element)
    }

    /// Returns the smallest element.
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        self.inner.min().map(|(element, ())| element)
    }

    /// Returns the largest element.
    #[must_use]
    pub fn max(&self) -> Option<&T> {
        self.inner.max().map(|(element, ())| element)
    }

    /// Returns an iterator over the elements in ascending order.
    pub fn iter(&self) -> PersistentSetIterator<'_, T> {
        PersistentSetIterator {
            inner: self.inner.iter(),
        }
    }

    /// Folds elements from the smallest to the largest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentSet;
    ///
    /// let set: PersistentSet<i32> = [3, 1, 2].into_iter().collect();
    /// let digits = set.fold_left(String::new(), |digits, element| digits + &element.to_string());
    /// assert_eq!(digits, "123");
    /// ```
    pub fn fold_left<A, F>(&self, init: A, mut function: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.inner
            .fold_left(init, |accumulator, element, ()| function(accumulator, element))
    }

    /// Folds elements from the largest to the smallest.
    pub fn fold_right<A, F>(&self, init: A, mut function: F) -> A
    where
        F: FnMut(&T, A) -> A,
    {
        self.inner
            .fold_right(init, |element, (), accumulator| function(element, accumulator))
    }
}

impl<T: Clone + Ord> PersistentSet<T> {
    /// Creates a set containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self {
            inner: PersistentDict::singleton(element, ()),
        }
    }

    /// Inserts an element. Inserting an existing element yields an equal set.
    #[must_use]
    pub fn insert(&self, element: T) -> Self {
        Self {
            inner: self.inner.insert(element, ()),
        }
    }

    /// Removes an element. Removing an absent element yields an equal set.
    #[must_use]
    pub fn remove<Q>(&self, element: &Q) -> Self
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Self {
            inner: self.inner.remove(element),
        }
    }

    /// Returns the elements present in either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            inner: self.inner.union(&other.inner),
        }
    }

    /// Returns the elements present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            inner: self.inner.intersect(&other.inner),
        }
    }

    /// Returns the elements of `self` that are absent from `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            inner: self.inner.difference(&other.inner),
        }
    }

    /// Returns `true` if every element of `self` is in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentSet;
    ///
    /// let small: PersistentSet<i32> = [1, 2].into_iter().collect();
    /// let large: PersistentSet<i32> = [1, 2, 3].into_iter().collect();
    /// assert!(small.is_subset(&large));
    /// assert!(!large.is_subset(&small));
    /// ```
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|element| other.contains(element))
    }

    /// Keeps only the elements satisfying `predicate`.
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        Self {
            inner: self.inner.filter(|element, ()| predicate(element)),
        }
    }

    /// Splits the set into the elements satisfying `predicate` and the rest.
    #[must_use]
    pub fn partition<P>(&self, mut predicate: P) -> (Self, Self)
    where
        P: FnMut(&T) -> bool,
    {
        let (accepted, rejected) = self.inner.partition(|element, ()| predicate(element));
        (Self { inner: accepted }, Self { inner: rejected })
    }

    /// Applies a function to every element. Elements mapping to the same
    /// value collapse into one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentSet;
    ///
    /// let set: PersistentSet<i32> = [-2, -1, 1, 3].into_iter().collect();
    /// let magnitudes = set.map(|element| element.abs());
    /// assert_eq!(magnitudes.to_list(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, function: F) -> PersistentSet<U>
    where
        U: Clone + Ord,
        F: FnMut(&T) -> U,
    {
        self.iter().map(function).collect()
    }

    /// Returns all elements as an ascending list.
    #[must_use]
    pub fn to_list(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the elements of a [`PersistentSet`] in ascending order.
pub struct PersistentSetIterator<'a, T> {
    inner: PersistentDictIterator<'a, T, ()>,
}

impl<'a, T> Iterator for PersistentSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(element, ())| element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for PersistentSetIterator<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(element, ())| element)
    }
}

impl<T> ExactSizeIterator for PersistentSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for PersistentSetIterator<'_, T> {}

/// An owning iterator over the elements of a [`PersistentSet`].
pub struct PersistentSetIntoIterator<T> {
    inner: PersistentDictIntoIterator<T, ()>,
}

impl<T: Clone> Iterator for PersistentSetIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(element, ())| element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T: Clone> DoubleEndedIterator for PersistentSetIntoIterator<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(element, ())| element)
    }
}

impl<T: Clone> ExactSizeIterator for PersistentSetIntoIterator<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentSet<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for PersistentSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Ord> FromIterator<T> for PersistentSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(|element| (element, ())).collect(),
        }
    }
}

impl<T: Clone> IntoIterator for PersistentSet<T> {
    type Item = T;
    type IntoIter = PersistentSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentSetIntoIterator {
            inner: self.inner.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a PersistentSet<T> {
    type Item = &'a T;
    type IntoIter = PersistentSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Eq> Eq for PersistentSet<T> {}

impl<T: Hash> Hash for PersistentSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct PersistentSetVisitor<T> {
    marker: std::marker::PhantomData<fn() -> PersistentSet<T>>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentSetVisitor<T>
where
    T: serde::Deserialize<'de> + Clone + Ord,
{
    type Value = PersistentSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = PersistentSet::new();
        while let Some(element) = access.next_element()? {
            set = set.insert(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentSet<T>
where
    T: serde::Deserialize<'de> + Clone + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}
