//! In-order iteration.
//!
//! Both iterators walk the tree lazily with two explicit stacks, one holding
//! the left spine still to be visited from the front and one holding the right
//! spine still to be visited from the back. A shared `remaining` count stops
//! the two ends from crossing.

use std::iter::FusedIterator;

use super::PersistentDict;
use super::node::Node;
use crate::persistent::ReferenceCounter;

type Spine<'a, K, V> = Vec<&'a ReferenceCounter<Node<K, V>>>;

fn push_left_spine<'a, K, V>(
    stack: &mut Spine<'a, K, V>,
    mut link: Option<&'a ReferenceCounter<Node<K, V>>>,
) {
    while let Some(node) = link {
        stack.push(node);
        link = node.left.as_ref();
    }
}

fn push_right_spine<'a, K, V>(
    stack: &mut Spine<'a, K, V>,
    mut link: Option<&'a ReferenceCounter<Node<K, V>>>,
) {
    while let Some(node) = link {
        stack.push(node);
        link = node.right.as_ref();
    }
}

// =============================================================================
// Borrowing Iterator
// =============================================================================

/// An iterator over the entries of a [`PersistentDict`] in ascending key order.
///
/// Created by [`PersistentDict::iter`].
pub struct PersistentDictIterator<'a, K, V> {
    front: Spine<'a, K, V>,
    back: Spine<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> PersistentDictIterator<'a, K, V> {
    fn new(dict: &'a PersistentDict<K, V>) -> Self {
        let mut front = Vec::new();
        let mut back = Vec::new();
        push_left_spine(&mut front, dict.root());
        push_right_spine(&mut back, dict.root());
        Self {
            front,
            back,
            remaining: dict.len(),
        }
    }
}

impl<'a, K, V> Iterator for PersistentDictIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        push_left_spine(&mut self.front, node.right.as_ref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for PersistentDictIterator<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        push_right_spine(&mut self.back, node.left.as_ref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for PersistentDictIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for PersistentDictIterator<'_, K, V> {}

impl<K, V> Clone for PersistentDictIterator<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Owning Iterator
// =============================================================================

/// An owning iterator over the entries of a [`PersistentDict`].
///
/// Nodes may still be shared with other dictionaries, so entries are cloned
/// out of the tree as they are yielded.
pub struct PersistentDictIntoIterator<K, V> {
    front: Vec<ReferenceCounter<Node<K, V>>>,
    back: Vec<ReferenceCounter<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> PersistentDictIntoIterator<K, V> {
    fn new(dict: PersistentDict<K, V>) -> Self {
        let mut iterator = Self {
            front: Vec::new(),
            back: Vec::new(),
            remaining: dict.len(),
        };
        iterator.push_front_spine(dict.root().cloned());
        iterator.push_back_spine(dict.root().cloned());
        iterator
    }

    fn push_front_spine(&mut self, mut link: Option<ReferenceCounter<Node<K, V>>>) {
        while let Some(node) = link {
            link = node.left.as_ref().cloned();
            self.front.push(node);
        }
    }

    fn push_back_spine(&mut self, mut link: Option<ReferenceCounter<Node<K, V>>>) {
        while let Some(node) = link {
            link = node.right.as_ref().cloned();
            self.back.push(node);
        }
    }
}

impl<K: Clone, V: Clone> Iterator for PersistentDictIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        self.push_front_spine(node.right.clone());
        self.remaining -= 1;
        Some((node.key.clone(), node.value.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Clone, V: Clone> DoubleEndedIterator for PersistentDictIntoIterator<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        self.push_back_spine(node.left.clone());
        self.remaining -= 1;
        Some((node.key.clone(), node.value.clone()))
    }
}

impl<K: Clone, V: Clone> ExactSizeIterator for PersistentDictIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K: Clone, V: Clone> FusedIterator for PersistentDictIntoIterator<K, V> {}

// =============================================================================
// Iteration API
// =============================================================================

impl<K, V> PersistentDict<K, V> {
    /// Returns an iterator over entries in ascending key order.
    ///
    /// The iterator is lazy, double-ended and knows its exact length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::new()
    ///     .insert(3, "three")
    ///     .insert(1, "one")
    ///     .insert(2, "two");
    ///
    /// let mut entries = dict.iter();
    /// assert_eq!(entries.len(), 3);
    /// assert_eq!(entries.next(), Some((&1, &"one")));
    /// assert_eq!(entries.next_back(), Some((&3, &"three")));
    /// assert_eq!(entries.next(), Some((&2, &"two")));
    /// assert_eq!(entries.next(), None);
    /// ```
    pub fn iter(&self) -> PersistentDictIterator<'_, K, V> {
        PersistentDictIterator::new(self)
    }

    /// Returns an iterator over keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict: PersistentDict<i32, ()> = [5, 1, 3].into_iter().map(|key| (key, ())).collect();
    /// let keys: Vec<i32> = dict.keys().copied().collect();
    /// assert_eq!(keys, vec![1, 3, 5]);
    /// ```
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::new()
    ///     .insert(1, 10)
    ///     .insert(2, 20)
    ///     .insert(3, 30);
    ///
    /// let sum: i32 = dict.values().sum();
    /// assert_eq!(sum, 60);
    /// ```
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: Clone, V: Clone> IntoIterator for PersistentDict<K, V> {
    type Item = (K, V);
    type IntoIter = PersistentDictIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentDictIntoIterator::new(self)
    }
}

impl<'a, K, V> IntoIterator for &'a PersistentDict<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = PersistentDictIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
