//! Persistent (immutable) ordered dictionary based on a red-black tree.
//!
//! This module provides [`PersistentDict`], an immutable map from ordered keys
//! to values. Every update returns a new dictionary; all previously obtained
//! dictionaries stay valid and unchanged.
//!
//! # Overview
//!
//! - O(log N) `get`, `contains_key`, `insert`, `remove`, `update`
//! - O(log N) `min` / `max`
//! - O(1) `len` and `is_empty`
//! - O(N) ordered iteration and folds
//!
//! An update copies only the nodes on the path from the root to the changed
//! position (path copying); every other subtree is shared by reference between
//! the old and the new dictionary.
//!
//! # Examples
//!
//! ```rust
//! use persistent_dict::persistent::PersistentDict;
//!
//! let dict = PersistentDict::new()
//!     .insert(3, "three")
//!     .insert(1, "one")
//!     .insert(2, "two");
//!
//! let keys: Vec<&i32> = dict.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! let smaller = dict.remove(&2);
//! assert_eq!(dict.len(), 3);    // Original unchanged
//! assert_eq!(smaller.len(), 2); // New version
//! ```
//!
//! # Internal Structure
//!
//! The tree keeps the red-black invariants after every operation:
//! 1. Every node is red or black; absent children count as black
//! 2. The root is black
//! 3. A red node has no red child
//! 4. Every path from a node to an absent child crosses the same number of
//!    black nodes
//!
//! so its height stays within `2 * log2(N + 1)`.

mod combine;
mod engine;
mod iter;
mod node;
mod traits;
mod validate;
mod zipper;

use std::borrow::Borrow;

use self::node::Link;
use super::ReferenceCounter;

pub use iter::{PersistentDictIntoIterator, PersistentDictIterator};
pub use validate::InvariantViolation;

// =============================================================================
// PersistentDict Definition
// =============================================================================

/// A persistent (immutable) ordered dictionary based on a red-black tree.
///
/// Keys are ordered by their [`Ord`] implementation. Iteration always yields
/// entries in ascending key order.
///
/// # Time Complexity
///
/// | Operation      | Complexity   |
/// |----------------|--------------|
/// | `new`          | O(1)         |
/// | `get`          | O(log N)     |
/// | `contains_key` | O(log N)     |
/// | `insert`       | O(log N)     |
/// | `remove`       | O(log N)     |
/// | `update`       | O(log N)     |
/// | `min`/`max`    | O(log N)     |
/// | `len`          | O(1)         |
/// | `is_empty`     | O(1)         |
/// | `map`          | O(N)         |
/// | `iter`         | O(N)         |
///
/// # Examples
///
/// ```rust
/// use persistent_dict::persistent::PersistentDict;
///
/// let dict = PersistentDict::singleton("answer", 42);
/// assert_eq!(dict.get("answer"), Some(&42));
/// assert_eq!(dict.get("question"), None);
/// ```
pub struct PersistentDict<K, V> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
}

impl<K, V> PersistentDict<K, V> {
    /// Creates a new empty dictionary.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict: PersistentDict<i32, String> = PersistentDict::new();
    /// assert!(dict.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    pub(crate) const fn from_root(root: Link<K, V>, length: usize) -> Self {
        Self { root, length }
    }

    pub(crate) const fn root(&self) -> Option<&ReferenceCounter<node::Node<K, V>>> {
        self.root.as_ref()
    }

    /// Returns the number of entries in the dictionary.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::new().insert(1, "one").insert(2, "two");
    /// assert_eq!(dict.len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the dictionary contains no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let empty: PersistentDict<i32, &str> = PersistentDict::new();
    /// assert!(empty.is_empty());
    /// assert!(!empty.insert(1, "one").is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// The key may be any borrowed form of the dictionary's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::new().insert("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(dict.get("hello"), Some(&42));
    /// assert_eq!(dict.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        engine::locate(self.root.as_ref(), key).map(|node| &node.value)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        engine::locate(self.root.as_ref(), key).map(|node| (&node.key, &node.value))
    }

    /// Returns `true` if the dictionary contains `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::singleton(10, 23);
    /// assert!(dict.contains_key(&10));
    /// assert!(!dict.contains_key(&2));
    /// ```
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        engine::locate(self.root.as_ref(), key).is_some()
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict: PersistentDict<i32, &str> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
    /// assert_eq!(dict.min(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        engine::leftmost(self.root.as_ref()).map(|node| (&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict: PersistentDict<i32, &str> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
    /// assert_eq!(dict.max(), Some((&3, &"c")));
    /// ```
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        engine::rightmost(self.root.as_ref()).map(|node| (&node.key, &node.value))
    }
}

impl<K: Clone + Ord, V: Clone> PersistentDict<K, V> {
    /// Creates a dictionary containing a single entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::singleton(1, 24);
    /// assert_eq!(dict.len(), 1);
    /// assert_eq!(dict.get(&1), Some(&24));
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        Self::from_root(
            Some(ReferenceCounter::new(node::Node::new_black(key, value))),
            1,
        )
    }

    /// Inserts a key-value pair, replacing the value if the key is present.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict1 = PersistentDict::new().insert(1, "one");
    /// let dict2 = dict1.insert(1, "ONE");
    ///
    /// assert_eq!(dict1.get(&1), Some(&"one")); // Original unchanged
    /// assert_eq!(dict2.get(&1), Some(&"ONE")); // New version
    /// ```
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let (root, added) = engine::insert(&self.root, key, value);
        Self::from_root(root, if added { self.length + 1 } else { self.length })
    }

    /// Removes a key from the dictionary.
    ///
    /// Removing an absent key is not an error: the result is a dictionary
    /// sharing the very same tree as `self`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::new().insert(1, "one").insert(2, "two");
    /// let removed = dict.remove(&1);
    ///
    /// assert_eq!(dict.len(), 2);     // Original unchanged
    /// assert_eq!(removed.len(), 1);  // New version
    /// assert_eq!(removed.get(&1), None);
    /// assert_eq!(removed.remove(&1), removed);
    /// ```
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        engine::remove(&self.root, key).map_or_else(
            || self.clone(),
            |root| Self::from_root(root, self.length.saturating_sub(1)),
        )
    }

    /// Inserts, replaces or removes the entry for `key` depending on what
    /// `update` returns for the current value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let counts = PersistentDict::new().insert("a", 1);
    /// let increment = |count: Option<&i32>| Some(count.map_or(1, |count| count + 1));
    ///
    /// let counts = counts.update("a", increment).update("b", increment);
    /// assert_eq!(counts.get("a"), Some(&2));
    /// assert_eq!(counts.get("b"), Some(&1));
    ///
    /// let counts = counts.update("a", |_| None);
    /// assert!(!counts.contains_key("a"));
    /// ```
    #[must_use]
    pub fn update<F>(&self, key: K, update: F) -> Self
    where
        F: FnOnce(Option<&V>) -> Option<V>,
    {
        match update(self.get(&key)) {
            Some(value) => self.insert(key, value),
            None => self.remove(&key),
        }
    }

    /// Builds a dictionary from key-value pairs; later pairs win on duplicate
    /// keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::from_list(vec![(2, "b"), (1, "a"), (2, "B")]);
    /// assert_eq!(dict.to_list(), vec![(1, "a"), (2, "B")]);
    /// ```
    #[must_use]
    pub fn from_list<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        entries.into_iter().collect()
    }

    /// Returns all entries as an ascending list of owned pairs.
    #[must_use]
    pub fn to_list(&self) -> Vec<(K, V)> {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
