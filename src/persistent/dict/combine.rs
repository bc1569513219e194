//! Folds, transformations and combinations of dictionaries.
//!
//! Operations that produce a new key set (`filter`, `union`, ...) collect the
//! surviving entries in ascending order and rebuild the tree in one linear
//! pass with [`from_sorted_entries`], instead of inserting entry by entry.

use std::cmp::Ordering;

use super::PersistentDict;
use super::node::{Color, Link, Node};
use crate::persistent::ReferenceCounter;

/// Builds a valid red-black tree from strictly ascending entries in O(N).
///
/// Entries are split around the median recursively. The levels that the
/// split fills completely are black; nodes on the single partial level below
/// them are red leaves, so every path carries the same number of black nodes.
#[must_use]
pub fn from_sorted_entries<K, V>(entries: Vec<(K, V)>) -> PersistentDict<K, V> {
    let length = entries.len();
    let red_depth = (length + 1).ilog2() as usize;
    let mut entries = entries.into_iter();
    let root = build_balanced(&mut entries, length, 0, red_depth);
    PersistentDict::from_root(root, length)
}

fn build_balanced<K, V, I>(
    entries: &mut I,
    size: usize,
    depth: usize,
    red_depth: usize,
) -> Link<K, V>
where
    I: Iterator<Item = (K, V)>,
{
    if size == 0 {
        return None;
    }
    let left_size = (size - 1) / 2;
    let left = build_balanced(entries, left_size, depth + 1, red_depth);
    let (key, value) = entries.next()?;
    let right = build_balanced(entries, size - 1 - left_size, depth + 1, red_depth);
    let color = if depth == red_depth {
        Color::Red
    } else {
        Color::Black
    };
    Some(ReferenceCounter::new(Node {
        key,
        value,
        color,
        left,
        right,
    }))
}

fn map_node<K, V, W, F>(
    node: &ReferenceCounter<Node<K, V>>,
    function: &mut F,
) -> ReferenceCounter<Node<K, W>>
where
    K: Clone,
    F: FnMut(&K, &V) -> W,
{
    let left = node.left.as_ref().map(|left| map_node(left, function));
    let value = function(&node.key, &node.value);
    let right = node.right.as_ref().map(|right| map_node(right, function));
    ReferenceCounter::new(Node {
        key: node.key.clone(),
        value,
        color: node.color,
        left,
        right,
    })
}

// =============================================================================
// Folds and Transformations
// =============================================================================

impl<K, V> PersistentDict<K, V> {
    /// Folds entries from the smallest key to the largest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::from_list(vec![(1, 'a'), (2, 'b'), (3, 'c')]);
    /// let keys = dict.fold_left(Vec::new(), |mut keys, key, _| {
    ///     keys.push(*key);
    ///     keys
    /// });
    /// assert_eq!(keys, vec![1, 2, 3]);
    /// ```
    pub fn fold_left<A, F>(&self, init: A, mut function: F) -> A
    where
        F: FnMut(A, &K, &V) -> A,
    {
        self.iter()
            .fold(init, |accumulator, (key, value)| function(accumulator, key, value))
    }

    /// Folds entries from the largest key to the smallest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::from_list(vec![(1, 'a'), (2, 'b'), (3, 'c')]);
    /// let keys = dict.fold_right(Vec::new(), |key, _, mut keys| {
    ///     keys.push(*key);
    ///     keys
    /// });
    /// assert_eq!(keys, vec![3, 2, 1]);
    /// ```
    pub fn fold_right<A, F>(&self, init: A, mut function: F) -> A
    where
        F: FnMut(&K, &V, A) -> A,
    {
        self.iter()
            .rev()
            .fold(init, |accumulator, (key, value)| function(key, value, accumulator))
    }
}

impl<K: Clone, V> PersistentDict<K, V> {
    /// Applies a function to every entry, keeping keys unchanged.
    ///
    /// The result has exactly the shape and colors of `self`; no comparison
    /// or rebalancing takes place. `function` is called in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::from_list(vec![(1, 10), (2, 20)]);
    /// let labelled = dict.map(|key, value| format!("{key}={value}"));
    /// assert_eq!(labelled.get(&2).map(String::as_str), Some("2=20"));
    /// ```
    pub fn map<W, F>(&self, mut function: F) -> PersistentDict<K, W>
    where
        F: FnMut(&K, &V) -> W,
    {
        let root = self.root().map(|root| map_node(root, &mut function));
        PersistentDict::from_root(root, self.len())
    }

    /// Keeps the entries for which `function` returns a value, replacing
    /// their values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict = PersistentDict::from_list(vec![(1, "1"), (2, "two"), (3, "3")]);
    /// let parsed = dict.filter_map(|_, text| text.parse::<i32>().ok());
    /// assert_eq!(parsed.to_list(), vec![(1, 1), (3, 3)]);
    /// ```
    pub fn filter_map<W, F>(&self, mut function: F) -> PersistentDict<K, W>
    where
        F: FnMut(&K, &V) -> Option<W>,
    {
        let entries = self
            .iter()
            .filter_map(|(key, value)| function(key, value).map(|mapped| (key.clone(), mapped)))
            .collect();
        from_sorted_entries(entries)
    }
}

impl<K: Clone, V: Clone> PersistentDict<K, V> {
    /// Keeps only the entries satisfying `predicate`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict: PersistentDict<i32, i32> = (1..=6).map(|key| (key, key * key)).collect();
    /// let even = dict.filter(|key, _| key % 2 == 0);
    /// assert_eq!(even.to_list(), vec![(2, 4), (4, 16), (6, 36)]);
    /// ```
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.filter_map(|key, value| predicate(key, value).then(|| value.clone()))
    }

    /// Splits the dictionary into the entries satisfying `predicate` and the
    /// rest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict: PersistentDict<i32, ()> = (1..=5).map(|key| (key, ())).collect();
    /// let (small, large) = dict.partition(|key, _| *key < 3);
    /// assert_eq!(small.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    /// assert_eq!(large.keys().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    /// ```
    pub fn partition<P>(&self, mut predicate: P) -> (Self, Self)
    where
        P: FnMut(&K, &V) -> bool,
    {
        let (accepted, rejected): (Vec<_>, Vec<_>) = self
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .partition(|(key, value)| predicate(key, value));
        (from_sorted_entries(accepted), from_sorted_entries(rejected))
    }
}

// =============================================================================
// Combining Dictionaries
// =============================================================================

impl<K: Ord, V> PersistentDict<K, V> {
    /// Walks `self` and `other` side by side in ascending key order.
    ///
    /// Each key is handed to exactly one of the three callbacks: `left_only`
    /// for keys only in `self`, `both` for shared keys and `right_only` for
    /// keys only in `other`. Runs in O(N + M).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let before = PersistentDict::from_list(vec![("a", 1), ("b", 2)]);
    /// let after = PersistentDict::from_list(vec![("b", 3), ("c", 4)]);
    ///
    /// let changes = before.merge(
    ///     &after,
    ///     Vec::new(),
    ///     |mut log, key, _| { log.push(format!("-{key}")); log },
    ///     |mut log, key, old, new| { log.push(format!("~{key}:{old}->{new}")); log },
    ///     |mut log, key, _| { log.push(format!("+{key}")); log },
    /// );
    /// assert_eq!(changes, vec!["-a", "~b:2->3", "+c"]);
    /// ```
    pub fn merge<W, A, L, B, R>(
        &self,
        other: &PersistentDict<K, W>,
        init: A,
        mut left_only: L,
        mut both: B,
        mut right_only: R,
    ) -> A
    where
        L: FnMut(A, &K, &V) -> A,
        B: FnMut(A, &K, &V, &W) -> A,
        R: FnMut(A, &K, &W) -> A,
    {
        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();
        let mut accumulator = init;
        loop {
            let ordering = match (left.peek(), right.peek()) {
                (Some((left_key, _)), Some((right_key, _))) => left_key.cmp(right_key),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => return accumulator,
            };
            accumulator = match ordering {
                Ordering::Less => match left.next() {
                    Some((key, value)) => left_only(accumulator, key, value),
                    None => accumulator,
                },
                Ordering::Greater => match right.next() {
                    Some((key, value)) => right_only(accumulator, key, value),
                    None => accumulator,
                },
                Ordering::Equal => match (left.next(), right.next()) {
                    (Some((key, left_value)), Some((_, right_value))) => {
                        both(accumulator, key, left_value, right_value)
                    }
                    _ => accumulator,
                },
            };
        }
    }
}

impl<K: Clone + Ord, V: Clone> PersistentDict<K, V> {
    /// Combines two dictionaries; on a shared key the value of `self` wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let left = PersistentDict::from_list(vec![(1, "left"), (2, "left")]);
    /// let right = PersistentDict::from_list(vec![(2, "right"), (3, "right")]);
    /// assert_eq!(
    ///     left.union(&right).to_list(),
    ///     vec![(1, "left"), (2, "left"), (3, "right")]
    /// );
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.union_with(other, |_, value, _| value.clone())
    }

    /// Combines two dictionaries, resolving shared keys with `resolver`
    /// (called with the value of `self` first).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let left = PersistentDict::from_list(vec![("apples", 3), ("pears", 1)]);
    /// let right = PersistentDict::from_list(vec![("apples", 2)]);
    /// let total = left.union_with(&right, |_, mine, theirs| mine + theirs);
    /// assert_eq!(total.get("apples"), Some(&5));
    /// ```
    #[must_use]
    pub fn union_with<F>(&self, other: &Self, mut resolver: F) -> Self
    where
        F: FnMut(&K, &V, &V) -> V,
    {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let entries = self.merge(
            other,
            Vec::with_capacity(self.len() + other.len()),
            |mut entries, key, value| {
                entries.push((key.clone(), value.clone()));
                entries
            },
            |mut entries, key, left, right| {
                entries.push((key.clone(), resolver(key, left, right)));
                entries
            },
            |mut entries, key, value| {
                entries.push((key.clone(), value.clone()));
                entries
            },
        );
        from_sorted_entries(entries)
    }

    /// Keeps the entries of `self` whose keys also occur in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let prices = PersistentDict::from_list(vec![("apple", 3), ("kiwi", 5), ("plum", 2)]);
    /// let basket = PersistentDict::from_list(vec![("kiwi", true), ("plum", false)]);
    /// assert_eq!(prices.intersect(&basket).to_list(), vec![("kiwi", 5), ("plum", 2)]);
    /// ```
    #[must_use]
    pub fn intersect<W>(&self, other: &PersistentDict<K, W>) -> Self {
        let entries = self.merge(
            other,
            Vec::new(),
            |entries, _, _| entries,
            |mut entries, key, value, _| {
                entries.push((key.clone(), value.clone()));
                entries
            },
            |entries, _, _| entries,
        );
        from_sorted_entries(entries)
    }

    /// Keeps the entries of `self` whose keys do not occur in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let all = PersistentDict::from_list(vec![(1, 'a'), (2, 'b'), (3, 'c')]);
    /// let seen = PersistentDict::from_list(vec![(2, ())]);
    /// assert_eq!(all.difference(&seen).to_list(), vec![(1, 'a'), (3, 'c')]);
    /// ```
    #[must_use]
    pub fn difference<W>(&self, other: &PersistentDict<K, W>) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        let entries = self.merge(
            other,
            Vec::with_capacity(self.len()),
            |mut entries, key, value| {
                entries.push((key.clone(), value.clone()));
                entries
            },
            |entries, _, _, _| entries,
            |entries, _, _| entries,
        );
        from_sorted_entries(entries)
    }
}
