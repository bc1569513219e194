//! Standard trait implementations for [`PersistentDict`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::PersistentDict;

impl<K, V> Clone for PersistentDict<K, V> {
    /// O(1): only the root reference is copied.
    fn clone(&self) -> Self {
        Self::from_root(self.root().cloned(), self.len())
    }
}

impl<K, V> Default for PersistentDict<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord, V: Clone> FromIterator<(K, V)> for PersistentDict<K, V> {
    /// Inserts the pairs one after another; later pairs win on duplicate keys.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (key, value) in iter {
            dict = dict.insert(key, value);
        }
        dict
    }
}

/// Two dictionaries are equal when they hold the same entries, regardless of
/// tree shape.
impl<K: PartialEq, V: PartialEq> PartialEq for PersistentDict<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for PersistentDict<K, V> {}

/// Computes a hash value for this dictionary.
///
/// The length is hashed first, then every (key, value) pair in key order, so
/// equal dictionaries hash equally whatever their insertion history.
///
/// # Examples
///
/// ```rust
/// use persistent_dict::persistent::PersistentDict;
/// use std::collections::HashMap;
///
/// let mut outer: HashMap<PersistentDict<i32, String>, &str> = HashMap::new();
/// let key = PersistentDict::new()
///     .insert(1, "one".to_string())
///     .insert(2, "two".to_string());
/// outer.insert(key.clone(), "value");
/// assert_eq!(outer.get(&key), Some(&"value"));
/// ```
impl<K: Hash, V: Hash> Hash for PersistentDict<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for PersistentDict<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for PersistentDict<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for PersistentDict<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentDictVisitor<K, V> {
    marker: std::marker::PhantomData<fn() -> PersistentDict<K, V>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for PersistentDictVisitor<K, V>
where
    K: serde::Deserialize<'de> + Clone + Ord,
    V: serde::Deserialize<'de> + Clone,
{
    type Value = PersistentDict<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut dict = PersistentDict::new();
        while let Some((key, value)) = access.next_entry()? {
            dict = dict.insert(key, value);
        }
        Ok(dict)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for PersistentDict<K, V>
where
    K: serde::Deserialize<'de> + Clone + Ord,
    V: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(PersistentDictVisitor {
            marker: std::marker::PhantomData,
        })
    }
}
