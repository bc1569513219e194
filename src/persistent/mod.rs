//! Persistent (immutable) ordered collections.
//!
//! This module provides two immutable collections backed by a persistent
//! red-black tree:
//!
//! - [`PersistentDict`]: ordered dictionary from keys to values
//! - [`PersistentSet`]: ordered set, a dictionary whose values are `()`
//!
//! # Structural Sharing
//!
//! Every update copies only the nodes on the path from the root to the
//! changed position and shares all other subtrees with the previous version.
//! Previous versions stay valid and unchanged forever.
//!
//! # Examples
//!
//! ## `PersistentDict`
//!
//! ```rust
//! use persistent_dict::persistent::PersistentDict;
//!
//! let dict = PersistentDict::new()
//!     .insert(3, "three")
//!     .insert(1, "one")
//!     .insert(2, "two");
//!
//! // Entries are always in sorted order
//! let keys: Vec<&i32> = dict.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! // Structural sharing: the original dictionary is preserved
//! let updated = dict.insert(1, "ONE");
//! assert_eq!(dict.get(&1), Some(&"one"));     // Original unchanged
//! assert_eq!(updated.get(&1), Some(&"ONE"));  // New version
//! ```
//!
//! ## `PersistentSet`
//!
//! ```rust
//! use persistent_dict::persistent::PersistentSet;
//!
//! let set: PersistentSet<i32> = [3, 1, 2].into_iter().collect();
//! assert_eq!(format!("{set}"), "{1, 2, 3}");
//!
//! let other: PersistentSet<i32> = [2, 3, 4].into_iter().collect();
//! assert_eq!(set.union(&other).len(), 4);        // {1, 2, 3, 4}
//! assert_eq!(set.intersection(&other).len(), 2); // {2, 3}
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, which makes
/// the collections `Send + Sync` at a slightly higher cost per update.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod dict;
mod set;

pub use dict::InvariantViolation;
pub use dict::PersistentDict;
pub use dict::PersistentDictIntoIterator;
pub use dict::PersistentDictIterator;
pub use set::PersistentSet;
pub use set::PersistentSetIntoIterator;
pub use set::PersistentSetIterator;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentDict<String, Vec<i32>>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentSet<String>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentDict<i32, i32>: Send, Sync);
