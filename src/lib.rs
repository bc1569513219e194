//! # persistent-dict
//!
//! An immutable ordered dictionary and set for Rust, backed by a persistent
//! red-black tree with path copying.
//!
//! ## Overview
//!
//! - **`PersistentDict`**: ordered key-value dictionary; every update returns
//!   a new version and shares untouched subtrees with the old one
//! - **`PersistentSet`**: ordered set built on the dictionary
//! - **Derived operations**: folds, structural map, filter, union,
//!   intersection, difference and a three-way ordered merge
//!
//! ## Feature Flags
//!
//! - `persistent`: the persistent collections (default)
//! - `arc`: use `Arc` instead of `Rc` so collections are `Send + Sync`
//! - `serde`: `Serialize`/`Deserialize` implementations
//! - `full`: Enable all features
//!
//! ## Diagnostics
//!
//! Rebalancing emits `tracing` events at `TRACE` level naming the case
//! taken. Install any `tracing` subscriber to see them.
//!
//! ## Example
//!
//! ```rust
//! use persistent_dict::prelude::*;
//!
//! let dict: PersistentDict<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
//! assert_eq!(dict.to_list(), vec![("a", 1), ("b", 2)]);
//! assert_eq!(dict.validate(), Ok(1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use persistent_dict::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;
}

#[cfg(feature = "persistent")]
pub mod persistent;
