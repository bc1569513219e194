//! Red-black invariant checker.

use std::fmt;

use super::PersistentDict;
use super::node::{Color, Node};
use crate::persistent::ReferenceCounter;

/// A broken red-black tree invariant, as reported by
/// [`PersistentDict::validate`].
///
/// Depths count edges from the root (the root has depth 0). Positions count
/// entries in ascending order starting at 0.
///
/// # Examples
///
/// ```rust
/// use persistent_dict::persistent::InvariantViolation;
///
/// let violation = InvariantViolation::RedChildOfRed { depth: 2 };
/// assert_eq!(format!("{violation}"), "red node at depth 2 has a red parent");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root node is red.
    RedRoot,
    /// A red node has a red parent.
    RedChildOfRed {
        /// Depth of the child.
        depth: usize,
    },
    /// The two subtrees of a node have different black heights.
    BlackHeightMismatch {
        /// Depth of the node whose subtrees disagree.
        depth: usize,
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
    /// An entry is not strictly greater than its in-order predecessor.
    KeysOutOfOrder {
        /// In-order position of the offending entry.
        position: usize,
    },
    /// The recorded length differs from the number of nodes.
    LengthMismatch {
        /// Length stored in the dictionary.
        recorded: usize,
        /// Number of nodes actually reachable from the root.
        actual: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot => write!(formatter, "root node is red"),
            Self::RedChildOfRed { depth } => {
                write!(formatter, "red node at depth {depth} has a red parent")
            }
            Self::BlackHeightMismatch { depth, left, right } => write!(
                formatter,
                "black height mismatch at depth {depth}: left {left}, right {right}"
            ),
            Self::KeysOutOfOrder { position } => write!(
                formatter,
                "key at position {position} is not greater than its predecessor"
            ),
            Self::LengthMismatch { recorded, actual } => write!(
                formatter,
                "recorded length {recorded} differs from node count {actual}"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

struct Checker<'a, K> {
    previous: Option<&'a K>,
    position: usize,
}

impl<'a, K: Ord> Checker<'a, K> {
    /// Returns the black height of the subtree rooted at `link`.
    fn check<V>(
        &mut self,
        link: Option<&'a ReferenceCounter<Node<K, V>>>,
        depth: usize,
        parent_is_red: bool,
    ) -> Result<usize, InvariantViolation> {
        let Some(node) = link else {
            return Ok(0);
        };
        if parent_is_red && node.is_red() {
            return Err(InvariantViolation::RedChildOfRed { depth });
        }

        let left = self.check(node.left.as_ref(), depth + 1, node.is_red())?;

        if self.previous.is_some_and(|previous| previous >= &node.key) {
            return Err(InvariantViolation::KeysOutOfOrder {
                position: self.position,
            });
        }
        self.previous = Some(&node.key);
        self.position += 1;

        let right = self.check(node.right.as_ref(), depth + 1, node.is_red())?;

        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { depth, left, right });
        }
        Ok(left + usize::from(node.color == Color::Black))
    }
}

impl<K: Ord, V> PersistentDict<K, V> {
    /// Checks every red-black tree invariant and returns the black height.
    ///
    /// The black height is the number of black nodes on any path from the
    /// root to an absent child (0 for an empty dictionary). Runs in O(N).
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found in an in-order walk.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_dict::persistent::PersistentDict;
    ///
    /// let dict: PersistentDict<i32, ()> = (0..1000).map(|key| (key, ())).collect();
    /// let black_height = dict.validate().unwrap();
    /// assert!(black_height <= 10);
    /// ```
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        if self.root().is_some_and(|root| root.is_red()) {
            return Err(InvariantViolation::RedRoot);
        }
        let mut checker = Checker {
            previous: None,
            position: 0,
        };
        let black_height = checker.check(self.root(), 0, false)?;
        if checker.position != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.len(),
                actual: checker.position,
            });
        }
        Ok(black_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::dict::node::Link;
    use rstest::rstest;

    fn node(key: i32, color: Color, left: Link<i32, ()>, right: Link<i32, ()>) -> Link<i32, ()> {
        Some(ReferenceCounter::new(Node {
            key,
            value: (),
            color,
            left,
            right,
        }))
    }

    fn leaf(key: i32, color: Color) -> Link<i32, ()> {
        node(key, color, None, None)
    }

    #[rstest]
    fn test_empty_has_black_height_zero() {
        let dict: PersistentDict<i32, ()> = PersistentDict::new();
        assert_eq!(dict.validate(), Ok(0));
    }

    #[rstest]
    fn test_valid_tree() {
        let root = node(2, Color::Black, leaf(1, Color::Red), leaf(3, Color::Red));
        let dict = PersistentDict::from_root(root, 3);
        assert_eq!(dict.validate(), Ok(1));
    }

    #[rstest]
    fn test_red_root() {
        let dict = PersistentDict::from_root(leaf(1, Color::Red), 1);
        assert_eq!(dict.validate(), Err(InvariantViolation::RedRoot));
    }

    #[rstest]
    fn test_red_child_of_red() {
        let root = node(
            3,
            Color::Black,
            node(2, Color::Red, leaf(1, Color::Red), None),
            leaf(4, Color::Black),
        );
        let dict = PersistentDict::from_root(root, 4);
        assert_eq!(
            dict.validate(),
            Err(InvariantViolation::RedChildOfRed { depth: 2 })
        );
    }

    #[rstest]
    fn test_black_height_mismatch() {
        let root = node(2, Color::Black, leaf(1, Color::Black), None);
        let dict = PersistentDict::from_root(root, 2);
        assert_eq!(
            dict.validate(),
            Err(InvariantViolation::BlackHeightMismatch {
                depth: 0,
                left: 1,
                right: 0
            })
        );
    }

    #[rstest]
    #[case(1, 1, 2)]
    #[case(3, 4, 1)]
    fn test_keys_out_of_order(#[case] left: i32, #[case] right: i32, #[case] position: usize) {
        let root = node(2, Color::Black, leaf(left, Color::Red), leaf(right, Color::Red));
        let dict = PersistentDict::from_root(root, 3);
        assert_eq!(
            dict.validate(),
            Err(InvariantViolation::KeysOutOfOrder { position })
        );
    }

    #[rstest]
    fn test_length_mismatch() {
        let dict = PersistentDict::from_root(leaf(1, Color::Black), 2);
        assert_eq!(
            dict.validate(),
            Err(InvariantViolation::LengthMismatch {
                recorded: 2,
                actual: 1
            })
        );
    }

    #[rstest]
    fn test_error_trait_and_display() {
        let error: Box<dyn std::error::Error> = Box::new(InvariantViolation::RedRoot);
        assert_eq!(error.to_string(), "root node is red");
    }
}
