//! The ancestry trail used by insertion and removal.
//!
//! A persistent node cannot know its parent: the same node may hang below
//! different parents in different versions of a dictionary. Instead, every
//! update builds a [`Zipper`] while descending from the root. The zipper owns
//! a private copy of every ancestor on the path (one [`Frame`] each) plus the
//! node currently in focus. Rebalancing rewrites these copies freely; the
//! result is published only when the zipper is folded back into a root with
//! [`Zipper::into_root`].
//!
//! ```text
//!   trail[0]  root copy      (hole on `side`)
//!   trail[1]  child copy     (hole on `side`)
//!   ...
//!   focus     current node, or `None` for an empty slot
//! ```
//!
//! Subtrees off the path are never copied; they stay shared with the
//! dictionary the update started from.

use std::borrow::Borrow;
use std::cmp::Ordering;

use smallvec::SmallVec;

use super::node::{Link, Node, Side, own};
use crate::persistent::ReferenceCounter;

/// Frames kept inline before the trail spills to the heap.
///
/// A red-black tree of height 24 already holds at least 4095 entries.
const TRAIL_INLINE_CAPACITY: usize = 24;

/// One ancestor on the trail.
pub struct Frame<K, V> {
    /// Call-local copy of the ancestor. Its `side` slot is vacant while the
    /// path continues below it.
    pub node: Node<K, V>,
    /// The slot of `node` that leads towards the focus.
    pub side: Side,
}

pub type Trail<K, V> = SmallVec<[Frame<K, V>; TRAIL_INLINE_CAPACITY]>;

/// A position inside a tree under construction together with the path taken
/// to reach it.
pub struct Zipper<K, V> {
    pub focus: Option<Node<K, V>>,
    pub trail: Trail<K, V>,
}

impl<K: Clone, V: Clone> Zipper<K, V> {
    /// Opens a zipper focused on (a copy of) the root.
    #[must_use]
    pub fn at_root(root: &Link<K, V>) -> Self {
        Self {
            focus: root.clone().map(own),
            trail: SmallVec::new(),
        }
    }

    /// Descends from the root towards `key`, copying every node visited.
    ///
    /// Stops on the node holding `key`, or on the empty slot where `key`
    /// would be attached.
    #[must_use]
    pub fn seek<Q>(root: &Link<K, V>, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut zipper = Self::at_root(root);
        loop {
            let ordering = match &zipper.focus {
                Some(node) => key.cmp(node.key.borrow()),
                None => return zipper,
            };
            match ordering {
                Ordering::Less => zipper.descend(Side::Left),
                Ordering::Greater => zipper.descend(Side::Right),
                Ordering::Equal => return zipper,
            }
        }
    }

    /// Number of ancestors on the trail.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// Moves the focus to its child on `side`, pushing the current focus onto
    /// the trail. The child is copied if it is still shared.
    pub fn descend(&mut self, side: Side) {
        if let Some(mut node) = self.focus.take() {
            let child = node.take_child(side).map(own);
            self.trail.push(Frame { node, side });
            self.focus = child;
        }
    }

    /// Re-attaches the focus below its parent and focuses the parent.
    ///
    /// Returns `false` when the focus is already the root.
    pub fn ascend(&mut self) -> bool {
        let Some(Frame { mut node, side }) = self.trail.pop() else {
            return false;
        };
        node.set_child(side, self.focus.take().map(ReferenceCounter::new));
        self.focus = Some(node);
        true
    }

    /// Unwinds the whole trail and publishes the resulting root.
    #[must_use]
    pub fn into_root(mut self) -> Link<K, V> {
        while self.ascend() {}
        self.focus.map(ReferenceCounter::new)
    }

    /// Rotates the focused subtree toward `direction`; the focus stays at the
    /// same position and now holds the new local root.
    pub fn rotate_focus(&mut self, direction: Side) {
        if let Some(node) = self.focus.take() {
            self.focus = Some(node.rotate(direction));
        }
    }

    /// Rotates the parent of the focus toward the focus' side, keeping the
    /// focus open below it.
    ///
    /// Before: `.. -> parent(side) -> focus`, sibling on the other side.
    /// After: `.. -> sibling(side) -> parent(side) -> focus`, with the former
    /// near nephew adopted by `parent`.
    pub fn rotate_parent_toward_focus(&mut self) {
        let Some(Frame {
            node: mut parent,
            side,
        }) = self.trail.pop()
        else {
            return;
        };
        let Some(sibling) = parent.take_child(side.opposite()) else {
            self.trail.push(Frame { node: parent, side });
            return;
        };
        let mut sibling = own(sibling);
        parent.set_child(side.opposite(), sibling.take_child(side));
        self.trail.push(Frame {
            node: sibling,
            side,
        });
        self.trail.push(Frame { node: parent, side });
    }

    /// Exchanges colors of the two innermost ancestors.
    pub fn swap_parent_colors(&mut self) {
        let depth = self.depth();
        if depth < 2 {
            return;
        }
        let (outer, inner) = self.trail.split_at_mut(depth - 1);
        std::mem::swap(&mut outer[depth - 2].node.color, &mut inner[0].node.color);
    }

    /// Exchanges key and value between the focus and the ancestor at `index`.
    pub fn exchange_entry_with_ancestor(&mut self, index: usize) {
        if let (Some(node), Some(frame)) = (self.focus.as_mut(), self.trail.get_mut(index)) {
            std::mem::swap(&mut node.key, &mut frame.node.key);
            std::mem::swap(&mut node.value, &mut frame.node.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::dict::node::Color;
    use rstest::rstest;

    fn node(key: i32, color: Color, left: Link<i32, i32>, right: Link<i32, i32>) -> Link<i32, i32> {
        Some(ReferenceCounter::new(Node {
            key,
            value: key * 10,
            color,
            left,
            right,
        }))
    }

    fn sample() -> Link<i32, i32> {
        //        20B
        //       /   \
        //     10B   30B
        node(
            20,
            Color::Black,
            node(10, Color::Black, None, None),
            node(30, Color::Black, None, None),
        )
    }

    #[rstest]
    #[case(10, 1, true)]
    #[case(20, 0, true)]
    #[case(30, 1, true)]
    #[case(25, 2, false)]
    #[case(5, 2, false)]
    fn test_seek_stops_on_key_or_empty_slot(
        #[case] key: i32,
        #[case] depth: usize,
        #[case] found: bool,
    ) {
        let root = sample();
        let zipper = Zipper::seek(&root, &key);
        assert_eq!(zipper.depth(), depth);
        assert_eq!(zipper.focus.is_some(), found);
    }

    #[rstest]
    fn test_into_root_without_changes_rebuilds_same_tree() {
        let root = sample();
        let rebuilt = Zipper::seek(&root, &10).into_root();

        let original = root.as_ref().unwrap();
        let rebuilt = rebuilt.as_ref().unwrap();
        // Path is copied, the untouched sibling is shared.
        assert!(!ReferenceCounter::ptr_eq(original, rebuilt));
        assert!(ReferenceCounter::ptr_eq(
            original.right.as_ref().unwrap(),
            rebuilt.right.as_ref().unwrap()
        ));
        assert_eq!(rebuilt.left.as_ref().map(|node| node.key), Some(10));
    }

    #[rstest]
    fn test_seek_never_mutates_source_tree() {
        let root = sample();
        let mut zipper = Zipper::seek(&root, &30);
        if let Some(focus) = zipper.focus.as_mut() {
            focus.value = -1;
            focus.color = Color::Red;
        }
        let updated = zipper.into_root();

        let original_right = root.as_ref().and_then(|node| node.right.as_ref()).unwrap();
        assert_eq!(original_right.value, 300);
        assert_eq!(original_right.color, Color::Black);
        let updated_right = updated.as_ref().and_then(|node| node.right.as_ref()).unwrap();
        assert_eq!(updated_right.value, -1);
    }

    #[rstest]
    fn test_rotate_parent_toward_focus_keeps_focus_below_parent() {
        let root = sample();
        let mut zipper = Zipper::seek(&root, &10);
        zipper.rotate_parent_toward_focus();

        // trail: 30 (hole Left) -> 20 (hole Left) -> focus 10
        assert_eq!(zipper.depth(), 2);
        assert_eq!(zipper.trail[0].node.key, 30);
        assert_eq!(zipper.trail[1].node.key, 20);
        assert_eq!(zipper.focus.as_ref().map(|node| node.key), Some(10));

        let rotated = zipper.into_root();
        let rotated = rotated.as_ref().unwrap();
        assert_eq!(rotated.key, 30);
        let left = rotated.left.as_ref().unwrap();
        assert_eq!(left.key, 20);
        assert_eq!(left.left.as_ref().map(|node| node.key), Some(10));
        assert!(left.right.is_none());
    }

    #[rstest]
    fn test_swap_parent_colors() {
        let root = node(
            20,
            Color::Black,
            node(10, Color::Red, node(5, Color::Black, None, None), None),
            None,
        );
        let mut zipper = Zipper::seek(&root, &5);
        zipper.swap_parent_colors();
        assert_eq!(zipper.trail[0].node.color, Color::Red);
        assert_eq!(zipper.trail[1].node.color, Color::Black);
    }

    #[rstest]
    fn test_exchange_entry_with_ancestor() {
        let root = sample();
        let mut zipper = Zipper::seek(&root, &30);
        zipper.exchange_entry_with_ancestor(0);
        assert_eq!(zipper.trail[0].node.key, 30);
        assert_eq!(zipper.trail[0].node.value, 300);
        assert_eq!(zipper.focus.as_ref().map(|node| node.key), Some(20));
    }
}
