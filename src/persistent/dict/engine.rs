//! Lookup, insertion and removal on the red-black tree.
//!
//! Insertion and removal both descend with a [`Zipper`], so every node they
//! rewrite is a call-local copy and every node they do not touch is shared
//! with the input tree.
//!
//! # Insertion fixup
//!
//! A new node is attached red. While the focus `n` is red and its parent is
//! red:
//!
//! - red uncle: push the grandparent's blackness down onto parent and uncle,
//!   color the grandparent red, continue from the grandparent;
//! - black uncle, `n` on the same side of its parent as the parent of the
//!   grandparent (LL / RR): rotate the grandparent away from that side and
//!   swap colors between the new local root and the demoted grandparent;
//! - black uncle, opposite sides (LR / RL): rotate the parent away from `n`,
//!   which turns the shape into LL / RR one level down.
//!
//! The root is always recolored black.
//!
//! # Double-black fixup
//!
//! Removing a black leaf leaves its parent one black node short on that side.
//! With `n` the deficient position, `s` its sibling and near / far nephews the
//! children of `s` closer to / farther from `n`:
//!
//! | sibling | near  | far   | action                                                  |
//! |---------|-------|-------|---------------------------------------------------------|
//! | none    |       |       | `n` is the root, deficit absorbed                       |
//! | black   | black | black | `s` red, parent black; recurse if parent was black      |
//! | black   | red   | black | rotate `s` away from `n`, re-enter                      |
//! | black   | any   | red   | rotate parent toward `n`, swap colors, far nephew black |
//! | red     |       |       | rotate parent toward `n`, swap colors, re-enter         |

use std::borrow::Borrow;
use std::cmp::Ordering;

use tracing::trace;

use super::node::{Color, Link, Node, Side, is_red, own};
use super::zipper::Zipper;
use crate::persistent::ReferenceCounter;

/// Finds the node holding `key` without copying anything.
#[must_use]
pub fn locate<'a, K, V, Q>(
    root: Option<&'a ReferenceCounter<Node<K, V>>>,
    key: &Q,
) -> Option<&'a ReferenceCounter<Node<K, V>>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut current = root;
    while let Some(node) = current {
        current = match key.cmp(node.key.borrow()) {
            Ordering::Less => node.left.as_ref(),
            Ordering::Greater => node.right.as_ref(),
            Ordering::Equal => return Some(node),
        };
    }
    None
}

/// Leftmost node of a subtree.
#[must_use]
pub fn leftmost<K, V>(
    root: Option<&ReferenceCounter<Node<K, V>>>,
) -> Option<&ReferenceCounter<Node<K, V>>> {
    let mut current = root?;
    while let Some(left) = current.left.as_ref() {
        current = left;
    }
    Some(current)
}

/// Rightmost node of a subtree.
#[must_use]
pub fn rightmost<K, V>(
    root: Option<&ReferenceCounter<Node<K, V>>>,
) -> Option<&ReferenceCounter<Node<K, V>>> {
    let mut current = root?;
    while let Some(right) = current.right.as_ref() {
        current = right;
    }
    Some(current)
}

/// Inserts or replaces `key`. Returns the new root and whether an entry was
/// added (as opposed to replaced).
#[must_use]
pub fn insert<K, V>(root: &Link<K, V>, key: K, value: V) -> (Link<K, V>, bool)
where
    K: Clone + Ord,
    V: Clone,
{
    if root.is_none() {
        return (Some(ReferenceCounter::new(Node::new_black(key, value))), true);
    }

    let mut zipper = Zipper::seek(root, &key);
    let added = if let Some(existing) = zipper.focus.as_mut() {
        // Same shape, same colors: nothing to rebalance.
        existing.value = value;
        false
    } else {
        zipper.focus = Some(Node::new_red(key, value));
        zipper.rebalance_after_insert();
        true
    };
    (zipper.into_root(), added)
}

/// Removes `key`. Returns `None` when the key is absent so the caller can
/// hand back the original tree untouched.
#[must_use]
pub fn remove<K, V, Q>(root: &Link<K, V>, key: &Q) -> Option<Link<K, V>>
where
    K: Clone + Borrow<Q>,
    V: Clone,
    Q: Ord + ?Sized,
{
    locate(root.as_ref(), key)?;
    let mut zipper = Zipper::seek(root, key);
    zipper.remove_focus();
    Some(zipper.into_root())
}

impl<K: Clone, V: Clone> Zipper<K, V> {
    /// Restores the red-black invariants after a red node was attached at the
    /// focus.
    pub fn rebalance_after_insert(&mut self) {
        loop {
            let depth = self.depth();
            let Some(node) = self.focus.as_mut() else {
                return;
            };
            if depth == 0 {
                node.color = Color::Black;
                return;
            }
            if !node.is_red() || !self.trail[depth - 1].node.is_red() {
                return;
            }
            if depth == 1 {
                // A red root can only be left behind by a hand-built tree.
                self.trail[0].node.color = Color::Black;
                return;
            }

            let node_side = self.trail[depth - 1].side;
            let parent_side = self.trail[depth - 2].side;
            let uncle_side = parent_side.opposite();

            if is_red(self.trail[depth - 2].node.child(uncle_side)) {
                trace!(depth, "insert fixup: color pushdown");
                let grandparent = &mut self.trail[depth - 2].node;
                let color = grandparent.color;
                grandparent.recolor_child(uncle_side, color);
                grandparent.color = Color::Red;
                self.trail[depth - 1].node.color = color;
                self.ascend();
                self.ascend();
            } else if node_side == parent_side {
                trace!(depth, side = ?parent_side, "insert fixup: outer rotation");
                let direction = parent_side.opposite();
                self.ascend();
                self.ascend();
                self.rotate_focus(direction);
                if let Some(local_root) = self.focus.as_mut() {
                    local_root.swap_color_with_child(direction);
                }
            } else {
                trace!(depth, side = ?parent_side, "insert fixup: inner rotation");
                self.ascend();
                self.rotate_focus(parent_side);
                self.descend(parent_side);
            }
        }
    }

    /// Removes the entry in focus, leaving a valid red-black tree once the
    /// zipper is unwound.
    pub fn remove_focus(&mut self) {
        loop {
            let Some(node) = self.focus.as_ref() else {
                return;
            };
            match (node.left.is_some(), node.right.is_some()) {
                (true, true) => {
                    // Trade places with the in-order successor, then remove
                    // the successor's slot instead.
                    let target = self.depth();
                    self.descend(Side::Right);
                    while self.focus.as_ref().is_some_and(|node| node.left.is_some()) {
                        self.descend(Side::Left);
                    }
                    self.exchange_entry_with_ancestor(target);
                }
                (false, false) => {
                    let needs_fixup = self.depth() > 0 && !node.is_red();
                    self.focus = None;
                    if needs_fixup {
                        self.rebalance_after_remove();
                    }
                    return;
                }
                (has_left, _) => {
                    // A black node with a single (red) child: pull the
                    // child's entry up and remove the child.
                    let side = if has_left { Side::Left } else { Side::Right };
                    let target = self.depth();
                    self.descend(side);
                    self.exchange_entry_with_ancestor(target);
                }
            }
        }
    }

    /// Resolves a black-height deficit at the focus.
    pub fn rebalance_after_remove(&mut self) {
        loop {
            let depth = self.depth();
            if depth == 0 {
                trace!("remove fixup: absorb at root");
                return;
            }
            let side = self.trail[depth - 1].side;
            let sibling_side = side.opposite();

            let (sibling_red, near_red, far_red) = {
                let Some(sibling) = self.trail[depth - 1].node.child(sibling_side) else {
                    return;
                };
                (
                    sibling.is_red(),
                    is_red(sibling.child(side)),
                    is_red(sibling.child(sibling_side)),
                )
            };

            if sibling_red {
                trace!(depth, "remove fixup: red sibling");
                self.rotate_parent_toward_focus();
                self.swap_parent_colors();
                continue;
            }

            if !near_red && !far_red {
                trace!(depth, "remove fixup: push blackness up");
                let parent = &mut self.trail[depth - 1].node;
                let parent_was_black = !parent.is_red();
                parent.recolor_child(sibling_side, Color::Red);
                parent.color = Color::Black;
                if parent_was_black {
                    self.ascend();
                    continue;
                }
                return;
            }

            if !far_red {
                trace!(depth, "remove fixup: near nephew red");
                let parent = &mut self.trail[depth - 1].node;
                if let Some(sibling) = parent.take_child(sibling_side) {
                    let mut sibling = own(sibling);
                    sibling.color = Color::Red;
                    sibling.recolor_child(side, Color::Black);
                    let rotated = sibling.rotate(sibling_side);
                    parent.set_child(sibling_side, Some(ReferenceCounter::new(rotated)));
                }
                continue;
            }

            trace!(depth, "remove fixup: far nephew red");
            self.rotate_parent_toward_focus();
            self.swap_parent_colors();
            let promoted = self.depth() - 2;
            self.trail[promoted]
                .node
                .recolor_child(sibling_side, Color::Black);
            return;
        }
    }
}
