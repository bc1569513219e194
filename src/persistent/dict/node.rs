//! Tree storage: colors, sides and the immutable node.

use crate::persistent::ReferenceCounter;

/// The color of a red-black tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    Red,
    Black,
}

/// Which child slot of a node a path went through.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The mirror side.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A shared, possibly absent, subtree.
pub type Link<K, V> = Option<ReferenceCounter<Node<K, V>>>;

/// Internal node structure for the red-black tree.
///
/// Nodes never point at their parent. Once a node sits behind a
/// [`ReferenceCounter`] that is reachable from a published dictionary its
/// fields are never written again; rebalancing works on owned copies only.
#[derive(Clone)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub color: Color,
    pub left: Link<K, V>,
    pub right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a new red node with no children.
    #[must_use]
    pub const fn new_red(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
        }
    }

    /// Creates a new black node with no children.
    #[must_use]
    pub const fn new_black(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Black,
            left: None,
            right: None,
        }
    }

    #[must_use]
    pub const fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    #[must_use]
    pub const fn child(&self, side: Side) -> Option<&ReferenceCounter<Self>> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    pub const fn child_mut(&mut self, side: Side) -> &mut Link<K, V> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Detaches and returns the child on `side`, leaving the slot empty.
    pub fn take_child(&mut self, side: Side) -> Link<K, V> {
        self.child_mut(side).take()
    }

    pub fn set_child(&mut self, side: Side, child: Link<K, V>) {
        *self.child_mut(side) = child;
    }

    #[cfg(test)]
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<K: Clone, V: Clone> Node<K, V> {
    /// Replaces the color of the child on `side`.
    ///
    /// The child is copied unless this call already holds the only reference
    /// to it, so shared subtrees are left untouched.
    pub fn recolor_child(&mut self, side: Side, color: Color) {
        if let Some(child) = self.take_child(side) {
            let mut child = own(child);
            child.color = color;
            self.set_child(side, Some(ReferenceCounter::new(child)));
        }
    }

    /// Exchanges colors between this node and its child on `side`.
    pub fn swap_color_with_child(&mut self, side: Side) {
        if let Some(child) = self.take_child(side) {
            let mut child = own(child);
            std::mem::swap(&mut self.color, &mut child.color);
            self.set_child(side, Some(ReferenceCounter::new(child)));
        }
    }

    /// Single rotation toward `direction`.
    ///
    /// The child on the opposite side becomes the local root and `self` moves
    /// down on `direction`. Returns `self` unchanged when that child is absent.
    #[must_use]
    pub fn rotate(mut self, direction: Side) -> Self {
        let Some(pivot) = self.take_child(direction.opposite()) else {
            return self;
        };
        let mut pivot = own(pivot);
        self.set_child(direction.opposite(), pivot.take_child(direction));
        pivot.set_child(direction, Some(ReferenceCounter::new(self)));
        pivot
    }
}

/// Takes ownership of a node: moves it out when this is the last reference,
/// otherwise copies it (path copying).
#[must_use]
pub fn own<K: Clone, V: Clone>(node: ReferenceCounter<Node<K, V>>) -> Node<K, V> {
    ReferenceCounter::unwrap_or_clone(node)
}

/// Absent children count as black.
#[must_use]
pub fn is_red<K, V>(node: Option<&ReferenceCounter<Node<K, V>>>) -> bool {
    node.is_some_and(|node| node.is_red())
}
