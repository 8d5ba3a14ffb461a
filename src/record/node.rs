//! Trie node layout and the path-walking algorithms over it.
//!
//! A record trie is addressed by the dense index of a key. Each level of the
//! trie consumes 5 bits of that index, least significant group first, to pick
//! one of 32 slots. Every level but the last holds branch slots; the last
//! level holds value slots, which stay [`Slot::Empty`] until written.

use super::ReferenceCounter;

// =============================================================================
// Constants
// =============================================================================

/// Branching factor (2^5 = 32)
pub(crate) const BRANCHING_FACTOR: usize = 32;

/// Bits of a key index consumed per level
pub(crate) const BITS_PER_LEVEL: usize = 5;

/// Bit mask for extracting the selector within a node
const MASK: usize = BRANCHING_FACTOR - 1;

// =============================================================================
// Node Definition
// =============================================================================

/// A single position in a node, or the root of a trie.
pub(crate) enum Slot<V> {
    /// Never written; reads fall back to the schema default
    Empty,
    /// Child node one level down
    Branch(ReferenceCounter<Node<V>>),
    /// Stored value (final level only)
    Value(ReferenceCounter<V>),
}

impl<V> Clone for Slot<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Branch(node) => Self::Branch(node.clone()),
            Self::Value(value) => Self::Value(value.clone()),
        }
    }
}

/// Branch node holding 32 slots.
pub(crate) struct Node<V> {
    children: [Slot<V>; BRANCHING_FACTOR],
}

impl<V> Clone for Node<V> {
    /// Copies the slot array; children are shared, not cloned.
    fn clone(&self) -> Self {
        Self {
            children: self.children.clone(),
        }
    }
}

impl<V> Node<V> {
    fn empty() -> Self {
        Self {
            children: std::array::from_fn(|_| Slot::Empty),
        }
    }

    #[cfg(test)]
    pub(crate) fn child(&self, selector: usize) -> &Slot<V> {
        &self.children[selector & MASK]
    }
}

impl<V> Slot<V> {
    /// Builds an empty trie `levels` branches deep.
    ///
    /// All levels above the last are populated with branch slots. Empty
    /// subtrees of the same level are the same node, shared by reference.
    pub(crate) fn empty_tree(levels: usize) -> Self {
        if levels == 0 {
            return Self::Empty;
        }
        let mut subtree = Self::Branch(ReferenceCounter::new(Node::empty()));
        for _ in 1..levels {
            let shared = subtree;
            subtree = Self::Branch(ReferenceCounter::new(Node {
                children: std::array::from_fn(|_| shared.clone()),
            }));
        }
        subtree
    }

    /// Returns the value stored at `index`, or `None` if that slot is empty.
    ///
    /// Presence is decided by the terminal slot in its immediate parent.
    pub(crate) fn lookup(&self, index: usize, levels: usize) -> Option<&V> {
        let mut slot = self;
        let mut path = index;
        for _ in 0..levels {
            let Self::Branch(node) = slot else {
                return None;
            };
            slot = &node.children[path & MASK];
            path >>= BITS_PER_LEVEL;
        }
        match slot {
            Self::Value(value) => Some(value.as_ref()),
            Self::Empty | Self::Branch(_) => None,
        }
    }

    /// Returns a new trie with `value` stored at `index`.
    ///
    /// Only the nodes on the path to `index` are copied; every other subtree
    /// is shared with `self`.
    pub(crate) fn assoc(&self, index: usize, levels: usize, value: ReferenceCounter<V>) -> Self {
        if levels == 0 {
            return Self::Value(value);
        }
        let mut node = match self {
            Self::Branch(node) => node.as_ref().clone(),
            Self::Empty | Self::Value(_) => Node::empty(),
        };
        let selector = index & MASK;
        node.children[selector] =
            node.children[selector].assoc(index >> BITS_PER_LEVEL, levels - 1, value);
        Self::Branch(ReferenceCounter::new(node))
    }

    /// Stores `value` at `index` while this trie is still private.
    ///
    /// Nodes that are shared with another trie are copied before being
    /// written, so a trie that has already been published is never changed.
    pub(crate) fn insert_in_place(
        &mut self,
        index: usize,
        levels: usize,
        value: ReferenceCounter<V>,
    ) {
        if levels == 0 {
            *self = Self::Value(value);
            return;
        }
        if !matches!(self, Self::Branch(_)) {
            *self = Self::Branch(ReferenceCounter::new(Node::empty()));
        }
        if let Self::Branch(node) = self {
            let node = ReferenceCounter::make_mut(node);
            node.children[index & MASK].insert_in_place(
                index >> BITS_PER_LEVEL,
                levels - 1,
                value,
            );
        }
    }

    /// Returns the branch node held by this slot.
    #[cfg(test)]
    pub(crate) fn node(&self) -> Option<&ReferenceCounter<Node<V>>> {
        match self {
            Self::Branch(node) => Some(node),
            Self::Empty | Self::Value(_) => None,
        }
    }

    /// Returns the depth of branch slots below and including this one.
    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        match self {
            Self::Branch(node) => 1 + node.children[0].depth(),
            Self::Empty | Self::Value(_) => 0,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
