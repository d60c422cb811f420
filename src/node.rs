//! ## Node model
//!
//! The tree stores every node — directory and entry alike — in a flat arena so
//! that parent back-references can be plain indices rather than owning pointers
//! (see the design notes on why: it keeps ownership down the tree exclusive while
//! still giving every node a cheap, stable way to find its parent, and it gives
//! persistence stable integer ids for free).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Rectangle;

/// An index into a [`Tree`](crate::tree::Tree)'s node arena.
///
/// `NodeId` is a lightweight, `Copy` handle — it carries no lifetime and does not
/// keep the node it names alive. Arena slots are reused after deletion, so a stale
/// id from a previous generation of the tree must never be dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The payload-bearing part of a node: either a directory of children, or a
/// leaf-level entry carrying the caller's data.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind<D> {
    /// A directory node. `is_leaf` is true when `children` are entry nodes;
    /// false when they are further directory nodes.
    Directory { children: Vec<NodeId>, is_leaf: bool },
    /// A leaf-child entry: a `(box, data)` pair with no children of its own.
    Entry { data: D },
}

/// A single node in the arena: its bounding box, its parent (if any), and its kind.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node<D> {
    pub bbox: Rectangle,
    pub parent: Option<NodeId>,
    pub kind: NodeKind<D>,
}

impl<D> Node<D> {
    pub fn is_entry(&self) -> bool {
        matches!(self.kind, NodeKind::Entry { .. })
    }

    pub fn as_directory(&self) -> Option<(&Vec<NodeId>, bool)> {
        match &self.kind {
            NodeKind::Directory { children, is_leaf } => Some((children, *is_leaf)),
            NodeKind::Entry { .. } => None,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children, .. } => children,
            NodeKind::Entry { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Directory { children, .. } => Some(children),
            NodeKind::Entry { .. } => None,
        }
    }

    pub fn is_leaf_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { is_leaf: true, .. })
    }
}

/// An arena of nodes with free-slot reuse, indexed by [`NodeId`].
///
/// Deleting a node leaves a tombstone slot on the free list instead of shifting
/// the rest of the arena, so existing `NodeId`s elsewhere in the tree stay valid.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Arena<D> {
    slots: Vec<Option<Node<D>>>,
    free: Vec<u32>,
}

impl<D> Arena<D> {
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn alloc(&mut self, node: Node<D>) -> NodeId {
        if let Some(idx) = self.free.pop() {
            self.slots[idx as usize] = Some(node);
            NodeId(idx)
        } else {
            self.slots.push(Some(node));
            NodeId((self.slots.len() - 1) as u32)
        }
    }

    pub fn free(&mut self, id: NodeId) -> Node<D> {
        let slot = self.slots[id.index()]
            .take()
            .expect("freeing an already-empty arena slot");
        self.free.push(id.0);
        slot
    }

    pub fn get(&self, id: NodeId) -> &Node<D> {
        self.slots[id.index()]
            .as_ref()
            .expect("dereferencing a freed NodeId")
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<D> {
        self.slots[id.index()]
            .as_mut()
            .expect("dereferencing a freed NodeId")
    }

    /// Live (non-tombstoned) node count.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn live_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| NodeId(i as u32)))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
