//! ## Insertion engine
//!
//! Choose-leaf descent, MBR adjustment back up to the root, and overflow handling
//! with split propagation and root promotion.

use tracing::debug;

use crate::geometry::Rectangle;
use crate::node::{Arena, Node, NodeId, NodeKind};
use crate::split::{self, SplitAlgorithm};

/// Descends from `start` to a leaf directory node, at each level choosing the
/// child requiring the smallest area enlargement to cover `bbox` (ties: first
/// encountered). Returns the id of the leaf directory node reached.
pub fn choose_leaf<D>(arena: &Arena<D>, start: NodeId, bbox: &Rectangle) -> NodeId {
    let mut current = start;
    loop {
        let node = arena.get(current);
        if node.is_leaf_directory() {
            return current;
        }
        let children = node.children();
        let mut best = children[0];
        let mut best_enlargement = arena.get(best).bbox.enlargement(bbox);
        for &child in &children[1..] {
            let enlargement = arena.get(child).bbox.enlargement(bbox);
            if enlargement < best_enlargement {
                best_enlargement = enlargement;
                best = child;
            }
        }
        current = best;
    }
}

/// Recomputes `node`'s bbox from its current children.
pub fn recompute_bbox<D>(arena: &mut Arena<D>, node: NodeId) {
    let combined = {
        let n = arena.get(node);
        let children = n.children();
        let mut iter = children.iter();
        let first = arena.get(*iter.next().expect("directory node has no children")).bbox;
        iter.fold(first, |acc, &c| acc.combine(&arena.get(c).bbox))
    };
    arena.get_mut(node).bbox = combined;
}

/// Walks parent links from `start` to the root, recomputing each ancestor's bbox.
/// A directory node found with zero children along the way is detached from its
/// parent (possible only via later condensation paths); if that empties the root,
/// the caller is responsible for resetting the tree to an empty leaf root.
pub fn adjust_upward<D>(arena: &mut Arena<D>, start: NodeId) {
    let mut current = Some(start);
    while let Some(node_id) = current {
        let parent = arena.get(node_id).parent;
        let is_empty_directory = matches!(
            &arena.get(node_id).kind,
            NodeKind::Directory { children, .. } if children.is_empty()
        );
        if is_empty_directory {
            if let Some(parent_id) = parent {
                detach_child(arena, parent_id, node_id);
                arena.free(node_id);
            }
        } else if arena.get(node_id).as_directory().is_some() {
            recompute_bbox(arena, node_id);
        }
        current = parent;
    }
}

fn detach_child<D>(arena: &mut Arena<D>, parent: NodeId, child: NodeId) {
    if let Some(children) = arena.get_mut(parent).children_mut() {
        children.retain(|&c| c != child);
    }
}

/// Inserts a pre-built node (`entry`, already carrying its own bbox) under the
/// leaf directory node chosen for `entry`'s bbox, then adjusts and splits upward.
///
/// Returns the (possibly changed) root id.
pub fn insert_node<D>(
    arena: &mut Arena<D>,
    root: NodeId,
    entry_bbox: Rectangle,
    entry: Node<D>,
    max_entries: usize,
    algorithm: SplitAlgorithm,
) -> NodeId {
    let leaf = choose_leaf(arena, root, &entry_bbox);
    let entry_id = arena.alloc(entry);
    arena.get_mut(entry_id).parent = Some(leaf);
    arena
        .get_mut(leaf)
        .children_mut()
        .expect("choose_leaf returns a directory node")
        .push(entry_id);

    adjust_upward(arena, leaf);
    resolve_overflow(arena, root, leaf, max_entries, algorithm)
}

/// Splits `node` (and any ancestor that overflows as a consequence) until no
/// node in the path from `node` to the root exceeds `max_entries`. Promotes a
/// new root if the tree root itself overflows.
fn resolve_overflow<D>(
    arena: &mut Arena<D>,
    root: NodeId,
    mut node: NodeId,
    max_entries: usize,
    algorithm: SplitAlgorithm,
) -> NodeId {
    let mut root = root;
    loop {
        let len = arena.get(node).children().len();
        if len <= max_entries {
            return root;
        }

        debug!(node = node.index(), len, "node overflowed, splitting");

        let parent = arena.get(node).parent;
        let is_leaf = arena.get(node).is_leaf_directory();

        let children: Vec<(NodeId, Rectangle)> = arena
            .get(node)
            .children()
            .iter()
            .map(|&c| (c, arena.get(c).bbox))
            .collect();

        let (group1, group2) = split::split(children, algorithm);

        let bbox1 = combine(&group1);
        let bbox2 = combine(&group2);

        // Reuse `node`'s id for the first group so existing references to it
        // elsewhere (notably `root`) keep pointing at a live node.
        arena.get_mut(node).bbox = bbox1;
        if let Some(children_vec) = arena.get_mut(node).children_mut() {
            children_vec.clear();
            children_vec.extend(group1.iter().map(|(id, _)| *id));
        }
        for (child, _) in &group1 {
            arena.get_mut(*child).parent = Some(node);
        }

        let sibling = arena.alloc(Node {
            bbox: bbox2,
            parent,
            kind: NodeKind::Directory {
                children: group2.iter().map(|(id, _)| *id).collect(),
                is_leaf,
            },
        });
        for (child, _) in &group2 {
            arena.get_mut(*child).parent = Some(sibling);
        }

        match parent {
            Some(parent_id) => {
                arena
                    .get_mut(parent_id)
                    .children_mut()
                    .expect("parent of a directory node is itself a directory")
                    .push(sibling);
                recompute_bbox(arena, parent_id);
                node = parent_id;
            }
            None => {
                // `node` was the root; promote a fresh root over both halves.
                let new_root = arena.alloc(Node {
                    bbox: bbox1.combine(&bbox2),
                    parent: None,
                    kind: NodeKind::Directory {
                        children: vec![node, sibling],
                        is_leaf: false,
                    },
                });
                arena.get_mut(node).parent = Some(new_root);
                arena.get_mut(sibling).parent = Some(new_root);
                root = new_root;
                return root;
            }
        }
    }
}

fn combine(entries: &[(NodeId, Rectangle)]) -> Rectangle {
    let mut iter = entries.iter();
    let first = iter.next().expect("split group must be non-empty").1;
    iter.fold(first, |acc, (_, b)| acc.combine(b))
}
