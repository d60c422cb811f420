//! ## Deletion and condensation
//!
//! Find-leaf descent by box+data equality, removal, bottom-up condensation of
//! underfull directory nodes, and orphan reinsertion.

use tracing::debug;

use crate::geometry::Rectangle;
use crate::insert::{insert_node, recompute_bbox};
use crate::node::{Arena, Node, NodeId, NodeKind};
use crate::split::SplitAlgorithm;

/// Minimum number of children a non-root directory node may carry before it is
/// considered underfull and condensed away.
pub fn min_fill(max_entries: usize) -> usize {
    (max_entries / 2).max(1)
}

/// Finds the leaf-child entry node whose box equals `bbox` and whose data equals
/// `data`, by exhaustive descent pruned by MBR containment.
fn find_entry<D: PartialEq>(
    arena: &Arena<D>,
    node: NodeId,
    bbox: &Rectangle,
    data: &D,
) -> Option<NodeId> {
    let n = arena.get(node);
    if !n.bbox.intersects(bbox) {
        return None;
    }
    match &n.kind {
        NodeKind::Entry { data: d } => {
            if n.bbox == *bbox && d == data {
                Some(node)
            } else {
                None
            }
        }
        NodeKind::Directory { children, .. } => {
            for &child in children {
                if let Some(found) = find_entry(arena, child, bbox, data) {
                    return Some(found);
                }
            }
            None
        }
    }
}

/// Removes the entry matching `(bbox, data)` if present, condenses the tree, and
/// returns the (possibly changed) root id together with whether anything was
/// removed.
pub fn delete<D: PartialEq>(
    arena: &mut Arena<D>,
    root: NodeId,
    bbox: &Rectangle,
    data: &D,
    max_entries: usize,
    algorithm: SplitAlgorithm,
) -> (NodeId, bool) {
    let Some(entry_id) = find_entry(arena, root, bbox, data) else {
        return (root, false);
    };

    let leaf = arena.get(entry_id).parent.expect("entry nodes always have a parent");
    detach(arena, leaf, entry_id);
    arena.free(entry_id);

    debug!(leaf = leaf.index(), "removed entry, condensing");

    let mut orphans: Vec<NodeId> = Vec::new();
    let mut root = condense(arena, root, leaf, max_entries, &mut orphans);

    // Orphans are subtrees whose own roots must be reinserted as whole units:
    // leaf-level orphans go back in as entries, directory-level orphans are
    // walked for their leaf descendants only if they themselves are leaves.
    // Per spec, only leaf-held entries are reinserted; an orphaned directory
    // node's descendants are flattened to their entries before reinsertion.
    let leaves = collect_leaf_entries(arena, &orphans);

    for (bbox, node) in leaves {
        root = insert_node(arena, root, bbox, node, max_entries, algorithm);
    }

    root = collapse_root(arena, root);

    (root, true)
}

fn detach<D>(arena: &mut Arena<D>, parent: NodeId, child: NodeId) {
    if let Some(children) = arena.get_mut(parent).children_mut() {
        children.retain(|&c| c != child);
    }
}

/// Walks from `start` up to (and including checks on) the root, removing any
/// directory node that has fallen below `min_fill` and recomputing MBRs for the
/// survivors. Removed nodes' ids (and all ids reachable from them) are pushed
/// onto `orphans` for later reinsertion.
fn condense<D>(
    arena: &mut Arena<D>,
    root: NodeId,
    start: NodeId,
    max_entries: usize,
    orphans: &mut Vec<NodeId>,
) -> NodeId {
    let threshold = min_fill(max_entries);
    let mut current = Some(start);
    while let Some(node_id) = current {
        if node_id == root {
            // The root is exempt from the min-fill rule; only bbox recompute applies.
            if arena.get(node_id).as_directory().is_some() && !arena.get(node_id).children().is_empty() {
                recompute_bbox(arena, node_id);
            }
            break;
        }

        let parent = arena.get(node_id).parent.expect("non-root node has a parent");
        let len = arena.get(node_id).children().len();

        if len < threshold {
            detach(arena, parent, node_id);
            collect_subtree(arena, node_id, orphans);
            current = Some(parent);
        } else {
            recompute_bbox(arena, node_id);
            current = Some(parent);
        }
    }
    root
}

/// Pushes `node` onto `orphans`. Children are left attached to `node` so
/// `collect_leaf_entries` can later flatten them; the whole subtree is freed
/// as a unit once entries have been extracted.
fn collect_subtree<D>(_arena: &Arena<D>, node: NodeId, orphans: &mut Vec<NodeId>) {
    orphans.push(node);
}

/// Flattens each orphaned subtree down to its leaf-child entries, returning
/// each entry's bbox alongside a freshly detached `Node` ready for reinsertion.
/// Every node visited, entry or intermediate directory, is freed from the arena.
fn collect_leaf_entries<D>(arena: &mut Arena<D>, orphans: &[NodeId]) -> Vec<(Rectangle, Node<D>)> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = orphans.to_vec();
    while let Some(node_id) = stack.pop() {
        if arena.get(node_id).is_entry() {
            let bbox = arena.get(node_id).bbox;
            let mut taken = arena.free(node_id);
            taken.parent = None;
            out.push((bbox, taken));
        } else {
            let children = arena.get(node_id).children().to_vec();
            arena.free(node_id);
            stack.extend(children);
        }
    }
    out
}

/// If the root is a non-leaf directory with exactly one child, replaces the
/// root with that child (repeatedly). A leaf root, even an empty one, is never
/// collapsed.
fn collapse_root<D>(arena: &mut Arena<D>, mut root: NodeId) -> NodeId {
    loop {
        let node = arena.get(root);
        if node.is_leaf_directory() {
            return root;
        }
        let children = node.children().to_vec();
        if children.len() != 1 {
            return root;
        }
        let only_child = children[0];
        arena.free(root);
        arena.get_mut(only_child).parent = None;
        root = only_child;
    }
}
