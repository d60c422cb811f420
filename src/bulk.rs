//! ## Bulk loading
//!
//! Centroid-sort bottom-up tree construction, used to build a tree from a batch
//! of `(box, data)` pairs in one pass instead of via repeated single inserts.

use crate::geometry::Rectangle;
use crate::node::{Arena, Node, NodeId, NodeKind};

/// Builds a fresh tree from `items`, returning its root. An empty `items` yields
/// an empty leaf root, matching a freshly constructed tree.
pub fn bulk_load<D>(arena: &mut Arena<D>, items: Vec<(Rectangle, D)>, max_entries: usize) -> NodeId {
    if items.is_empty() {
        return arena.alloc(Node {
            bbox: Rectangle::zero(),
            parent: None,
            kind: NodeKind::Directory {
                children: Vec::new(),
                is_leaf: true,
            },
        });
    }

    let mut sorted = items;
    sorted.sort_by(|a, b| centroid_x(&a.0).partial_cmp(&centroid_x(&b.0)).unwrap());

    let group_size = chunk_size(sorted.len(), max_entries);

    let mut level: Vec<(NodeId, Rectangle)> = Vec::new();
    let mut remaining = sorted;
    while !remaining.is_empty() {
        let tail = remaining.split_off(group_size.min(remaining.len()));
        let chunk = std::mem::replace(&mut remaining, tail);

        let bbox = chunk
            .iter()
            .map(|(b, _)| *b)
            .reduce(|acc, b| acc.combine(&b))
            .expect("chunk is non-empty");

        let leaf_id = arena.alloc(Node {
            bbox,
            parent: None,
            kind: NodeKind::Directory {
                children: Vec::new(),
                is_leaf: true,
            },
        });
        for (b, data) in chunk {
            let entry_id = arena.alloc(Node {
                bbox: b,
                parent: Some(leaf_id),
                kind: NodeKind::Entry { data },
            });
            arena
                .get_mut(leaf_id)
                .children_mut()
                .expect("leaf is a directory")
                .push(entry_id);
        }
        level.push((leaf_id, bbox));
    }

    collapse_levels(arena, level, max_entries)
}

fn centroid_x(r: &Rectangle) -> f64 {
    (r.min_x + r.max_x) / 2.0
}

fn chunk_size(n: usize, max_entries: usize) -> usize {
    let group_count = div_ceil(n, max_entries).max(1);
    div_ceil(n, group_count)
}

fn div_ceil(n: usize, d: usize) -> usize {
    (n + d - 1) / d
}

/// Repeatedly groups a level of nodes into parents by the same centroid-sort
/// rule until a single root remains.
fn collapse_levels<D>(
    arena: &mut Arena<D>,
    mut level: Vec<(NodeId, Rectangle)>,
    max_entries: usize,
) -> NodeId {
    while level.len() > 1 {
        level.sort_by(|a, b| a.1.center(0).partial_cmp(&b.1.center(0)).unwrap());

        let group_size = chunk_size(level.len(), max_entries);
        let mut next_level = Vec::new();
        let mut remaining = level;

        while !remaining.is_empty() {
            let tail = remaining.split_off(group_size.min(remaining.len()));
            let chunk = std::mem::replace(&mut remaining, tail);

            let bbox = chunk
                .iter()
                .map(|(_, b)| *b)
                .reduce(|acc, b| acc.combine(&b))
                .expect("chunk is non-empty");
            let children: Vec<NodeId> = chunk.iter().map(|(id, _)| *id).collect();

            let parent_id = arena.alloc(Node {
                bbox,
                parent: None,
                kind: NodeKind::Directory {
                    children: children.clone(),
                    is_leaf: false,
                },
            });
            for child in children {
                arena.get_mut(child).parent = Some(parent_id);
            }
            next_level.push((parent_id, bbox));
        }

        level = next_level;
    }

    level[0].0
}
