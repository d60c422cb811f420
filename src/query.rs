//! ## Queries
//!
//! Window search, point lookup, and nearest-neighbor branch-and-bound.

use crate::geometry::Rectangle;
use crate::node::{Arena, NodeId, NodeKind};

/// Collects every entry whose box intersects `window`, descending only into
/// directory nodes whose own box intersects it.
pub fn search<'a, D>(arena: &'a Arena<D>, root: NodeId, window: &Rectangle, out: &mut Vec<&'a D>) {
    let node = arena.get(root);
    if !node.bbox.intersects(window) {
        return;
    }
    match &node.kind {
        NodeKind::Entry { data } => out.push(data),
        NodeKind::Directory { children, .. } => {
            for &child in children {
                search(arena, child, window, out);
            }
        }
    }
}

/// Collects every entry whose box contains `(x, y)`.
pub fn point_query<'a, D>(arena: &'a Arena<D>, root: NodeId, x: f64, y: f64, out: &mut Vec<&'a D>) {
    let node = arena.get(root);
    if !node.bbox.contains_point(x, y) {
        return;
    }
    match &node.kind {
        NodeKind::Entry { data } => out.push(data),
        NodeKind::Directory { children, .. } => {
            for &child in children {
                point_query(arena, child, x, y, out);
            }
        }
    }
}

/// Depth-first, MBR-distance-ascending branch-and-bound nearest neighbor search.
/// Returns `(None, f64::INFINITY)` when the tree holds no entries.
pub fn nearest<'a, D>(arena: &'a Arena<D>, root: NodeId, x: f64, y: f64) -> (Option<&'a D>, f64) {
    let mut best: Option<&'a D> = None;
    let mut best_dist = f64::INFINITY;
    nearest_rec(arena, root, x, y, &mut best, &mut best_dist);
    (best, best_dist)
}

fn nearest_rec<'a, D>(
    arena: &'a Arena<D>,
    node_id: NodeId,
    x: f64,
    y: f64,
    best: &mut Option<&'a D>,
    best_dist: &mut f64,
) {
    let node = arena.get(node_id);

    match &node.kind {
        NodeKind::Entry { data } => {
            let d = node.bbox.mbr_distance(x, y);
            if d < *best_dist {
                *best_dist = d;
                *best = Some(data);
            }
        }
        NodeKind::Directory { children, .. } => {
            let mut ordered: Vec<NodeId> = children.clone();
            ordered.sort_by(|&a, &b| {
                let da = arena.get(a).bbox.mbr_distance(x, y);
                let db = arena.get(b).bbox.mbr_distance(x, y);
                da.partial_cmp(&db).unwrap()
            });
            for child in ordered {
                // Pruning cutoff: a child whose own MBR is already farther than the
                // current best candidate cannot contain anything closer.
                if arena.get(child).bbox.mbr_distance(x, y) >= *best_dist {
                    continue;
                }
                nearest_rec(arena, child, x, y, best, best_dist);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insert::insert_node;
    use crate::node::Node;
    use crate::split::SplitAlgorithm;

    fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rectangle {
        Rectangle::new(min_x, min_y, max_x, max_y).unwrap()
    }

    fn fresh_root<D>() -> (Arena<D>, NodeId) {
        let mut arena = Arena::new();
        let root = arena.alloc(Node {
            bbox: Rectangle::zero(),
            parent: None,
            kind: NodeKind::Directory {
                children: Vec::new(),
                is_leaf: true,
            },
        });
        (arena, root)
    }

    fn entry_node<D>(bbox: Rectangle, data: D) -> Node<D> {
        Node {
            bbox,
            parent: None,
            kind: NodeKind::Entry { data },
        }
    }

    #[test]
    fn test_search_empty_tree_returns_nothing() {
        let (arena, root) = fresh_root::<&str>();
        let mut out = Vec::new();
        search(&arena, root, &rect(0.0, 0.0, 10.0, 10.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_search_finds_intersecting_entries() {
        let (mut arena, mut root) = fresh_root::<&str>();
        for (b, d) in [
            (rect(0.0, 0.0, 1.0, 1.0), "a"),
            (rect(5.0, 5.0, 6.0, 6.0), "b"),
        ] {
            root = insert_node(&mut arena, root, b, entry_node(b, d), 4, SplitAlgorithm::Quadratic);
        }
        let mut out = Vec::new();
        search(&arena, root, &rect(0.0, 0.0, 2.0, 2.0), &mut out);
        assert_eq!(out, vec![&"a"]);
    }

    #[test]
    fn test_point_query_matches_containing_entries_only() {
        let (mut arena, mut root) = fresh_root::<&str>();
        for (b, d) in [
            (rect(0.0, 0.0, 2.0, 2.0), "a"),
            (rect(5.0, 5.0, 6.0, 6.0), "b"),
        ] {
            root = insert_node(&mut arena, root, b, entry_node(b, d), 4, SplitAlgorithm::Quadratic);
        }
        let mut out = Vec::new();
        point_query(&arena, root, 1.0, 1.0, &mut out);
        assert_eq!(out, vec![&"a"]);
    }

    #[test]
    fn test_nearest_on_empty_tree() {
        let (arena, root) = fresh_root::<&str>();
        let (found, dist) = nearest(&arena, root, 0.0, 0.0);
        assert!(found.is_none());
        assert_eq!(dist, f64::INFINITY);
    }

    #[test]
    fn test_nearest_picks_closest_entry() {
        let (mut arena, mut root) = fresh_root::<&str>();
        for (b, d) in [
            (rect(0.0, 0.0, 1.0, 1.0), "near"),
            (rect(10.0, 10.0, 11.0, 11.0), "far"),
        ] {
            root = insert_node(&mut arena, root, b, entry_node(b, d), 4, SplitAlgorithm::Quadratic);
        }
        let (found, dist) = nearest(&arena, root, 2.0, 0.0);
        assert_eq!(found, Some(&"near"));
        assert_eq!(dist, 1.0);
    }
}
