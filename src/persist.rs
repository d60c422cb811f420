//! ## Persistence
//!
//! A flattened, serde-friendly wire format for a [`Tree`](crate::tree::Tree),
//! plus file save/load helpers built on `bincode`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::geometry::Rectangle;
use crate::node::{Arena, Node, NodeId, NodeKind};
use crate::split::SplitAlgorithm;

/// One node in the flattened wire format. `children` is empty for entry nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedNode<D> {
    bbox: Rectangle,
    is_leaf_directory: bool,
    is_entry: bool,
    children: Vec<u32>,
    data: Option<D>,
}

/// A whole tree flattened to a contiguous, parent-link-free node list, ready to
/// round-trip through `bincode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedTree<D> {
    nodes: Vec<PersistedNode<D>>,
    root: u32,
    max_entries: usize,
    algorithm: SplitAlgorithm,
}

/// Flattens `arena` into `PersistedTree`. Arena ids are renumbered densely
/// (0..n) in arena-iteration order so tombstoned slots are not carried over.
pub fn to_persisted<D: Clone>(
    arena: &Arena<D>,
    root: NodeId,
    max_entries: usize,
    algorithm: SplitAlgorithm,
) -> PersistedTree<D> {
    let ids: Vec<NodeId> = arena.live_ids().collect();
    let mut renumber = std::collections::HashMap::with_capacity(ids.len());
    for (new_idx, &old_id) in ids.iter().enumerate() {
        renumber.insert(old_id, new_idx as u32);
    }

    let nodes = ids
        .iter()
        .map(|&id| {
            let node = arena.get(id);
            match &node.kind {
                NodeKind::Entry { data } => PersistedNode {
                    bbox: node.bbox,
                    is_leaf_directory: false,
                    is_entry: true,
                    children: Vec::new(),
                    data: Some(data.clone()),
                },
                NodeKind::Directory { children, is_leaf } => PersistedNode {
                    bbox: node.bbox,
                    is_leaf_directory: *is_leaf,
                    is_entry: false,
                    children: children.iter().map(|c| renumber[c]).collect(),
                    data: None,
                },
            }
        })
        .collect();

    PersistedTree {
        nodes,
        root: renumber[&root],
        max_entries,
        algorithm,
    }
}

/// Rebuilds an `Arena` and root id from a `PersistedTree`, reconstructing parent
/// links with a single pass over the flattened node list.
pub fn from_persisted<D: Clone>(
    persisted: &PersistedTree<D>,
) -> (Arena<D>, NodeId, usize, SplitAlgorithm) {
    let mut arena = Arena::new();
    let mut ids = Vec::with_capacity(persisted.nodes.len());

    for pn in &persisted.nodes {
        let kind = if pn.is_entry {
            NodeKind::Entry {
                data: pn.data.clone().expect("entry node missing data"),
            }
        } else {
            NodeKind::Directory {
                children: Vec::new(),
                is_leaf: pn.is_leaf_directory,
            }
        };
        ids.push(arena.alloc(Node {
            bbox: pn.bbox,
            parent: None,
            kind,
        }));
    }

    for (idx, pn) in persisted.nodes.iter().enumerate() {
        if pn.is_entry {
            continue;
        }
        let node_id = ids[idx];
        let child_ids: Vec<NodeId> = pn.children.iter().map(|&c| ids[c as usize]).collect();
        for &child in &child_ids {
            arena.get_mut(child).parent = Some(node_id);
        }
        if let Some(children) = arena.get_mut(node_id).children_mut() {
            *children = child_ids;
        }
    }

    let root = ids[persisted.root as usize];
    (arena, root, persisted.max_entries, persisted.algorithm)
}

/// Serializes `persisted` to `path` via `bincode`.
pub fn save<D: Serialize>(persisted: &PersistedTree<D>, path: &Path) -> Result<(), TreeError> {
    let file = File::create(path).map_err(|e| TreeError::Deserialize(e.to_string()))?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, persisted).map_err(|e| TreeError::Deserialize(e.to_string()))
}

/// Deserializes a `PersistedTree` from `path` via `bincode`.
pub fn load<D: for<'de> Deserialize<'de>>(path: &Path) -> Result<PersistedTree<D>, TreeError> {
    let file = File::open(path).map_err(|e| TreeError::Deserialize(e.to_string()))?;
    let reader = BufReader::new(file);
    bincode::deserialize_from(reader).map_err(|e| TreeError::Deserialize(e.to_string()))
}
