//! ## Public tree façade
//!
//! [`Tree`] ties the arena, split heuristics, insertion, deletion, query, and
//! bulk-load engines together behind the crate's public API.

use tracing::info;

use crate::bulk;
use crate::delete;
use crate::error::TreeError;
use crate::geometry::Rectangle;
use crate::insert::insert_node;
use crate::node::{Arena, Node, NodeId, NodeKind};
use crate::query;
use crate::split::SplitAlgorithm;

#[cfg(feature = "serde")]
use crate::persist::{self, PersistedTree};
#[cfg(feature = "serde")]
use std::path::Path;

/// Summary statistics over a tree's current shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub height: usize,
    pub average_node_fill: f64,
}

/// An in-memory R-tree over axis-aligned rectangles.
///
/// `D` is the caller's payload type stored at each leaf entry.
pub struct Tree<D> {
    arena: Arena<D>,
    root: NodeId,
    max_entries: usize,
    algorithm: SplitAlgorithm,
}

impl<D> Tree<D> {
    /// Builds an empty tree. `max_entries` must be at least 2.
    pub fn new(max_entries: usize, algorithm: SplitAlgorithm) -> Result<Self, TreeError> {
        if max_entries < 2 {
            return Err(TreeError::InvalidCapacity {
                capacity: max_entries,
            });
        }

        let mut arena = Arena::new();
        let root = arena.alloc(Node {
            bbox: Rectangle::zero(),
            parent: None,
            kind: NodeKind::Directory {
                children: Vec::new(),
                is_leaf: true,
            },
        });

        info!(max_entries, ?algorithm, "created tree");

        Ok(Tree {
            arena,
            root,
            max_entries,
            algorithm,
        })
    }

    /// Inserts `data` under `bbox`.
    pub fn insert(&mut self, bbox: Rectangle, data: D) {
        let entry = Node {
            bbox,
            parent: None,
            kind: NodeKind::Entry { data },
        };
        self.root = insert_node(&mut self.arena, self.root, bbox, entry, self.max_entries, self.algorithm);
    }

    /// Removes the entry matching both `bbox` and `data`, if present. Returns
    /// whether an entry was removed.
    pub fn delete(&mut self, bbox: &Rectangle, data: &D) -> bool
    where
        D: PartialEq,
    {
        let (root, removed) =
            delete::delete(&mut self.arena, self.root, bbox, data, self.max_entries, self.algorithm);
        self.root = root;
        removed
    }

    /// Returns every entry whose box intersects `window`.
    pub fn search(&self, window: &Rectangle) -> Vec<&D> {
        let mut out = Vec::new();
        query::search(&self.arena, self.root, window, &mut out);
        out
    }

    /// Returns every entry whose box contains `(x, y)`.
    pub fn point_query(&self, x: f64, y: f64) -> Vec<&D> {
        let mut out = Vec::new();
        query::point_query(&self.arena, self.root, x, y, &mut out);
        out
    }

    /// Finds the entry nearest to `(x, y)` by MBR distance. Returns
    /// `(None, f64::INFINITY)` on an empty tree.
    pub fn nearest(&self, x: f64, y: f64) -> (Option<&D>, f64) {
        query::nearest(&self.arena, self.root, x, y)
    }

    /// Discards any existing content and rebuilds the tree from `items` in one
    /// pass via centroid-sort bulk loading.
    pub fn bulk_load(&mut self, items: Vec<(Rectangle, D)>) {
        self.arena.clear();
        self.root = bulk::bulk_load(&mut self.arena, items, self.max_entries);
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.arena
            .live_ids()
            .filter(|&id| self.arena.get(id).is_entry())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Computes summary statistics over the tree's current shape.
    pub fn stats(&self) -> Stats {
        let mut node_count = 0usize;
        let mut leaf_count = 0usize;
        let mut fill_sum = 0usize;
        let mut directory_count = 0usize;

        for id in self.arena.live_ids() {
            let node = self.arena.get(id);
            node_count += 1;
            if let Some((children, is_leaf)) = node.as_directory() {
                directory_count += 1;
                fill_sum += children.len();
                if is_leaf {
                    leaf_count += 1;
                }
            }
        }

        let height = self.height();
        let average_node_fill = if directory_count == 0 {
            0.0
        } else {
            fill_sum as f64 / directory_count as f64
        };

        Stats {
            node_count,
            leaf_count,
            height,
            average_node_fill,
        }
    }

    /// Depth of the tree in directory levels, counting the root; an empty
    /// leaf-only tree has height 1.
    fn height(&self) -> usize {
        let mut depth = 1;
        let mut current = self.root;
        loop {
            let node = self.arena.get(current);
            if node.is_leaf_directory() {
                return depth;
            }
            match node.children().first() {
                Some(&child) => {
                    current = child;
                    depth += 1;
                }
                None => return depth,
            }
        }
    }
}

#[cfg(feature = "serde")]
impl<D: Clone> Tree<D> {
    /// Flattens the tree into a serializable, parent-link-free form.
    pub fn to_persisted(&self) -> PersistedTree<D> {
        persist::to_persisted(&self.arena, self.root, self.max_entries, self.algorithm)
    }

    /// Rebuilds a tree from a previously-flattened form.
    pub fn from_persisted(persisted: &PersistedTree<D>) -> Self {
        let (arena, root, max_entries, algorithm) = persist::from_persisted(persisted);
        Tree {
            arena,
            root,
            max_entries,
            algorithm,
        }
    }
}

#[cfg(feature = "serde")]
impl<D: Clone + serde::Serialize> Tree<D> {
    /// Saves the tree to `path` via bincode.
    pub fn save(&self, path: &Path) -> Result<(), TreeError> {
        persist::save(&self.to_persisted(), path)
    }
}

#[cfg(feature = "serde")]
impl<D: Clone + for<'de> serde::Deserialize<'de>> Tree<D> {
    /// Loads a tree previously written with [`Tree::save`].
    pub fn load(path: &Path, max_entries: usize, algorithm: SplitAlgorithm) -> Result<Self, TreeError> {
        let persisted: PersistedTree<D> = persist::load(path)?;
        let mut tree = Tree::from_persisted(&persisted);
        tree.max_entries = max_entries;
        tree.algorithm = algorithm;
        Ok(tree)
    }
}
