//! An in-memory R-tree spatial index over axis-aligned rectangles.
//!
//! [`Tree`](tree::Tree) is the public entry point: build one with
//! [`Tree::new`](tree::Tree::new), insert `(Rectangle, data)` pairs, and query by
//! window, point, or nearest neighbor. Three split heuristics are available on
//! overflow (see [`SplitAlgorithm`](split::SplitAlgorithm)): quadratic, linear,
//! and an R*-style minimal-overlap split.

pub mod bulk;
pub mod delete;
pub mod error;
pub mod geometry;
pub mod insert;
mod logging;
pub mod node;
#[cfg(feature = "serde")]
pub mod persist;
pub mod query;
pub mod split;
pub mod tree;

pub use error::TreeError;
pub use geometry::Rectangle;
#[cfg(feature = "serde")]
pub use persist::PersistedTree;
pub use split::SplitAlgorithm;
pub use tree::{Stats, Tree};
