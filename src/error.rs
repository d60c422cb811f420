//! ## Errors for Boxtree
//!
//! This module defines the error type used internally and returned at the public
//! boundary of the crate.

use std::error::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents errors specific to invalid operations or parameters in Boxtree.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
pub enum TreeError {
    /// Occurs when an invalid node capacity is provided at construction.
    InvalidCapacity {
        /// The capacity value that was provided.
        capacity: usize,
    },
    /// Occurs when a rectangle is constructed with a min corner past its max corner.
    InvalidRectangle {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
    /// Occurs when a persisted tree cannot be decoded from its serial form.
    Deserialize(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::InvalidCapacity { capacity } => {
                write!(
                    f,
                    "invalid capacity: {capacity}. max_entries must be at least 2"
                )
            }
            TreeError::InvalidRectangle {
                min_x,
                min_y,
                max_x,
                max_y,
            } => {
                write!(
                    f,
                    "invalid rectangle: min ({min_x}, {min_y}) is past max ({max_x}, {max_y})"
                )
            }
            TreeError::Deserialize(msg) => {
                write!(f, "failed to deserialize tree: {msg}")
            }
        }
    }
}

impl Error for TreeError {}
