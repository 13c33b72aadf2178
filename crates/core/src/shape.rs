//! # Shapes - The Objects Being Tracked
//!
//! A shape is the ordered list of dimension sizes of an array. Every step of
//! a generated chain maps one shape to the next, and the final shape is the
//! label the model has to predict.
//!
//! ## Design Choices
//!
//! Shapes carry no element data. Operations are evaluated on dimensions only,
//! so a kronecker product of two large shapes costs a few multiplications
//! rather than an allocation. Sizes are checked with `checked_mul` so that
//! combinatorial growth surfaces as an error instead of wrapping.
//!
//! Shapes are compared by exact sequence equality: `(2,3)` and `(1,2,3)` are
//! different shapes even though they broadcast together.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The dimension sizes of an array, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Create a shape from its dimension sizes.
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Create a matrix shape (2-dimensional).
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self {
            dims: vec![rows, cols],
        }
    }

    /// Dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements, or `None` if it does not fit in `usize`.
    pub fn numel(&self) -> Option<usize> {
        self.dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Size of the last axis.
    pub fn last(&self) -> Option<usize> {
        self.dims.last().copied()
    }

    /// Size of the second-to-last axis.
    pub fn second_last(&self) -> Option<usize> {
        self.dims.len().checked_sub(2).map(|i| self.dims[i])
    }

    /// The same dimensions in reverse order (full transpose).
    pub fn reversed(&self) -> Self {
        Self {
            dims: self.dims.iter().rev().copied().collect(),
        }
    }

    /// Consume the shape and return its dimensions.
    pub fn into_dims(self) -> Vec<usize> {
        self.dims
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims.to_vec())
    }
}

/// Renders as a tuple without spaces: `(2,3,4)`, with the trailing comma
/// of a one-element tuple kept: `(5,)`.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .dims
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",");
        if self.dims.len() == 1 {
            write!(f, "({},)", joined)
        } else {
            write!(f, "({})", joined)
        }
    }
}
