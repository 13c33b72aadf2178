//! Confounder detection.
//!
//! An example is confounded when its answer already appears in the text as
//! one of the shapes shown to the reader, so a string match would find it
//! without tracking the chain.

use crate::shape::Shape;

/// Whether `result` equals any shape rendered earlier in the chain.
///
/// Comparison is exact sequence equality: `(2,2)` does not match `(2,2,3)`.
pub fn is_confounded(result: &Shape, seen: &[Shape]) -> bool {
    seen.iter().any(|shape| shape == result)
}
