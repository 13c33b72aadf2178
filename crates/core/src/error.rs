//! # Error Types
//!
//! Three layers of failure:
//!
//! - [`ConfigError`]: the parameters themselves are unusable. Fatal.
//! - [`ShapeError`]: an operation was applied to shapes it cannot combine.
//!   Inside the generator this only happens for dimension overflow, since
//!   every true companion is sampled to be compatible.
//! - [`GenerateError`]: what a single `generate` call can return. Some
//!   variants are recoverable by drawing a fresh sample, see
//!   [`GenerateError::is_recoverable`].

use thiserror::Error;

use crate::op::Operation;
use crate::shape::Shape;

/// Invalid generator or batch parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max_ops must be at least 1, got {0}")]
    MaxOpsTooSmall(usize),

    #[error("dim_max must be at least 3, got {0}")]
    DimMaxTooSmall(usize),

    #[error("dims_max must be at least 2, got {0}")]
    DimsMaxTooSmall(usize),

    #[error("max_elements must be positive")]
    ZeroMaxElements,

    /// No operations to choose from.
    #[error("operation catalog is empty")]
    EmptyCatalog,

    /// A caller-supplied initial shape needs rank >= 2 and positive sizes.
    #[error("invalid initial shape {shape}: {reason}")]
    InvalidInitialShape { shape: Shape, reason: &'static str },

    #[error("{name} must lie in [0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },

    #[error("cannot mark {requested} of {num} examples invalid")]
    TooManyInvalid { requested: usize, num: usize },

    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
}

/// Shape-incompatible application of an operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeError {
    /// The companion's shape does not satisfy the operation's rule.
    #[error("{op} cannot combine {lhs} with {rhs}")]
    Incompatible { op: Operation, lhs: Shape, rhs: Shape },

    #[error("{op} needs rank >= {needed}, got {shape}")]
    RankTooSmall {
        op: Operation,
        needed: usize,
        shape: Shape,
    },

    #[error("axis {axis} out of range for {shape}")]
    AxisOutOfRange { axis: usize, shape: Shape },

    /// The companion is the wrong kind for the operation (e.g. an axis for
    /// a matrix product).
    #[error("{op} was given the wrong kind of companion")]
    WrongCompanion { op: Operation },

    /// A dimension size does not fit in `usize`.
    #[error("{op} overflows a dimension of {lhs} x {rhs}")]
    DimensionOverflow { op: Operation, lhs: Shape, rhs: Shape },
}

/// Failure of a single `generate` call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The allowed operations leave nothing eligible at this position.
    #[error(
        "no eligible operation at step {position} (rank {rank}, must invalidate: {must_invalidate})"
    )]
    NoEligibleOperation {
        position: usize,
        rank: usize,
        must_invalidate: bool,
    },

    /// The running shape grew past the element limit.
    #[error("shape {shape} exceeds the element limit of {limit}")]
    ShapeTooLarge { shape: Shape, limit: usize },
}

impl GenerateError {
    /// Whether a fresh sample with the same parameters may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GenerateError::ShapeTooLarge { .. }
                | GenerateError::Shape(ShapeError::DimensionOverflow { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_errors_are_recoverable() {
        let too_large = GenerateError::ShapeTooLarge {
            shape: Shape::from([100, 100]),
            limit: 10,
        };
        assert!(too_large.is_recoverable());

        let overflow = GenerateError::from(ShapeError::DimensionOverflow {
            op: Operation::Kronecker,
            lhs: Shape::from([usize::MAX, 2]),
            rhs: Shape::from([2, 2]),
        });
        assert!(overflow.is_recoverable());
    }

    #[test]
    fn test_config_errors_are_fatal() {
        let err = GenerateError::from(ConfigError::MaxOpsTooSmall(0));
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "max_ops must be at least 1, got 0");

        let stuck = GenerateError::NoEligibleOperation {
            position: 0,
            rank: 2,
            must_invalidate: true,
        };
        assert!(!stuck.is_recoverable());
    }
}
