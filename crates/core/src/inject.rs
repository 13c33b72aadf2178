//! # Invalidity Injection
//!
//! An invalid example has exactly one step whose companion does not fit the
//! running shape. The step is chosen once the chain length is known; its
//! companion is first sampled as compatible and then broken on the
//! second-to-last axis. That axis is the one every invalidatable operation
//! checks: the contraction axis of a matrix product and one of the axes an
//! element-wise operation compares.

use rand::Rng;

use crate::error::ShapeError;
use crate::op::{Companion, Operation};
use crate::shape::Shape;

/// Which step, if any, must be incompatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvalidityPlan {
    position: Option<usize>,
}

impl InvalidityPlan {
    /// A plan with no invalid step.
    pub fn none() -> Self {
        Self::default()
    }

    /// Invalidate the step at `position`.
    pub fn at(position: usize) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Pick the invalid step uniformly among `0..len` when `invalid` is set.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R, invalid: bool, len: usize) -> Self {
        if invalid && len > 0 {
            Self::at(rng.gen_range(0..len))
        } else {
            Self::none()
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Whether the step at `position` must be incompatible.
    pub fn is_invalid_at(&self, position: usize) -> bool {
        self.position == Some(position)
    }
}

/// Replace the second-to-last size with a different one from `1..=dim_max`.
pub fn invalidate_shape<R: Rng + ?Sized>(
    rng: &mut R,
    shape: &Shape,
    dim_max: usize,
) -> Option<Shape> {
    let axis = shape.rank().checked_sub(2)?;
    let original = shape.dims()[axis];
    let dim_max = dim_max.max(2);
    let replacement = if (1..=dim_max).contains(&original) {
        // Uniform over 1..=dim_max minus the original value.
        let v = rng.gen_range(1..dim_max);
        if v >= original {
            v + 1
        } else {
            v
        }
    } else {
        rng.gen_range(1..=dim_max)
    };
    let mut dims = shape.clone().into_dims();
    dims[axis] = replacement;
    Some(Shape::new(dims))
}

/// Break a compatible companion for `op`.
pub fn invalidate_companion<R: Rng + ?Sized>(
    rng: &mut R,
    op: Operation,
    companion: &Companion,
    dim_max: usize,
) -> Result<Companion, ShapeError> {
    match companion {
        Companion::Array(shape) if op.is_invalidatable() => invalidate_shape(rng, shape, dim_max)
            .map(Companion::Array)
            .ok_or_else(|| ShapeError::RankTooSmall {
                op,
                needed: 2,
                shape: shape.clone(),
            }),
        _ => Err(ShapeError::WrongCompanion { op }),
    }
}
