//! # Shape Sampling
//!
//! Draws the initial shape of a chain and, for each step, a companion that
//! is compatible with the running shape under the step's operation. The
//! random source is always passed in, so a seeded generator reproduces the
//! same chain.

use rand::Rng;

use crate::error::ShapeError;
use crate::op::{Companion, CompanionRule, Operation};
use crate::shape::Shape;

/// Draw a shape with rank in `2..=dims_max` and sizes in `2..dim_max`.
pub fn sample_initial_shape<R: Rng + ?Sized>(
    rng: &mut R,
    dims_max: usize,
    dim_max: usize,
) -> Shape {
    let rank = rng.gen_range(2..=dims_max.max(2));
    let upper = dim_max.max(3);
    let dims = (0..rank).map(|_| rng.gen_range(2..upper)).collect();
    Shape::new(dims)
}

/// Draw a companion for `op` that is compatible with `current`.
pub fn sample_companion<R: Rng + ?Sized>(
    rng: &mut R,
    op: Operation,
    current: &Shape,
    dim_max: usize,
) -> Result<Companion, ShapeError> {
    let upper = dim_max.max(3);
    match op.companion_rule() {
        CompanionRule::None => Ok(Companion::None),
        CompanionRule::Same => Ok(Companion::Array(current.clone())),
        CompanionRule::Contract => {
            let mut dims = current.dims().to_vec();
            match dims.as_mut_slice() {
                [.., inner, outer] => {
                    *inner = *outer;
                    *outer = rng.gen_range(1..upper);
                }
                _ => {
                    return Err(ShapeError::RankTooSmall {
                        op,
                        needed: 2,
                        shape: current.clone(),
                    })
                }
            }
            Ok(Companion::Array(Shape::new(dims)))
        }
        CompanionRule::Independent => {
            let dims = (0..current.rank())
                .map(|_| rng.gen_range(2..upper))
                .collect();
            Ok(Companion::Array(Shape::new(dims)))
        }
        CompanionRule::Axis => {
            if current.rank() == 0 {
                return Err(ShapeError::RankTooSmall {
                    op,
                    needed: 1,
                    shape: current.clone(),
                });
            }
            Ok(Companion::Axis(rng.gen_range(0..current.rank())))
        }
    }
}
