//! # The Generator Entry Point
//!
//! `generate` draws one example: the chain length, the optional invalid
//! step, the chain itself, and the label. The random draws happen in a
//! fixed order (initial shape, length, invalid position, then per step:
//! operation, companion, invalidation), so a seeded generator always
//! yields the same example.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chain::{self, Chain};
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::inject::InvalidityPlan;
use crate::sampler;
use crate::shape::Shape;

/// One generated word problem and its ground truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// The rendered description of the chain.
    pub input: String,
    /// The final shape, e.g. `(2,2)`, or `Invalid`.
    pub target: String,
    /// Whether `target` already appears as a rendered shape in `input`.
    pub is_confounded: bool,
}

impl From<&Chain> for Example {
    fn from(chain: &Chain) -> Self {
        Self {
            input: chain.text(),
            target: chain.label(),
            is_confounded: chain.is_confounded(),
        }
    }
}

/// Generate one example.
///
/// `initial` overrides the sampled starting shape. With `invalid` set,
/// exactly one step is made incompatible and the target is `Invalid`.
///
/// ```rust
/// use matrixshapes_core::{generate, GeneratorConfig, Operation, Shape};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let config = GeneratorConfig::default()
///     .with_max_ops(1)
///     .with_operations(vec![Operation::Transpose]);
/// let example = generate(&mut rng, Some(Shape::from([2, 3])), &config, false).unwrap();
/// assert_eq!(example.input, "Transpose a matrix of shape (2,3).");
/// assert_eq!(example.target, "(3,2)");
/// assert!(!example.is_confounded);
/// ```
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    initial: Option<Shape>,
    config: &GeneratorConfig,
    invalid: bool,
) -> Result<Example, GenerateError> {
    generate_chain(rng, initial, config, invalid).map(|chain| Example::from(&chain))
}

/// Like [`generate`], but returns the whole chain with its steps.
pub fn generate_chain<R: Rng + ?Sized>(
    rng: &mut R,
    initial: Option<Shape>,
    config: &GeneratorConfig,
    invalid: bool,
) -> Result<Chain, GenerateError> {
    config.validate()?;
    let initial = match initial {
        Some(shape) => {
            config.validate_initial_shape(&shape)?;
            shape
        }
        None => sampler::sample_initial_shape(rng, config.dims_max, config.dim_max),
    };
    let len = rng.gen_range(1..=config.max_ops);
    let plan = InvalidityPlan::choose(rng, invalid, len);
    chain::compose(rng, config, initial, len, plan)
}
