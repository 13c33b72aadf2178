//! # Chain Composition
//!
//! A chain is built one step at a time, threading the running shape:
//!
//! ```text
//!   initial ──op₀──▶ s₁ ──op₁──▶ s₂ ── ... ──op_{n-1}──▶ result
//! ```
//!
//! At each position the eligible operations are enumerated first and one
//! is drawn uniformly from that set:
//!
//! - axis reductions need a running shape of rank >= 3
//! - the invalid position only admits invalidatable operations
//!
//! An empty eligible set is reported as an error rather than retried.
//!
//! [`Chain::then`] consumes the chain and returns the extended one, so the
//! composer is a `try_fold` over positions.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::config::GeneratorConfig;
use crate::confounder;
use crate::error::GenerateError;
use crate::inject::{invalidate_companion, InvalidityPlan};
use crate::op::{Companion, Operation};
use crate::sampler;
use crate::shape::Shape;

/// Label of an example whose chain contains an incompatible step.
pub const INVALID_LABEL: &str = "Invalid";

/// One applied operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStep {
    pub op: Operation,
    /// Running shape before this step.
    pub input: Shape,
    /// The compatible companion used for shape bookkeeping.
    pub companion: Companion,
    /// The companion shown in the text; differs from `companion` only on
    /// the invalid step.
    pub rendered: Companion,
    /// Sentence for this step.
    pub text: String,
    pub invalid: bool,
}

/// A chain under construction, or finished.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    initial: Shape,
    current: Shape,
    steps: Vec<ChainStep>,
    /// Every shape rendered into the text, initial shape first.
    seen: Vec<Shape>,
}

impl Chain {
    /// An empty chain starting at `initial`.
    pub fn begin(initial: Shape) -> Self {
        Self {
            current: initial.clone(),
            seen: vec![initial.clone()],
            initial,
            steps: Vec::new(),
        }
    }

    /// Extend the chain by one step whose result is `next`.
    pub fn then(mut self, step: ChainStep, next: Shape) -> Self {
        if let Some(shape) = step.rendered.shape() {
            self.seen.push(shape.clone());
        }
        self.steps.push(step);
        self.current = next;
        self
    }

    pub fn initial(&self) -> &Shape {
        &self.initial
    }

    /// The running shape after the last step.
    pub fn current(&self) -> &Shape {
        &self.current
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    pub fn seen(&self) -> &[Shape] {
        &self.seen
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Position of the incompatible step, if any.
    pub fn invalid_position(&self) -> Option<usize> {
        self.steps.iter().position(|s| s.invalid)
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid_position().is_some()
    }

    /// The full description, sentences joined by single spaces.
    pub fn text(&self) -> String {
        self.steps
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The ground truth: the final shape, or `"Invalid"`.
    pub fn label(&self) -> String {
        if self.is_invalid() {
            INVALID_LABEL.to_string()
        } else {
            self.current.to_string()
        }
    }

    /// Whether the answer already appears among the rendered shapes.
    /// Invalid chains are never confounded.
    pub fn is_confounded(&self) -> bool {
        !self.is_invalid() && confounder::is_confounded(&self.current, &self.seen)
    }
}

/// Operations from `allowed` that may be placed at a step.
pub fn eligible_operations(
    allowed: &[Operation],
    rank: usize,
    must_invalidate: bool,
) -> Vec<Operation> {
    allowed
        .iter()
        .copied()
        .filter(|op| op.accepts_rank(rank))
        .filter(|op| !must_invalidate || op.is_invalidatable())
        .collect()
}

/// Build a chain of `len` steps from `initial`.
pub fn compose<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GeneratorConfig,
    initial: Shape,
    len: usize,
    plan: InvalidityPlan,
) -> Result<Chain, GenerateError> {
    let chain = (0..len).try_fold(Chain::begin(initial), |chain, position| {
        step(&mut *rng, config, chain, position, plan)
    })?;
    debug!(
        len = chain.len(),
        invalid_position = ?chain.invalid_position(),
        confounded = chain.is_confounded(),
        "composed chain"
    );
    Ok(chain)
}

fn step<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GeneratorConfig,
    chain: Chain,
    position: usize,
    plan: InvalidityPlan,
) -> Result<Chain, GenerateError> {
    let current = chain.current().clone();
    let must_invalidate = plan.is_invalid_at(position);

    let eligible = eligible_operations(&config.operations, current.rank(), must_invalidate);
    let op = *eligible
        .choose(rng)
        .ok_or(GenerateError::NoEligibleOperation {
            position,
            rank: current.rank(),
            must_invalidate,
        })?;

    let companion = sampler::sample_companion(rng, op, &current, config.dim_max)?;
    let rendered = if must_invalidate {
        invalidate_companion(rng, op, &companion, config.dim_max)?
    } else {
        companion.clone()
    };
    let text = op.render(position == 0, &current, &rendered)?;
    let next = op.apply(&current, &companion)?;

    match next.numel() {
        Some(n) if n <= config.max_elements => {}
        _ => {
            return Err(GenerateError::ShapeTooLarge {
                shape: next,
                limit: config.max_elements,
            })
        }
    }

    trace!(position, %op, %current, %next, invalid = must_invalidate, "{}", text);

    let step = ChainStep {
        op,
        input: current,
        companion,
        rendered,
        text,
        invalid: must_invalidate,
    };
    Ok(chain.then(step, next))
}
