//! # The Operation Catalog
//!
//! The fixed set of operations a chain is built from. Each operation knows:
//!
//! - its arity (unary, binary with a companion array, or axis reduction)
//! - how a compatible companion is derived from the running shape
//! - its shape arithmetic
//! - its two sentence templates, one for opening a chain and one for
//!   continuing it
//! - whether it may host the deliberately invalid step
//!
//! ## Operations
//!
//! | Op | Companion | Result shape | Invalidatable |
//! |----|-----------|--------------|---------------|
//! | `transpose` | none | dims reversed | no |
//! | `multiply` | `a[..-2] ++ [a[-1], k]` | `a[..-1] ++ [k]` | yes |
//! | `hadamard` | `a` | `a` | yes |
//! | `add` | `a` | `a` | yes |
//! | `subtract` | `a` | `a` | yes |
//! | `kronecker` | same rank, fresh dims | pairwise product | no |
//! | `sum_axis` | axis index | `a` without that axis | no |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ShapeError};
use crate::shape::Shape;

/// How many operands an operation takes besides the running array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Unary,
    /// Combines with a second array.
    Binary,
    /// Takes an axis index.
    AxisReduction,
}

/// How a compatible companion is drawn from the running shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanionRule {
    None,
    /// Leading axis matches the running shape's last axis, fresh last axis.
    Contract,
    /// Exactly the running shape.
    Same,
    /// Same rank, every size drawn independently.
    Independent,
    /// A uniformly drawn axis index.
    Axis,
}

/// The second operand of a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Companion {
    None,
    Array(Shape),
    Axis(usize),
}

impl Companion {
    /// The companion's shape, if it is an array.
    pub fn shape(&self) -> Option<&Shape> {
        match self {
            Companion::Array(shape) => Some(shape),
            _ => None,
        }
    }
}

/// One entry of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Reverse all axes.
    Transpose,
    /// Batched matrix product: A @ B
    Multiply,
    /// Element-wise product: a * b
    Hadamard,
    /// Element-wise addition: a + b
    Add,
    /// Element-wise subtraction: a - b
    Subtract,
    /// Kronecker (outer) product.
    Kronecker,
    /// Sum over one axis.
    SumAxis,
}

impl Operation {
    /// Every operation, in catalog order.
    pub const ALL: [Operation; 7] = [
        Operation::Transpose,
        Operation::Multiply,
        Operation::Hadamard,
        Operation::Add,
        Operation::Subtract,
        Operation::Kronecker,
        Operation::SumAxis,
    ];

    /// Minimum rank of the running shape for an axis reduction to apply.
    pub const MIN_REDUCTION_RANK: usize = 3;

    /// The operation's name as used on the command line and in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Transpose => "transpose",
            Operation::Multiply => "multiply",
            Operation::Hadamard => "hadamard",
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Kronecker => "kronecker",
            Operation::SumAxis => "sum_axis",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operation::Transpose => Arity::Unary,
            Operation::SumAxis => Arity::AxisReduction,
            _ => Arity::Binary,
        }
    }

    pub fn companion_rule(&self) -> CompanionRule {
        match self {
            Operation::Transpose => CompanionRule::None,
            Operation::Multiply => CompanionRule::Contract,
            Operation::Hadamard | Operation::Add | Operation::Subtract => CompanionRule::Same,
            Operation::Kronecker => CompanionRule::Independent,
            Operation::SumAxis => CompanionRule::Axis,
        }
    }

    /// Whether this operation may host the invalid step.
    ///
    /// These are exactly the operations whose compatibility depends on the
    /// companion's second-to-last axis.
    pub fn is_invalidatable(&self) -> bool {
        matches!(
            self,
            Operation::Multiply | Operation::Hadamard | Operation::Add | Operation::Subtract
        )
    }

    /// Whether the operation can be applied to a running shape of this rank.
    pub fn accepts_rank(&self, rank: usize) -> bool {
        match self.arity() {
            Arity::AxisReduction => rank >= Self::MIN_REDUCTION_RANK,
            _ => rank >= 2,
        }
    }

    /// Template for the opening sentence of a chain.
    pub fn first_template(&self) -> &'static str {
        match self {
            Operation::Transpose => "Transpose a matrix of shape {}.",
            Operation::Multiply => "Multiply a matrix of shape {} with a matrix of shape {}.",
            Operation::Hadamard => {
                "Compute the hadamard product of a matrix of shape {} with a matrix of shape {}."
            }
            Operation::Add => "Add a matrix of shape {} to a matrix of shape {}.",
            Operation::Subtract => "Subtract a matrix of shape {} from a matrix of shape {}.",
            Operation::Kronecker => {
                "Compute the kronecker product of a matrix of shape {} with a matrix of shape {}."
            }
            Operation::SumAxis => "Take a matrix of shape {} and sum over the {} axis.",
        }
    }

    /// Template for every sentence after the first.
    pub fn mid_template(&self) -> &'static str {
        match self {
            Operation::Transpose => "Transpose the result.",
            Operation::Multiply => "Multiply the result with a matrix of shape {}.",
            Operation::Hadamard => {
                "Compute the hadamard product of the result with a matrix of shape {}."
            }
            Operation::Add => "Add the result to a matrix of shape {}.",
            Operation::Subtract => "Subtract the result from a matrix of shape {}.",
            Operation::Kronecker => {
                "Compute the kronecker product of the result with a matrix of shape {}."
            }
            Operation::SumAxis => "Sum the result over the {} axis.",
        }
    }

    /// Render one step.
    ///
    /// The opening step names the running shape; later steps refer to it as
    /// "the result". `companion` is what the reader sees, which for the
    /// invalid step is the broken shape.
    pub fn render(
        &self,
        first: bool,
        current: &Shape,
        companion: &Companion,
    ) -> Result<String, ShapeError> {
        let mut args = Vec::with_capacity(2);
        if first {
            args.push(current.to_string());
        }
        match (self.arity(), companion) {
            (Arity::Unary, Companion::None) => {}
            (Arity::Binary, Companion::Array(shape)) => args.push(shape.to_string()),
            (Arity::AxisReduction, Companion::Axis(axis)) => args.push(axis_ordinal(*axis)),
            _ => return Err(ShapeError::WrongCompanion { op: *self }),
        }
        let template = if first {
            self.first_template()
        } else {
            self.mid_template()
        };
        Ok(fill_template(template, &args))
    }

    /// Shape arithmetic: the result of applying this operation to `lhs`.
    pub fn apply(&self, lhs: &Shape, companion: &Companion) -> Result<Shape, ShapeError> {
        match (self, companion) {
            (Operation::Transpose, Companion::None) => Ok(lhs.reversed()),
            (Operation::Multiply, Companion::Array(rhs)) => self.matmul(lhs, rhs),
            (
                Operation::Hadamard | Operation::Add | Operation::Subtract,
                Companion::Array(rhs),
            ) => {
                if lhs == rhs {
                    Ok(lhs.clone())
                } else {
                    Err(self.incompatible(lhs, rhs))
                }
            }
            (Operation::Kronecker, Companion::Array(rhs)) => self.kron(lhs, rhs),
            (Operation::SumAxis, Companion::Axis(axis)) => {
                if *axis >= lhs.rank() {
                    return Err(ShapeError::AxisOutOfRange {
                        axis: *axis,
                        shape: lhs.clone(),
                    });
                }
                let mut dims = lhs.dims().to_vec();
                dims.remove(*axis);
                Ok(Shape::new(dims))
            }
            _ => Err(ShapeError::WrongCompanion { op: *self }),
        }
    }

    fn matmul(&self, lhs: &Shape, rhs: &Shape) -> Result<Shape, ShapeError> {
        for shape in [lhs, rhs] {
            if shape.rank() < 2 {
                return Err(ShapeError::RankTooSmall {
                    op: *self,
                    needed: 2,
                    shape: shape.clone(),
                });
            }
        }
        let (a_batch, a_mat) = lhs.dims().split_at(lhs.rank() - 2);
        let (b_batch, b_mat) = rhs.dims().split_at(rhs.rank() - 2);
        if a_batch != b_batch || a_mat[1] != b_mat[0] {
            return Err(self.incompatible(lhs, rhs));
        }
        let mut dims = a_batch.to_vec();
        dims.extend([a_mat[0], b_mat[1]]);
        Ok(Shape::new(dims))
    }

    /// Pairwise product of sizes, the shorter shape padded with leading ones.
    fn kron(&self, lhs: &Shape, rhs: &Shape) -> Result<Shape, ShapeError> {
        let rank = lhs.rank().max(rhs.rank());
        let padded = |s: &Shape| {
            std::iter::repeat(1)
                .take(rank - s.rank())
                .chain(s.dims().iter().copied())
                .collect::<Vec<_>>()
        };
        let dims = padded(lhs)
            .into_iter()
            .zip(padded(rhs))
            .map(|(a, b)| a.checked_mul(b))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ShapeError::DimensionOverflow {
                op: *self,
                lhs: lhs.clone(),
                rhs: rhs.clone(),
            })?;
        Ok(Shape::new(dims))
    }

    fn incompatible(&self, lhs: &Shape, rhs: &Shape) -> ShapeError {
        ShapeError::Incompatible {
            op: *self,
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Operation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s.trim())
            .ok_or_else(|| ConfigError::UnknownOperation(s.to_string()))
    }
}

/// English ordinal for a zero-based axis index: 0 -> "first".
pub fn axis_ordinal(axis: usize) -> String {
    const WORDS: [&str; 11] = [
        "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
        "tenth", "eleventh",
    ];
    if let Some(word) = WORDS.get(axis) {
        return (*word).to_string();
    }
    let n = axis + 1;
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Substitute `{}` slots left to right.
fn fill_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut pieces = template.split("{}").peekable();
    while let Some(piece) = pieces.next() {
        out.push_str(piece);
        if pieces.peek().is_some() {
            if let Some(arg) = args.next() {
                out.push_str(arg);
            }
        }
    }
    out
}
