//! # Core - Shape-Tracking Word Problems
//!
//! This crate generates natural-language descriptions of chains of tensor
//! operations, labelled with the shape of the result:
//!
//! - **Shapes**: dimension lists, rendered as `(2,3,4)`
//! - **Operations**: a closed catalog of seven operations with their shape
//!   arithmetic and sentence templates
//! - **Sampling**: initial shapes and compatible companions
//! - **Chains**: step-by-step composition threading the running shape
//! - **Invalidity**: one deliberately incompatible step, labelled `Invalid`
//! - **Confounders**: answers that leak into the text as an earlier shape
//!
//! ## Example
//!
//! ```rust
//! use matrixshapes_core::{generate, GeneratorConfig};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let config = GeneratorConfig::default().with_max_ops(2);
//! let example = generate(&mut rng, None, &config, false).unwrap();
//! assert!(example.target.starts_with('('));
//! ```
//!
//! All randomness flows through the `rng` argument; nothing here touches a
//! global generator.

pub mod chain;
pub mod config;
pub mod confounder;
pub mod error;
pub mod generate;
pub mod inject;
pub mod op;
pub mod sampler;
pub mod shape;

// Re-export key types at crate root for convenience
pub use chain::{Chain, ChainStep, INVALID_LABEL};
pub use config::GeneratorConfig;
pub use error::{ConfigError, GenerateError, ShapeError};
pub use generate::{generate, generate_chain, Example};
pub use inject::InvalidityPlan;
pub use op::{Arity, Companion, CompanionRule, Operation};
pub use shape::Shape;
