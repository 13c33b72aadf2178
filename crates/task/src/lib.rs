//! # Task - Assembling Example Sets
//!
//! Turns the single-example generator of `matrixshapes_core` into a task
//! file: a fixed number of examples with a cap on confounded examples, a
//! chosen fraction of invalid ones, and a shuffled order.
//!
//! ## Example
//!
//! ```rust
//! use matrixshapes_task::{assemble_seeded, BatchConfig};
//!
//! let config = BatchConfig::default()
//!     .with_num(20)
//!     .with_frac_invalid(0.25)
//!     .with_seed(42);
//! let task = assemble_seeded(&config).unwrap().into_task_file();
//! assert_eq!(task.len(), 20);
//! assert_eq!(task.examples.iter().filter(|e| e.target == "Invalid").count(), 5);
//! ```

pub mod assemble;
pub mod config;
mod error;
pub mod file;

pub use assemble::{assemble, assemble_seeded, Batch, BatchStats, Record};
pub use config::BatchConfig;
pub use error::TaskError;
pub use file::{TaskExample, TaskFile};
