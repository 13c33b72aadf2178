//! Generator parameters.

use crate::error::ConfigError;
use crate::op::Operation;
use crate::shape::Shape;

/// Parameters for a single `generate` call.
///
/// ```rust
/// use matrixshapes_core::{GeneratorConfig, Operation};
///
/// let config = GeneratorConfig::default()
///     .with_max_ops(3)
///     .with_operations(vec![Operation::Transpose, Operation::Add]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Upper bound on chain length; the length is drawn from `1..=max_ops`.
    pub max_ops: usize,
    /// Exclusive upper bound on sampled dimension sizes.
    pub dim_max: usize,
    /// Maximum rank of a sampled initial shape.
    pub dims_max: usize,
    /// Largest element count the running shape may reach.
    pub max_elements: usize,
    /// Operations the chain may draw from.
    pub operations: Vec<Operation>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_ops: 5,
            dim_max: 5,
            dims_max: 4,
            max_elements: 1 << 26,
            operations: Operation::ALL.to_vec(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_max_ops(mut self, max_ops: usize) -> Self {
        self.max_ops = max_ops;
        self
    }

    pub fn with_dim_max(mut self, dim_max: usize) -> Self {
        self.dim_max = dim_max;
        self
    }

    pub fn with_dims_max(mut self, dims_max: usize) -> Self {
        self.dims_max = dims_max;
        self
    }

    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }

    /// Restrict the chain to a subset of the catalog.
    pub fn with_operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations = operations;
        self
    }

    /// Check the parameter combination.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ops < 1 {
            return Err(ConfigError::MaxOpsTooSmall(self.max_ops));
        }
        if self.dim_max < 3 {
            return Err(ConfigError::DimMaxTooSmall(self.dim_max));
        }
        if self.dims_max < 2 {
            return Err(ConfigError::DimsMaxTooSmall(self.dims_max));
        }
        if self.max_elements == 0 {
            return Err(ConfigError::ZeroMaxElements);
        }
        if self.operations.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(())
    }

    /// Check a caller-supplied initial shape.
    pub fn validate_initial_shape(&self, shape: &Shape) -> Result<(), ConfigError> {
        let reason = if shape.rank() < 2 {
            Some("rank must be at least 2")
        } else if shape.dims().contains(&0) {
            Some("dimension sizes must be positive")
        } else if shape.numel().map_or(true, |n| n > self.max_elements) {
            Some("element count exceeds max_elements")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(ConfigError::InvalidInitialShape {
                shape: shape.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}
