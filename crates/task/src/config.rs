//! Batch parameters.

use matrixshapes_core::{ConfigError, GeneratorConfig};

/// Parameters for assembling a task.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Number of examples in the task.
    pub num: usize,
    /// Largest fraction of examples allowed to be confounded.
    pub cont: f64,
    /// Fraction of examples generated with an invalid step.
    pub frac_invalid: f64,
    /// Parameters passed to every `generate` call.
    pub generator: GeneratorConfig,
    /// Seed for the batch generator; entropy when absent.
    pub seed: Option<u64>,
    /// Upper bound on `generate` calls; defaults to `100 * num + 1000`.
    pub max_attempts: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num: 1000,
            cont: 0.5,
            frac_invalid: 0.0,
            generator: GeneratorConfig::default(),
            seed: None,
            max_attempts: None,
        }
    }
}

impl BatchConfig {
    pub fn with_num(mut self, num: usize) -> Self {
        self.num = num;
        self
    }

    pub fn with_cont(mut self, cont: f64) -> Self {
        self.cont = cont;
        self
    }

    pub fn with_frac_invalid(mut self, frac_invalid: f64) -> Self {
        self.frac_invalid = frac_invalid;
        self
    }

    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Most confounded examples the task may hold: `floor(num * cont)`.
    pub fn max_confounded(&self) -> usize {
        (self.num as f64 * self.cont).floor() as usize
    }

    /// Number of invalid examples: `round(num * frac_invalid)`, half away
    /// from zero.
    pub fn num_invalid(&self) -> usize {
        (self.num as f64 * self.frac_invalid).round() as usize
    }

    pub fn attempt_budget(&self) -> usize {
        self.max_attempts
            .unwrap_or_else(|| self.num.saturating_mul(100).saturating_add(1000))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        for (name, value) in [("cont", self.cont), ("frac_invalid", self.frac_invalid)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FractionOutOfRange { name, value });
            }
        }
        let requested = self.num_invalid();
        if requested > self.num {
            return Err(ConfigError::TooManyInvalid {
                requested,
                num: self.num,
            });
        }
        Ok(())
    }
}
