//! # Batch Assembly
//!
//! Fills `num` slots in order by calling the generator repeatedly:
//!
//! - slot `k` is generated invalid iff `k` is among `round(num * frac_invalid)`
//!   indices drawn without replacement up front
//! - a confounded example is rejected once `floor(num * cont)` confounded
//!   examples were accepted, and the slot is retried
//! - recoverable generator failures (element limit) are skipped and retried
//!
//! Skipping biases late slots toward examples that are easier to accept, so
//! the finished records are shuffled before they are returned.

use matrixshapes_core::{generate, Example};
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::config::BatchConfig;
use crate::file::{TaskExample, TaskFile};
use crate::TaskError;

/// An accepted example with its bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub example: Example,
    /// Slot this example filled, before shuffling.
    pub slot: usize,
    pub invalid: bool,
}

/// Counters collected while assembling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Calls to the generator.
    pub attempts: usize,
    pub confounded: usize,
    pub invalid: usize,
    /// Confounded examples turned away by the cap.
    pub rejected_confounders: usize,
    /// Recoverable generator failures.
    pub failed: usize,
}

/// The assembled batch, in shuffled order.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub records: Vec<Record>,
    pub stats: BatchStats,
}

impl Batch {
    pub fn into_task_file(self) -> TaskFile {
        TaskFile {
            examples: self
                .records
                .into_iter()
                .map(|r| TaskExample::from(r.example))
                .collect(),
        }
    }
}

/// Assemble with a generator seeded from `config.seed`, or from entropy.
pub fn assemble_seeded(config: &BatchConfig) -> Result<Batch, TaskError> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    assemble(&mut rng, config)
}

/// Assemble a batch drawing all randomness from `rng`.
pub fn assemble<R: Rng + ?Sized>(
    rng: &mut R,
    config: &BatchConfig,
) -> Result<Batch, TaskError> {
    config.validate()?;

    let num = config.num;
    let max_confounded = config.max_confounded();
    let budget = config.attempt_budget();

    let mut invalid_slots = vec![false; num];
    for slot in index::sample(rng, num, config.num_invalid()) {
        invalid_slots[slot] = true;
    }

    let mut records = Vec::with_capacity(num);
    let mut stats = BatchStats::default();

    while records.len() < num {
        if stats.attempts >= budget {
            return Err(TaskError::AttemptsExhausted {
                attempts: stats.attempts,
                accepted: records.len(),
                requested: num,
            });
        }
        stats.attempts += 1;

        let slot = records.len();
        let invalid = invalid_slots[slot];
        let example = match generate(rng, None, &config.generator, invalid) {
            Ok(example) => example,
            Err(err) if err.is_recoverable() => {
                warn!(slot, error = %err, "skipping example");
                stats.failed += 1;
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        if example.is_confounded {
            if stats.confounded >= max_confounded {
                stats.rejected_confounders += 1;
                continue;
            }
            stats.confounded += 1;
        }
        if invalid {
            stats.invalid += 1;
        }
        debug!(
            slot,
            invalid,
            confounded = example.is_confounded,
            target = %example.target,
            "accepted"
        );
        records.push(Record {
            example,
            slot,
            invalid,
        });
    }

    records.shuffle(rng);

    info!(
        examples = records.len(),
        attempts = stats.attempts,
        confounded = stats.confounded,
        invalid = stats.invalid,
        rejected_confounders = stats.rejected_confounders,
        failed = stats.failed,
        "assembled batch"
    );
    Ok(Batch { records, stats })
}
