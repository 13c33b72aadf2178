//! # Batch Assembly Tests
//!
//! Batch-level guarantees:
//! - exactly `num` examples
//! - confounded examples capped at `floor(num * cont)`
//! - `round(num * frac_invalid)` invalid examples
//! - output order is a shuffled permutation of the generation order

use matrixshapes_core::GeneratorConfig;
use matrixshapes_task::{assemble_seeded, BatchConfig, TaskError, TaskFile};
use proptest::prelude::*;

fn small(num: usize, cont: f64, frac_invalid: f64, seed: u64) -> BatchConfig {
    BatchConfig::default()
        .with_num(num)
        .with_cont(cont)
        .with_frac_invalid(frac_invalid)
        .with_generator(GeneratorConfig::default().with_max_ops(3))
        .with_seed(seed)
}

// ============================================================================
// Counts
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_batch_counts(
        num in 0usize..60,
        cont in 0.0f64..=1.0,
        frac_invalid in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let config = small(num, cont, frac_invalid, seed);
        let batch = match assemble_seeded(&config) {
            Ok(batch) => batch,
            // A tight confounder cap can outlast the attempt budget.
            Err(TaskError::AttemptsExhausted { .. }) => return Ok(()),
            Err(err) => return Err(TestCaseError::fail(err.to_string())),
        };

        prop_assert_eq!(batch.records.len(), num);

        let confounded = batch.records.iter().filter(|r| r.example.is_confounded).count();
        prop_assert!(confounded <= config.max_confounded());
        prop_assert_eq!(confounded, batch.stats.confounded);

        let invalid = batch.records.iter().filter(|r| r.invalid).count();
        prop_assert_eq!(invalid, config.num_invalid());
        for record in &batch.records {
            prop_assert_eq!(record.invalid, record.example.target == "Invalid");
        }

        let mut slots: Vec<_> = batch.records.iter().map(|r| r.slot).collect();
        slots.sort_unstable();
        prop_assert_eq!(slots, (0..num).collect::<Vec<_>>());
    }
}

// ============================================================================
// Ordering and Reproducibility
// ============================================================================

#[test]
fn test_output_is_shuffled() {
    let batch = assemble_seeded(&small(200, 0.5, 0.3, 17)).unwrap();
    let slots: Vec<_> = batch.records.iter().map(|r| r.slot).collect();
    assert_ne!(slots, (0..200).collect::<Vec<_>>());
}

#[test]
fn test_same_seed_same_task() {
    let a = assemble_seeded(&small(50, 0.2, 0.1, 99)).unwrap();
    let b = assemble_seeded(&small(50, 0.2, 0.1, 99)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_rounding_of_invalid_count() {
    // 5 * 0.5 = 2.5 rounds away from zero.
    let batch = assemble_seeded(&small(5, 1.0, 0.5, 4)).unwrap();
    assert_eq!(batch.stats.invalid, 3);
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[test]
fn test_out_of_range_fraction_is_config_error() {
    let err = assemble_seeded(&small(10, 0.5, 1.2, 0)).unwrap_err();
    assert!(matches!(err, TaskError::Config(_)));
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_write_task_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("task.json");

    let task = assemble_seeded(&small(25, 0.5, 0.2, 8))
        .unwrap()
        .into_task_file();
    task.write(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"examples\": ["));

    let read = TaskFile::read(&path).unwrap();
    assert_eq!(read, task);
    assert_eq!(read.len(), 25);
}

#[test]
fn test_write_to_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("task.json");
    let err = TaskFile::default().write(&path).unwrap_err();
    assert!(matches!(err, TaskError::Io { .. }));
}
