//! Property tests for generated chains.
//!
//! Every property is checked over random seeds and parameter bounds.
//! Chains that hit the element limit are skipped, which is the recoverable
//! outcome the batch assembler retries.

use matrixshapes_core::{
    generate, generate_chain, Chain, GenerateError, GeneratorConfig, Operation, INVALID_LABEL,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config_strategy() -> impl Strategy<Value = GeneratorConfig> {
    (1usize..=6, 3usize..=7, 2usize..=5).prop_map(|(max_ops, dim_max, dims_max)| {
        GeneratorConfig::default()
            .with_max_ops(max_ops)
            .with_dim_max(dim_max)
            .with_dims_max(dims_max)
    })
}

fn chain_for(
    seed: u64,
    config: &GeneratorConfig,
    invalid: bool,
) -> Result<Chain, GenerateError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_chain(&mut rng, None, config, invalid)
}

proptest! {
    #[test]
    fn prop_label_replays_step_arithmetic(seed in any::<u64>(), config in config_strategy()) {
        let chain = match chain_for(seed, &config, false) {
            Ok(chain) => chain,
            Err(err) => {
                prop_assert!(err.is_recoverable(), "{}", err);
                return Ok(());
            }
        };
        let mut shape = chain.initial().clone();
        for step in chain.steps() {
            prop_assert_eq!(&step.input, &shape);
            prop_assert_eq!(&step.companion, &step.rendered);
            shape = step.op.apply(&shape, &step.companion).unwrap();
        }
        prop_assert_eq!(chain.label(), shape.to_string());
        prop_assert!((1..=config.max_ops).contains(&chain.len()));
    }

    #[test]
    fn prop_invalid_examples_are_labelled_invalid(seed in any::<u64>(), config in config_strategy()) {
        let mut rng = StdRng::seed_from_u64(seed);
        match generate(&mut rng, None, &config, true) {
            Ok(example) => {
                prop_assert_eq!(example.target.as_str(), INVALID_LABEL);
                prop_assert!(!example.is_confounded);
            }
            Err(err) => prop_assert!(err.is_recoverable(), "{}", err),
        }
    }

    #[test]
    fn prop_axis_reduction_needs_rank_three(
        seed in any::<u64>(),
        config in config_strategy(),
        invalid in any::<bool>(),
    ) {
        if let Ok(chain) = chain_for(seed, &config, invalid) {
            for step in chain.steps() {
                if step.op == Operation::SumAxis {
                    prop_assert!(step.input.rank() >= 3);
                }
            }
        }
    }

    #[test]
    fn prop_exactly_one_step_broken_on_second_last_axis(
        seed in any::<u64>(),
        config in config_strategy(),
    ) {
        let Ok(chain) = chain_for(seed, &config, true) else {
            return Ok(());
        };
        let broken: Vec<_> = chain.steps().iter().filter(|s| s.invalid).collect();
        prop_assert_eq!(broken.len(), 1);
        let step = broken[0];
        prop_assert!(step.op.is_invalidatable());
        prop_assert!(step.op.apply(&step.input, &step.rendered).is_err());

        let original = step.companion.shape().unwrap().dims();
        let rendered = step.rendered.shape().unwrap().dims();
        let axis = original.len() - 2;
        prop_assert_eq!(original.len(), rendered.len());
        for (i, (a, b)) in original.iter().zip(rendered).enumerate() {
            if i == axis {
                prop_assert_ne!(a, b);
            } else {
                prop_assert_eq!(a, b);
            }
        }

        for other in chain.steps().iter().filter(|s| !s.invalid) {
            prop_assert_eq!(&other.companion, &other.rendered);
        }
    }

    #[test]
    fn prop_confounded_iff_result_was_rendered(seed in any::<u64>(), config in config_strategy()) {
        let Ok(chain) = chain_for(seed, &config, false) else {
            return Ok(());
        };
        let mut rendered = vec![chain.initial().clone()];
        rendered.extend(chain.steps().iter().filter_map(|s| s.rendered.shape().cloned()));
        prop_assert_eq!(chain.seen(), rendered.as_slice());

        let leaked = rendered.iter().any(|s| s == chain.current());
        prop_assert_eq!(chain.is_confounded(), leaked);
    }

    #[test]
    fn prop_seeded_generation_is_deterministic(
        seed in any::<u64>(),
        config in config_strategy(),
        invalid in any::<bool>(),
    ) {
        let mut a = StdRng::seed_from_u64(seed);
        let mut b = StdRng::seed_from_u64(seed);
        prop_assert_eq!(
            generate(&mut a, None, &config, invalid),
            generate(&mut b, None, &config, invalid)
        );
    }

    #[test]
    fn prop_text_opens_with_initial_shape(seed in any::<u64>(), config in config_strategy()) {
        let Ok(chain) = chain_for(seed, &config, false) else {
            return Ok(());
        };
        let text = chain.text();
        prop_assert!(text.contains(&chain.initial().to_string()));
        prop_assert_eq!(text.matches(". ").count() + 1, chain.len());
        for step in &chain.steps()[1..] {
            prop_assert!(step.text.contains("the result"));
        }
    }
}

#[test]
fn invalid_chains_stop_at_no_invalidatable_op() {
    let mut rng = StdRng::seed_from_u64(3);
    let config = GeneratorConfig::default().with_operations(vec![Operation::Transpose]);
    let err = generate(&mut rng, None, &config, true).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::NoEligibleOperation {
            must_invalidate: true,
            ..
        }
    ));
}
