//! Generated chains, step by step.
//!
//! Run with: cargo run --example chains
//!
//! This example demonstrates:
//! - A fixed single-step chain
//! - Random valid chains with their labels
//! - An invalid chain and its broken step

use matrixshapes_core::{generate_chain, Chain, GeneratorConfig, Operation, Shape};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn show(chain: &Chain) {
    for (i, step) in chain.steps().iter().enumerate() {
        let flag = if step.invalid { "  (invalid)" } else { "" };
        println!("  {}: {} {}{}", i, step.op, step.input, flag);
    }
    println!("  input:  {}", chain.text());
    println!("  target: {}", chain.label());
    println!("  confounded: {}", chain.is_confounded());
    println!();
}

fn main() {
    let mut rng = StdRng::seed_from_u64(2024);

    println!("=== Transpose ===\n");
    let transpose = GeneratorConfig::default()
        .with_max_ops(1)
        .with_operations(vec![Operation::Transpose]);
    match generate_chain(&mut rng, Some(Shape::from([2, 3])), &transpose, false) {
        Ok(chain) => show(&chain),
        Err(e) => println!("  error: {}", e),
    }

    println!("=== Random chains ===\n");
    let config = GeneratorConfig::default();
    for _ in 0..3 {
        match generate_chain(&mut rng, None, &config, false) {
            Ok(chain) => show(&chain),
            Err(e) => println!("  skipped: {}\n", e),
        }
    }

    println!("=== Invalid chain ===\n");
    match generate_chain(&mut rng, None, &config, true) {
        Ok(chain) => show(&chain),
        Err(e) => println!("  skipped: {}", e),
    }
}
