use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use matrixshapes_core::{generate_chain, Chain, GeneratorConfig, Operation};
use matrixshapes_task::{assemble_seeded, BatchConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a matrixshapes task file
#[derive(Parser, Debug)]
#[command(name = "matrixshapes", version, about)]
struct Args {
    /// Task examples to generate
    #[arg(long, default_value_t = 1000)]
    num: usize,

    /// Fraction of examples allowed to contain the label in their text
    #[arg(long, default_value_t = 0.5)]
    cont: f64,

    /// Fraction of examples with a shape-incompatible step
    #[arg(long, default_value_t = 0.0)]
    frac_invalid: f64,

    /// Maximum number of operations per example
    #[arg(long, default_value_t = 5)]
    num_ops: usize,

    /// Exclusive upper bound on dimension sizes
    #[arg(long, default_value_t = 5)]
    dim_max: usize,

    /// Maximum rank of the starting matrix
    #[arg(long, default_value_t = 4)]
    dims_max: usize,

    /// Restrict operations (comma separated, e.g. "multiply,add")
    #[arg(long, value_delimiter = ',')]
    ops: Vec<Operation>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output path
    #[arg(short, long, default_value = "task.json")]
    output: PathBuf,

    /// Print the steps of a single example instead of writing a task
    #[arg(long)]
    explain: bool,

    /// Log every accepted example
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut generator = GeneratorConfig::default()
        .with_max_ops(args.num_ops)
        .with_dim_max(args.dim_max)
        .with_dims_max(args.dims_max);
    if !args.ops.is_empty() {
        generator = generator.with_operations(args.ops.clone());
    }

    if args.explain {
        let mut rng = match args.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let invalid = args.frac_invalid >= 1.0;
        let chain = generate_chain(&mut rng, None, &generator, invalid)
            .context("failed to generate example")?;
        print!("{}", explain(&chain));
        return Ok(());
    }

    let mut config = BatchConfig::default()
        .with_num(args.num)
        .with_cont(args.cont)
        .with_frac_invalid(args.frac_invalid)
        .with_generator(generator);
    config.seed = args.seed;

    let batch = assemble_seeded(&config).context("failed to assemble task")?;
    let task = batch.into_task_file();
    task.write(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(path = %args.output.display(), examples = task.len(), "wrote task");
    Ok(())
}

fn explain(chain: &Chain) -> String {
    let mut out = format!("start {}\n", chain.initial());
    for (i, step) in chain.steps().iter().enumerate() {
        let marker = if step.invalid { "  <- invalid" } else { "" };
        out.push_str(&format!(
            "{:>2}. {:<9} {} -> {}{}\n",
            i,
            step.op.name(),
            step.input,
            step.text,
            marker
        ));
    }
    out.push_str(&format!("input:  {}\n", chain.text()));
    out.push_str(&format!("target: {}\n", chain.label()));
    out.push_str(&format!("confounded: {}\n", chain.is_confounded()));
    out
}
