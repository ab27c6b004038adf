//! Command-line interface for mockdata
//!
//! # Usage Examples
//!
//! ## Generate records
//! ```bash
//! # 1000 users to a file, seeded for reproducibility
//! mockdata generate \
//!   --schema factories.yaml \
//!   --factory user \
//!   --count 1000 \
//!   --seed 42 \
//!   --output users.jsonl
//!
//! # Continue numbering from identity 1001 and print to stdout
//! mockdata generate -s factories.yaml -f user --count 10 --start-id 1001
//! ```
//!
//! ## Validate a schema
//! ```bash
//! mockdata validate --schema factories.yaml
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=debug`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use mockdata::schema::FactorySchema;
use mockdata::{GenerateArgs, JsonlWriter};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "mockdata")]
#[command(about = "A tool for generating synthetic records for tests")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate records from a factory as JSON Lines
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Build and initialize every factory in a schema
    Validate {
        /// Path to schema YAML file
        #[arg(long, short = 's')]
        schema: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Logs go to stderr so generated records can be piped from stdout
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => run_generate(args),
        Commands::Validate { schema } => run_validate(schema),
    }
}

fn load_schema(path: &Path) -> anyhow::Result<FactorySchema> {
    FactorySchema::from_file(path)
        .with_context(|| format!("Failed to load schema '{}'", path.display()))
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut schema = load_schema(&args.schema)?;
    if let Some(seed) = args.seed {
        schema = schema.with_seed(seed);
    }

    let factory = schema
        .build_factory(&args.factory)
        .with_context(|| format!("Failed to build factory '{}'", args.factory))?;
    let mut writer = JsonlWriter::new(factory).with_start_id(args.start_id);

    match &args.output {
        Some(path) => {
            writer
                .write_file(path, args.count)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
        None => {
            let metrics = writer
                .write(std::io::stdout().lock(), args.count)
                .context("Failed to write records to stdout")?;
            info!("Generated {} records", metrics.records_written);
        }
    }

    Ok(())
}

fn run_validate(path: PathBuf) -> anyhow::Result<()> {
    let schema = load_schema(&path)?;
    let factories = schema
        .build_all()
        .with_context(|| format!("Schema '{}' is invalid", path.display()))?;

    for (name, factory) in &factories {
        println!("{name}: {} attributes", factory.attr_names().len());
    }
    info!("Schema '{}' is valid", path.display());
    Ok(())
}
