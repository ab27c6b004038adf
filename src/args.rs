//! CLI argument definitions.

use clap::Args;
use std::path::PathBuf;

/// Arguments for generating records from a YAML schema.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Path to schema YAML file
    #[arg(long, short = 's')]
    pub schema: PathBuf,

    /// Factory to generate records from
    #[arg(long, short = 'f')]
    pub factory: String,

    /// Number of records to generate
    #[arg(long, default_value = "10")]
    pub count: u64,

    /// Identity of the first generated record
    #[arg(long, default_value = "1")]
    pub start_id: u64,

    /// Random seed, overriding the schema seed (same seed = same data)
    #[arg(long, env = "MOCKDATA_SEED")]
    pub seed: Option<u64>,

    /// Output JSONL file (stdout when omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}
