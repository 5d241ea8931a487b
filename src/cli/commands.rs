//! CLI command definitions

use clap::Args;

/// Synthesize a pipeline definition
#[derive(Debug, Args, Clone)]
pub struct SynthCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output directory (overrides PIPEWRIGHT_OUTPUT_DIR)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Print the workflow instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

/// Validate a pipeline definition
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Show the construct tree
#[derive(Debug, Args, Clone)]
pub struct ShowCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,
}
