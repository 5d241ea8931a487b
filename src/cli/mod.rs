//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{ShowCommand, SynthCommand, ValidateCommand};
use std::ffi::OsString;

/// Declarative CI workflow builder
#[derive(Debug, Parser, Clone)]
#[command(name = "pipewright")]
#[command(version)]
#[command(about = "Build, validate and synthesize CI workflow files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Synthesize a pipeline definition into a workflow file
    Synth(SynthCommand),

    /// Validate a pipeline definition
    Validate(ValidateCommand),

    /// Print the construct tree of a pipeline definition
    Show(ShowCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_synth() {
        let cli = Cli::try_parse_from(["pipewright", "synth", "-f", "ci.yml", "--out-dir", "out"]).unwrap();
        match cli.command {
            Command::Synth(cmd) => {
                assert_eq!(cmd.file, "ci.yml");
                assert_eq!(cmd.out_dir.as_deref(), Some("out"));
                assert!(!cmd.stdout);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["pipewright", "validate", "--file", "ci.yml", "-v", "--json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Validate(ValidateCommand { json: true, .. })));
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["pipewright", "show"]).is_err());
    }
}
