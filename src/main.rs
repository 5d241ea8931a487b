use anyhow::{Context, Result};
use pipewright::cli::commands::{ShowCommand, SynthCommand, ValidateCommand};
use pipewright::cli::output::*;
use pipewright::cli::{Cli, Command};
use pipewright::core::config::{OutputConfig, PipelineConfig};
use pipewright::persistence::{write_pipeline, DirectoryStore};
use pipewright::{Pipeline, SynthError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Synth(cmd) => synth_pipeline(cmd)?,
        Command::Validate(cmd) => validate_pipeline(cmd)?,
        Command::Show(cmd) => show_pipeline(cmd)?,
    }

    Ok(())
}

fn load(file: &str) -> Result<Pipeline> {
    let config = PipelineConfig::from_file(file).context("Failed to load pipeline definition")?;
    config.to_pipeline().context("Failed to build pipeline")
}

fn synth_pipeline(cmd: &SynthCommand) -> Result<()> {
    let pipeline = load(&cmd.file)?;

    if cmd.stdout {
        print!("{}", pipeline.to_yaml()?);
        return Ok(());
    }

    let config = match &cmd.out_dir {
        Some(dir) => OutputConfig::default().with_dir(dir),
        None => OutputConfig::from_env(),
    };

    match write_pipeline(&pipeline, &DirectoryStore::from_config(&config)) {
        Ok(path) => {
            println!(
                "{} {} written to {}",
                CHECK,
                style(pipeline.name()).bold(),
                style(path.display()).cyan()
            );
            Ok(())
        }
        Err(SynthError::Validation(e)) => {
            println!("{} {} is invalid:", CROSS, style(pipeline.name()).bold());
            println!("{}", format_errors(&e.errors));
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn validate_pipeline(cmd: &ValidateCommand) -> Result<()> {
    if !cmd.json {
        println!("{} Validating pipeline...", INFO);
    }

    let pipeline = load(&cmd.file)?;
    let errors = pipeline.validate();

    if cmd.json {
        let report = serde_json::json!({
            "name": pipeline.name(),
            "valid": errors.is_empty(),
            "jobs": pipeline.jobs().len(),
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if errors.is_empty() {
        println!("{} Pipeline definition is valid!", CHECK);
        println!("  Name: {}", style(pipeline.name()).bold());
        println!("  Jobs: {}", style(pipeline.jobs().len()).cyan());
    } else {
        println!("{} Validation failed ({} errors):", CROSS, errors.len());
        println!("{}", format_errors(&errors));
    }

    if !errors.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn show_pipeline(cmd: &ShowCommand) -> Result<()> {
    let pipeline = load(&cmd.file)?;
    println!("{}", format_tree(&pipeline));

    let errors = pipeline.validate();
    if !errors.is_empty() {
        println!("\n{} {} validation errors", WARN, errors.len());
    }
    Ok(())
}
