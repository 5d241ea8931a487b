//! Pipeline definitions loaded from YAML, and output configuration

use crate::core::{
    Concurrency, Container, Defaults, Job, Permissions, Pipeline, PipelineProps, RunsOn, Step,
    Strategy, Triggers, ValueMap,
};
use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding where workflow files are written
pub const OUTPUT_DIR_ENV: &str = "PIPEWRIGHT_OUTPUT_DIR";

/// Where synthesized workflow files go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from(".") }
    }
}

impl OutputConfig {
    /// Read the output directory from [`OUTPUT_DIR_ENV`], defaulting to `.`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`OutputConfig::from_env`] with an injectable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(OUTPUT_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self { dir: PathBuf::from(dir) },
            _ => Self::default(),
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }
}

/// Top-level pipeline definition file
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Workflow name
    pub name: String,

    /// Trigger events
    #[serde(default)]
    pub on: Triggers,

    #[serde(default)]
    pub env: ValueMap,

    #[serde(default)]
    pub defaults: Option<Defaults>,

    #[serde(default)]
    pub permissions: Permissions,

    #[serde(default)]
    pub concurrency: Option<Concurrency>,

    /// Jobs keyed by declared id, in file order
    #[serde(default)]
    pub jobs: IndexMap<String, JobConfig>,
}

/// Job definition as written in the file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JobConfig {
    pub runs_on: RunsOn,

    /// Construct id when it should differ from the declared id
    #[serde(default)]
    pub node_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub needs: Vec<String>,

    #[serde(default)]
    pub env: ValueMap,

    #[serde(default)]
    pub defaults: Option<Defaults>,

    #[serde(default)]
    pub strategy: Option<Strategy>,

    #[serde(default)]
    pub continue_on_error: Option<bool>,

    #[serde(default)]
    pub timeout_minutes: Option<u32>,

    #[serde(default)]
    pub permissions: Permissions,

    #[serde(default)]
    pub container: Option<Container>,

    #[serde(default)]
    pub services: IndexMap<String, Container>,

    #[serde(default)]
    pub outputs: IndexMap<String, String>,

    #[serde(default)]
    pub steps: Vec<StepConfig>,

    /// Any other job attribute, kept as written
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

/// Step definition as written in the file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StepConfig {
    /// Construct id; defaults to the declared `id`, then to `step-<n>`
    #[serde(default)]
    pub node_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub uses: Option<String>,

    #[serde(default)]
    pub run: Option<String>,

    #[serde(default)]
    pub env: ValueMap,

    #[serde(default)]
    pub with: ValueMap,

    #[serde(default)]
    pub working_directory: Option<String>,

    #[serde(default)]
    pub shell: Option<String>,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub continue_on_error: Option<bool>,

    #[serde(default)]
    pub timeout_minutes: Option<u32>,

    #[serde(default, rename = "if")]
    pub condition: Option<String>,

    /// Any other step attribute, kept as written
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl PipelineConfig {
    /// Load a pipeline definition from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse a pipeline definition from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.check_actions()?;
        Ok(config)
    }

    /// `uses` is passed through as written, but it cannot be blank
    fn check_actions(&self) -> Result<()> {
        for (job_id, job) in &self.jobs {
            for (index, step) in job.steps.iter().enumerate() {
                if step.uses.as_deref().is_some_and(|uses| uses.trim().is_empty()) {
                    bail!("Job '{}' step {} has an empty `uses`", job_id, index + 1);
                }
            }
        }
        Ok(())
    }

    /// Build the construct tree for this definition
    pub fn to_pipeline(&self) -> Result<Pipeline> {
        let props = PipelineProps {
            name: self.name.clone(),
            on: self.on.clone(),
            env: self.env.clone(),
            defaults: self.defaults.clone(),
            permissions: self.permissions.clone(),
            concurrency: self.concurrency.clone(),
        };
        let mut pipeline = Pipeline::new(props);

        for (declared, config) in &self.jobs {
            let node_id = config.node_id.clone().unwrap_or_else(|| declared.clone());
            let job = pipeline.construct_job(node_id, config.to_job());
            pipeline.declare_job(declared.clone(), job)?;

            for (index, step) in config.steps.iter().enumerate() {
                let node_id = step
                    .node_id
                    .clone()
                    .or_else(|| step.id.clone())
                    .unwrap_or_else(|| format!("step-{}", index + 1));
                pipeline.add_step(job, node_id, step.to_step())?;
            }
        }

        Ok(pipeline)
    }
}

impl JobConfig {
    fn to_job(&self) -> Job {
        Job {
            runs_on: self.runs_on.clone(),
            name: self.name.clone(),
            needs: self.needs.clone(),
            env: self.env.clone(),
            defaults: self.defaults.clone(),
            strategy: self.strategy.clone(),
            continue_on_error: self.continue_on_error,
            timeout_minutes: self.timeout_minutes,
            permissions: self.permissions.clone(),
            container: self.container.clone(),
            services: self.services.clone(),
            outputs: self.outputs.clone(),
            extra: self.extra.clone(),
        }
    }
}

impl StepConfig {
    fn to_step(&self) -> Step {
        Step {
            name: self.name.clone(),
            uses: self.uses.clone(),
            run: self.run.clone(),
            env: self.env.clone(),
            with: self.with.clone(),
            working_directory: self.working_directory.clone(),
            shell: self.shell.clone(),
            id: self.id.clone(),
            continue_on_error: self.continue_on_error,
            timeout_minutes: self.timeout_minutes,
            condition: self.condition.clone(),
            extra: self.extra.clone(),
        }
    }
}
