//! Test utility functions for pipewright

use pipewright::core::{Job, JobId, PushTrigger, Triggers};
use pipewright::{Pipeline, PipelineProps, Step};

/// Pipeline named `name` triggered by pushes to main, with no jobs
pub fn pipeline(name: &str) -> Pipeline {
    Pipeline::new(PipelineProps::new(
        name,
        Triggers::new().push(PushTrigger::branches(["main"])),
    ))
}

/// Add a job with a single `run` step
pub fn add_run_job(pipeline: &mut Pipeline, id: &str, command: &str) -> JobId {
    let job = pipeline.add_job(id, Job::new("ubuntu-latest"));
    pipeline
        .add_step(job, "run", Step::run(command))
        .expect("job scope is valid");
    job
}

/// Top-level keys of a YAML mapping, in order
pub fn keys(value: &serde_yaml::Value) -> Vec<String> {
    value
        .as_mapping()
        .expect("mapping")
        .keys()
        .filter_map(|key| key.as_str().map(str::to_string))
        .collect()
}
