//! Test: validation errors are collected across the whole tree

use crate::helpers::*;
use pipewright::core::{Job, Triggers};
use pipewright::{InMemoryStore, Pipeline, PipelineProps, Step, SynthError, write_pipeline};

#[test]
fn test_every_error_is_reported() {
    let mut pipeline = Pipeline::new(PipelineProps::new("", Triggers::new()));
    let build = pipeline.add_job("build", Job::new(Vec::<String>::new()).needs("setup"));
    pipeline.add_step(build, "broken", Step::default()).unwrap();
    pipeline.add_job("empty", Job::new("ubuntu-latest"));

    let errors = pipeline.validate();

    assert!(errors.contains(&"Workflow name is required".to_string()));
    assert!(errors.contains(&"Workflow must have at least one trigger".to_string()));
    assert!(errors.contains(&"Job 'build' must specify runs-on".to_string()));
    assert!(errors.contains(&"Job dependency 'setup' not found in workflow".to_string()));
    assert!(errors.contains(&"Step 'broken' must have either uses or run".to_string()));
    assert!(errors.contains(&"Job 'empty' must have at least one step".to_string()));
    assert_eq!(errors.len(), 6);
}

#[test]
fn test_parent_errors_come_before_child_errors() {
    let mut pipeline = Pipeline::new(PipelineProps::new("", pipeline("CI").props().on.clone()));
    let job = pipeline.add_job("build", Job::new("ubuntu-latest"));
    let step = pipeline.add_step(job, "both", Step::run("make")).unwrap();
    pipeline.step_mut(step).unwrap().uses = Some("actions/checkout@v5".to_string());

    assert_eq!(
        pipeline.validate(),
        vec![
            "Workflow name is required",
            "Step 'both' cannot have both uses and run",
        ]
    );
}

#[test]
fn test_invalid_pipeline_fails_synthesis_with_all_errors() {
    let store = InMemoryStore::new();
    let mut pipeline = pipeline("CI");
    pipeline.add_job("a", Job::new("ubuntu-latest"));
    pipeline.add_job("b", Job::new("ubuntu-latest"));

    let err = write_pipeline(&pipeline, &store).unwrap_err();

    match &err {
        SynthError::Validation(validation) => assert_eq!(validation.errors.len(), 2),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        "Validation errors:\nJob 'a' must have at least one step\nJob 'b' must have at least one step"
    );
    assert!(store.is_empty());
}

#[test]
fn test_colliding_job_ids_do_not_drop_jobs() {
    let store = InMemoryStore::new();
    let mut pipeline = pipeline("CI");
    let windows = pipeline.construct_job("build", Job::new("windows-latest"));
    pipeline.add_step(windows, "run", Step::run("build.cmd")).unwrap();
    add_run_job(&mut pipeline, "build", "make");

    assert_eq!(pipeline.validate(), vec!["Duplicate job ID: build"]);
    assert!(write_pipeline(&pipeline, &store).is_err());
    assert!(store.is_empty());
}

#[test]
fn test_step_handle_from_another_pipeline() {
    let mut first = pipeline("First");
    let foreign = add_run_job(&mut first, "build", "true");
    let mut second = pipeline("Second");
    let local = add_run_job(&mut second, "build", "true");

    assert!(second.add_step(foreign, "wrong", Step::run("echo wrong")).is_err());
    assert_eq!(second.steps(local).len(), 1);
    assert_eq!(first.steps(foreign).len(), 1);
}
