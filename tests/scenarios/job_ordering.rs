//! Test: jobs and steps render in construction order under their declared ids

use crate::helpers::*;
use pipewright::core::Job;
use pipewright::Step;

#[test]
fn test_jobs_render_in_insertion_order() {
    let mut pipeline = pipeline("CI");
    for id in ["a", "b", "c"] {
        add_run_job(&mut pipeline, id, "true");
    }

    let document = pipeline.synthesize().unwrap();
    assert_eq!(keys(&document["jobs"]), vec!["a", "b", "c"]);
}

#[test]
fn test_declared_id_keys_the_job() {
    let mut pipeline = pipeline("CI");
    let job = pipeline.construct_job("compile-linux-x64", Job::new("ubuntu-latest"));
    pipeline.declare_job("compile", job).unwrap();
    pipeline.add_step(job, "make", Step::run("make")).unwrap();

    let deploy = pipeline.add_job("deploy", Job::new("ubuntu-latest").needs("compile"));
    pipeline.add_step(deploy, "ship", Step::run("./ship.sh")).unwrap();

    let document = pipeline.synthesize().unwrap();
    assert_eq!(keys(&document["jobs"]), vec!["compile", "deploy"]);
    assert_eq!(document["jobs"]["deploy"]["needs"][0].as_str(), Some("compile"));
}

#[test]
fn test_steps_keep_their_order() {
    let mut pipeline = pipeline("CI");
    let job = pipeline.add_job("build", Job::new("ubuntu-latest"));
    for (id, command) in [("install", "npm ci"), ("lint", "npm run lint"), ("test", "npm test")] {
        pipeline.add_step(job, id, Step::run(command)).unwrap();
    }

    let document = pipeline.synthesize().unwrap();
    let steps = document["jobs"]["build"]["steps"].as_sequence().unwrap();
    let commands: Vec<_> = steps.iter().filter_map(|s| s["run"].as_str()).collect();
    assert_eq!(commands, vec!["npm ci", "npm run lint", "npm test"]);
}
