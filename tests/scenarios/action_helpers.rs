//! Test: prebuilt action helpers inside a full pipeline

use crate::helpers::*;
use pipewright::actions::{checkout, setup_node, CheckoutProps, SetupNodeProps};
use pipewright::core::Job;
use pipewright::Step;

#[test]
fn test_node_pipeline() {
    let mut pipeline = pipeline("Node CI");
    let job = pipeline.add_job("test", Job::new("ubuntu-latest"));
    checkout(&mut pipeline, job, CheckoutProps::default()).unwrap();
    setup_node(
        &mut pipeline,
        job,
        SetupNodeProps {
            cache: Some("npm".to_string()),
            ..SetupNodeProps::version("20")
        },
    )
    .unwrap();
    pipeline.add_step(job, "test", Step::run("npm test")).unwrap();

    let document = pipeline.synthesize().unwrap();
    let steps = &document["jobs"]["test"]["steps"];

    assert_eq!(steps[0]["uses"].as_str(), Some("actions/checkout@v5"));
    assert!(steps[0].get("with").is_none());
    assert_eq!(steps[1]["uses"].as_str(), Some("actions/setup-node@v4"));
    assert_eq!(steps[1]["with"]["node-version"].as_str(), Some("20"));
    assert_eq!(steps[1]["with"]["cache"].as_str(), Some("npm"));
    assert_eq!(steps[2]["run"].as_str(), Some("npm test"));
}
