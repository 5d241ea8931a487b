//! Test: building, synthesizing and writing a minimal pipeline

use crate::helpers::*;
use pipewright::core::synthesis::HEADER;
use pipewright::{DirectoryStore, write_pipeline};
use tempfile::TempDir;

#[test]
fn test_minimal_ci_pipeline() {
    let mut pipeline = pipeline("CI");
    add_run_job(&mut pipeline, "build", "npm test");

    let document = pipeline.synthesize().unwrap();

    assert_eq!(keys(&document), vec!["name", "on", "jobs"]);
    assert_eq!(document["name"].as_str(), Some("CI"));
    assert_eq!(document["on"]["push"]["branches"][0].as_str(), Some("main"));
    assert_eq!(document["jobs"]["build"]["runs-on"].as_str(), Some("ubuntu-latest"));

    let expected: serde_yaml::Value = serde_yaml::from_str("run: npm test").unwrap();
    assert_eq!(document["jobs"]["build"]["steps"][0], expected);
}

#[test]
fn test_written_file_has_header_and_derived_name() {
    let temp = TempDir::new().unwrap();
    let mut pipeline = pipeline("Build and Test");
    add_run_job(&mut pipeline, "build", "npm test");

    let path = pipeline.synth_to(temp.path()).unwrap();

    assert_eq!(path, temp.path().join("Build_and_Test.yml"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(&format!("{}\n\n", HEADER)));

    let body: serde_yaml::Value = serde_yaml::from_str(&content).unwrap();
    assert_eq!(body, pipeline.synthesize().unwrap());
}

#[test]
fn test_synthesis_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let store = DirectoryStore::new(temp.path());
    let mut pipeline = pipeline("CI");
    add_run_job(&mut pipeline, "lint", "npm run lint");
    add_run_job(&mut pipeline, "test", "npm test");

    let first = pipeline.to_yaml().unwrap();
    let second = pipeline.to_yaml().unwrap();
    assert_eq!(first, second);

    let path = write_pipeline(&pipeline, &store).unwrap();
    let again = write_pipeline(&pipeline, &store).unwrap();
    assert_eq!(path, again);
    assert_eq!(std::fs::read_to_string(path).unwrap(), first);
}
