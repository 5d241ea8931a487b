//! Test: pipeline definition files through to workflow files

use crate::helpers::keys;
use pipewright::core::config::{OutputConfig, PipelineConfig};
use pipewright::{DirectoryStore, write_pipeline};
use tempfile::TempDir;

const DEFINITION: &str = r#"
name: "Release Build"
on:
  push:
    tags: ["v*"]
  workflow_dispatch:
    inputs:
      dry-run:
        description: "Skip publishing"
        type: boolean
        default: "true"

permissions:
  contents: write

concurrency:
  group: release
  cancel-in-progress: true

jobs:
  build:
    runs-on: ubuntu-latest
    timeout-minutes: 20
    steps:
      - uses: actions/checkout@v5
        with:
          fetch-depth: 0
      - name: Build
        run: cargo build --release
        working-directory: crates/cli

  publish:
    runs-on: ubuntu-latest
    needs: [build]
    if: false
    environment: production
    permissions: read-all
    steps:
      - run: cargo publish
        continue-on-error: true
"#;

#[test]
fn test_definition_to_workflow_file() {
    let temp = TempDir::new().unwrap();
    let config = PipelineConfig::from_yaml(DEFINITION).unwrap();
    let pipeline = config.to_pipeline().unwrap();

    let output = OutputConfig::default().with_dir(temp.path().join("workflows"));
    let path = write_pipeline(&pipeline, &DirectoryStore::from_config(&output)).unwrap();
    assert!(path.ends_with("workflows/Release_Build.yml"));

    let document: serde_yaml::Value = serde_yaml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(keys(&document), vec!["name", "on", "permissions", "concurrency", "jobs"]);
    assert_eq!(keys(&document["on"]), vec!["push", "workflow_dispatch"]);
    assert_eq!(document["on"]["workflow_dispatch"]["inputs"]["dry-run"]["type"].as_str(), Some("boolean"));
    assert_eq!(document["concurrency"]["cancel-in-progress"].as_bool(), Some(true));

    let build = &document["jobs"]["build"];
    assert_eq!(build["timeout-minutes"].as_u64(), Some(20));
    assert_eq!(build["steps"][0]["with"]["fetch-depth"].as_i64(), Some(0));
    assert_eq!(build["steps"][1]["working-directory"].as_str(), Some("crates/cli"));
    assert_eq!(document["jobs"]["publish"]["steps"][0]["continue-on-error"].as_bool(), Some(true));
}

#[test]
fn test_unknown_job_fields_pass_through() {
    let config = PipelineConfig::from_yaml(DEFINITION).unwrap();
    let document = config.to_pipeline().unwrap().synthesize().unwrap();

    let publish = &document["jobs"]["publish"];
    assert_eq!(keys(publish), vec!["runs-on", "needs", "permissions", "if", "environment", "steps"]);
    assert_eq!(publish["permissions"].as_str(), Some("read-all"));
    assert_eq!(publish["if"].as_bool(), Some(false));
    assert_eq!(publish["environment"].as_str(), Some("production"));
}

#[test]
fn test_missing_file_reports_path() {
    let err = PipelineConfig::from_file("does/not/exist.yml").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.yml"));
}
