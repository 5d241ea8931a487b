//! Scenario-based tests for pipewright

mod helpers;

mod action_helpers;
mod definition_files;
mod end_to_end;
mod job_ordering;
mod validation_aggregation;
