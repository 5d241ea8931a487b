//! pipewright - declarative builder for CI workflow files
//!
//! Pipelines are built as a construct tree (workflow, jobs, steps), checked
//! by validators attached to each node, and synthesized into an ordered YAML
//! document.

pub mod actions;
pub mod cli;
pub mod core;
pub mod env;
pub mod persistence;

// Re-export commonly used types
pub use crate::core::config::{OutputConfig, PipelineConfig};
pub use crate::core::{ActionRef, Job, JobId, Pipeline, PipelineProps, Step, StepId, Triggers, Value};
pub use crate::core::{FormatError, StructuralError, SynthError, ValidationError};
pub use persistence::{write_pipeline, DirectoryStore, InMemoryStore, WorkflowStore};
