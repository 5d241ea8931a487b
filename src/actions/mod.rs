//! Prebuilt action helpers
//!
//! Each helper pins a well-known action to a version and appends an ordinary
//! `uses` step to a job.

pub mod checkout;
pub mod setup_node;

pub use checkout::{checkout, CheckoutProps, CHECKOUT_VERSION};
pub use setup_node::{setup_node, SetupNodeProps, SETUP_NODE_VERSION};

use crate::core::{ActionRef, JobId, Pipeline, Step, StepId, StructuralError, ValueMap};

/// Append a step using `action` with the given inputs
pub fn action_step(
    pipeline: &mut Pipeline,
    job: JobId,
    id: &str,
    action: &ActionRef,
    inputs: ValueMap,
) -> Result<StepId, StructuralError> {
    let step = Step {
        with: inputs,
        ..Step::from_action(action)
    };
    pipeline.add_step(job, id, step)
}
