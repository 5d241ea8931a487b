//! `actions/setup-node`

use crate::actions::action_step;
use crate::core::{ActionRef, JobId, Pipeline, StepId, StructuralError, ValueMap};

pub const SETUP_NODE_VERSION: &str = "v4";

/// Inputs for `actions/setup-node`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupNodeProps {
    /// Version spec, e.g. `20` or `lts/*`
    pub node_version: Option<String>,
    pub node_version_file: Option<String>,
    /// `npm`, `yarn` or `pnpm`
    pub cache: Option<String>,
    pub registry_url: Option<String>,
}

impl SetupNodeProps {
    pub fn version(version: impl Into<String>) -> Self {
        Self {
            node_version: Some(version.into()),
            ..Self::default()
        }
    }

    fn inputs(&self) -> ValueMap {
        [
            ("node-version", &self.node_version),
            ("node-version-file", &self.node_version_file),
            ("cache", &self.cache),
            ("registry-url", &self.registry_url),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.into())))
        .collect()
    }
}

/// Append a Node.js setup step, pinned to [`SETUP_NODE_VERSION`]
pub fn setup_node(pipeline: &mut Pipeline, job: JobId, props: SetupNodeProps) -> Result<StepId, StructuralError> {
    let action = ActionRef::pinned("actions", "setup-node", SETUP_NODE_VERSION);
    action_step(pipeline, job, "setup-node", &action, props.inputs())
}
