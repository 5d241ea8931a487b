//! Workflow trigger events

use crate::core::synthesis::Fields;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Push event filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PushTrigger {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", alias = "branchesIgnore")]
    pub branches_ignore: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", alias = "tagsIgnore")]
    pub tags_ignore: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", alias = "pathsIgnore")]
    pub paths_ignore: Vec<String>,
}

impl PushTrigger {
    /// Trigger on pushes to the given branches
    pub fn branches<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            branches: branches.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Pull request event filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PullRequestTrigger {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", alias = "branchesIgnore")]
    pub branches_ignore: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", alias = "pathsIgnore")]
    pub paths_ignore: Vec<String>,
}

impl PullRequestTrigger {
    pub fn branches<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            branches: branches.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Input value type for manually dispatched or called workflows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    String,
    Choice,
    Boolean,
    Number,
    Environment,
}

/// An input for a manually dispatched workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchInput {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<InputType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Manual trigger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDispatchTrigger {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub inputs: IndexMap<String, DispatchInput>,
}

/// A cron schedule entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub cron: String,
}

/// Trigger on a repository dispatch webhook
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDispatchTrigger {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

/// An input accepted by a reusable workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallInput {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<InputType>,
}

/// An output exposed by a reusable workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOutput {
    pub description: String,
    pub value: String,
}

/// A secret accepted by a reusable workflow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSecret {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Makes the workflow callable from other workflows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowCallTrigger {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub inputs: IndexMap<String, CallInput>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub outputs: IndexMap<String, CallOutput>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub secrets: IndexMap<String, CallSecret>,
}

/// The set of events that start a workflow.
///
/// Known kinds are typed; anything else goes in `custom` and is emitted
/// as-is after the known kinds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_yaml::Value>")]
pub struct Triggers {
    pub push: Option<PushTrigger>,
    pub pull_request: Option<PullRequestTrigger>,
    pub workflow_dispatch: Option<WorkflowDispatchTrigger>,
    pub schedule: Option<Vec<ScheduleItem>>,
    pub repository_dispatch: Option<RepositoryDispatchTrigger>,
    pub workflow_call: Option<WorkflowCallTrigger>,
    pub custom: IndexMap<String, serde_yaml::Value>,
}

/// An empty trigger (`push:`) means "no filters"
fn filters<T: DeserializeOwned + Default>(config: serde_yaml::Value) -> Result<T, serde_yaml::Error> {
    if config.is_null() {
        Ok(T::default())
    } else {
        serde_yaml::from_value(config)
    }
}

impl TryFrom<IndexMap<String, serde_yaml::Value>> for Triggers {
    type Error = serde_yaml::Error;

    fn try_from(entries: IndexMap<String, serde_yaml::Value>) -> Result<Self, Self::Error> {
        let mut triggers = Triggers::new();
        for (kind, config) in entries {
            match kind.as_str() {
                "push" => triggers.push = Some(filters(config)?),
                "pull_request" | "pullRequest" => triggers.pull_request = Some(filters(config)?),
                "workflow_dispatch" | "workflowDispatch" => {
                    triggers.workflow_dispatch = Some(filters(config)?)
                }
                "schedule" => triggers.schedule = Some(serde_yaml::from_value(config)?),
                "repository_dispatch" | "repositoryDispatch" => {
                    triggers.repository_dispatch = Some(filters(config)?)
                }
                "workflow_call" | "workflowCall" => triggers.workflow_call = Some(filters(config)?),
                _ => {
                    triggers.custom.insert(kind, config);
                }
            }
        }
        Ok(triggers)
    }
}

impl Triggers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, trigger: PushTrigger) -> Self {
        self.push = Some(trigger);
        self
    }

    pub fn pull_request(mut self, trigger: PullRequestTrigger) -> Self {
        self.pull_request = Some(trigger);
        self
    }

    pub fn workflow_dispatch(mut self, trigger: WorkflowDispatchTrigger) -> Self {
        self.workflow_dispatch = Some(trigger);
        self
    }

    /// Add a cron schedule entry
    pub fn schedule(mut self, cron: impl Into<String>) -> Self {
        self.schedule
            .get_or_insert_with(Vec::new)
            .push(ScheduleItem { cron: cron.into() });
        self
    }

    pub fn repository_dispatch(mut self, trigger: RepositoryDispatchTrigger) -> Self {
        self.repository_dispatch = Some(trigger);
        self
    }

    pub fn workflow_call(mut self, trigger: WorkflowCallTrigger) -> Self {
        self.workflow_call = Some(trigger);
        self
    }

    /// Any other event kind, emitted structurally unchanged
    pub fn custom(mut self, kind: impl Into<String>, config: serde_yaml::Value) -> Self {
        self.custom.insert(kind.into(), config);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.push.is_none()
            && self.pull_request.is_none()
            && self.workflow_dispatch.is_none()
            && self.schedule.is_none()
            && self.repository_dispatch.is_none()
            && self.workflow_call.is_none()
            && self.custom.is_empty()
    }

    /// Render the `on` block
    pub fn synthesize(&self) -> Result<serde_yaml::Value, serde_yaml::Error> {
        let mut fields = Fields::new();
        fields.serialize("push", &self.push)?;
        fields.serialize("pullRequest", &self.pull_request)?;
        fields.serialize("workflowDispatch", &self.workflow_dispatch)?;
        fields.serialize("schedule", &self.schedule)?;
        fields.serialize("repositoryDispatch", &self.repository_dispatch)?;
        fields.serialize("workflowCall", &self.workflow_call)?;
        for (kind, config) in &self.custom {
            fields.insert(kind, config.clone());
        }
        Ok(fields.into_value())
    }
}
