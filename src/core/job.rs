//! Job node: a runner specification plus an ordered list of steps

use crate::core::settings::{Access, Container, Defaults, Permissions, Strategy};
use crate::core::synthesis::Fields;
use crate::core::value::{Value, ValueMap};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Runner label(s) a job runs on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunsOn {
    Label(String),
    Labels(Vec<String>),
}

impl RunsOn {
    pub fn is_empty(&self) -> bool {
        match self {
            RunsOn::Label(label) => label.trim().is_empty(),
            RunsOn::Labels(labels) => labels.is_empty(),
        }
    }
}

impl Default for RunsOn {
    fn default() -> Self {
        RunsOn::Label(String::new())
    }
}

impl From<&str> for RunsOn {
    fn from(label: &str) -> Self {
        RunsOn::Label(label.to_string())
    }
}

impl From<String> for RunsOn {
    fn from(label: String) -> Self {
        RunsOn::Label(label)
    }
}

impl From<Vec<&str>> for RunsOn {
    fn from(labels: Vec<&str>) -> Self {
        RunsOn::Labels(labels.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for RunsOn {
    fn from(labels: Vec<String>) -> Self {
        RunsOn::Labels(labels)
    }
}

impl From<&RunsOn> for serde_yaml::Value {
    fn from(runs_on: &RunsOn) -> Self {
        match runs_on {
            RunsOn::Label(label) => serde_yaml::Value::String(label.clone()),
            RunsOn::Labels(labels) => labels.clone().into(),
        }
    }
}

/// A job definition. Steps are children in the construct tree, not fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Job {
    pub runs_on: RunsOn,

    /// Display name
    pub name: Option<String>,

    /// Declared ids of sibling jobs that must finish first
    pub needs: Vec<String>,

    pub env: ValueMap,

    pub defaults: Option<Defaults>,

    pub strategy: Option<Strategy>,

    pub continue_on_error: Option<bool>,

    pub timeout_minutes: Option<u32>,

    pub permissions: Permissions,

    pub container: Option<Container>,

    /// Service containers keyed by hostname
    pub services: IndexMap<String, Container>,

    pub outputs: IndexMap<String, String>,

    /// Attributes without a typed field (`if`, `environment`, ...), emitted
    /// verbatim before `steps`
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Job {
    pub fn new(runs_on: impl Into<RunsOn>) -> Self {
        Self {
            runs_on: runs_on.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Depend on a sibling job by its declared id
    pub fn needs(mut self, job: impl Into<String>) -> Self {
        self.needs.push(job.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = Some(continue_on_error);
        self
    }

    pub fn with_timeout_minutes(mut self, minutes: u32) -> Self {
        self.timeout_minutes = Some(minutes);
        self
    }

    pub fn with_permission(mut self, scope: impl Into<String>, access: Access) -> Self {
        self.permissions.insert(scope, access);
        self
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_service(mut self, name: impl Into<String>, service: Container) -> Self {
        self.services.insert(name.into(), service);
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.insert(name.into(), value.into());
        self
    }

    /// Set an attribute that has no typed field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_yaml::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Check the job's own rules.
    ///
    /// `is_sibling` answers whether a declared job id exists in the owning
    /// workflow.
    pub fn validate(&self, node_id: &str, step_count: usize, is_sibling: impl Fn(&str) -> bool) -> Vec<String> {
        let mut errors = Vec::new();

        if self.runs_on.is_empty() {
            errors.push(format!("Job '{}' must specify runs-on", node_id));
        }

        if step_count == 0 {
            errors.push(format!("Job '{}' must have at least one step", node_id));
        }

        for need in &self.needs {
            if !is_sibling(need) {
                errors.push(format!("Job dependency '{}' not found in workflow", need));
            }
        }

        errors
    }

    /// Render this job around its already-rendered steps
    pub fn synthesize(&self, steps: Vec<serde_yaml::Value>) -> Result<serde_yaml::Value, serde_yaml::Error> {
        let mut fields = Fields::new();
        fields.insert("runsOn", &self.runs_on);
        fields.opt("name", self.name.clone());
        fields.list("needs", &self.needs);
        fields.map("env", &self.env);
        fields.serialize("defaults", &self.defaults)?;
        fields.serialize("strategy", &self.strategy)?;
        fields.opt("continueOnError", self.continue_on_error);
        fields.opt("timeoutMinutes", self.timeout_minutes);
        fields.serialize("permissions", &self.permissions.to_value()?)?;
        fields.serialize("container", &self.container)?;
        fields.serialize_map("services", &self.services)?;
        fields.serialize_map("outputs", &self.outputs)?;
        fields.extra(&self.extra);
        fields.insert("steps", steps);
        Ok(fields.into_value())
    }
}
