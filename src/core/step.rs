//! Step node: one action invocation or shell command

use crate::core::action::ActionRef;
use crate::core::synthesis::Fields;
use crate::core::value::{Value, ValueMap};
use indexmap::IndexMap;

/// A single step in a job
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    /// Display name
    pub name: Option<String>,

    /// Action to use (`owner/name@version`)
    pub uses: Option<String>,

    /// Shell command to run
    pub run: Option<String>,

    /// Environment variables for this step
    pub env: ValueMap,

    /// Inputs for the action (`with`)
    pub with: ValueMap,

    pub working_directory: Option<String>,

    /// Shell override for `run`
    pub shell: Option<String>,

    /// Declared id, used to reference this step's outputs
    pub id: Option<String>,

    pub continue_on_error: Option<bool>,

    pub timeout_minutes: Option<u32>,

    /// Conditional-run expression (`if`)
    pub condition: Option<String>,

    /// Attributes without a typed field, emitted verbatim after the rest
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Step {
    /// A step running a shell command
    pub fn run(command: impl Into<String>) -> Self {
        Self {
            run: Some(command.into()),
            ..Self::default()
        }
    }

    /// A step using an action given as a string
    pub fn uses(action: impl Into<String>) -> Self {
        Self {
            uses: Some(action.into()),
            ..Self::default()
        }
    }

    /// A step using a parsed action reference
    pub fn from_action(action: &ActionRef) -> Self {
        Self::uses(action.to_string())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Add an action input
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with.insert(key.into(), value.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
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

    /// Set an attribute that has no typed field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_yaml::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Only run when the expression holds
    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Exactly one of `uses` / `run` must be set
    pub fn validate(&self, node_id: &str) -> Vec<String> {
        match (&self.uses, &self.run) {
            (None, None) => vec![format!("Step '{}' must have either uses or run", node_id)],
            (Some(_), Some(_)) => vec![format!("Step '{}' cannot have both uses and run", node_id)],
            _ => Vec::new(),
        }
    }

    /// Render this step; absent attributes are omitted
    pub fn synthesize(&self) -> serde_yaml::Value {
        let mut fields = Fields::new();
        fields.opt("name", self.name.clone());
        fields.opt("uses", self.uses.clone());
        fields.opt("run", self.run.clone());
        fields.map("env", &self.env);
        fields.map("with", &self.with);
        fields.opt("workingDirectory", self.working_directory.clone());
        fields.opt("shell", self.shell.clone());
        fields.opt("id", self.id.clone());
        fields.opt("continueOnError", self.continue_on_error);
        fields.opt("timeoutMinutes", self.timeout_minutes);
        fields.opt("if", self.condition.clone());
        fields.extra(&self.extra);
        fields.into_value()
    }
}
