//! Well-known runner environment variables
//!
//! Each variable can be referenced from an expression (`env.NAME`) or from a
//! shell command (`$NAME`).

use std::fmt;

/// A runner-provided environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvVar(&'static str);

impl EnvVar {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }

    /// Expression context form, e.g. `env.GITHUB_SHA`
    pub fn expr(self) -> String {
        format!("env.{}", self.0)
    }

    /// `${{ env.NAME }}`, usable anywhere a string attribute is
    pub fn interpolated(self) -> String {
        format!("${{{{ env.{} }}}}", self.0)
    }

    /// Shell form, e.g. `$GITHUB_SHA`
    pub fn shell(self) -> String {
        format!("${}", self.0)
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const CI: EnvVar = EnvVar::new("CI");
pub const GITHUB_ACTIONS: EnvVar = EnvVar::new("GITHUB_ACTIONS");

// Action invocation
pub const GITHUB_ACTION: EnvVar = EnvVar::new("GITHUB_ACTION");
pub const GITHUB_ACTION_PATH: EnvVar = EnvVar::new("GITHUB_ACTION_PATH");
pub const GITHUB_ACTION_REPOSITORY: EnvVar = EnvVar::new("GITHUB_ACTION_REPOSITORY");

// Actor
pub const GITHUB_ACTOR: EnvVar = EnvVar::new("GITHUB_ACTOR");
pub const GITHUB_ACTOR_ID: EnvVar = EnvVar::new("GITHUB_ACTOR_ID");
pub const GITHUB_TRIGGERING_ACTOR: EnvVar = EnvVar::new("GITHUB_TRIGGERING_ACTOR");

// Server URLs
pub const GITHUB_API_URL: EnvVar = EnvVar::new("GITHUB_API_URL");
pub const GITHUB_GRAPHQL_URL: EnvVar = EnvVar::new("GITHUB_GRAPHQL_URL");
pub const GITHUB_SERVER_URL: EnvVar = EnvVar::new("GITHUB_SERVER_URL");

// Event and refs
pub const GITHUB_EVENT_NAME: EnvVar = EnvVar::new("GITHUB_EVENT_NAME");
pub const GITHUB_EVENT_PATH: EnvVar = EnvVar::new("GITHUB_EVENT_PATH");
pub const GITHUB_REF: EnvVar = EnvVar::new("GITHUB_REF");
pub const GITHUB_REF_NAME: EnvVar = EnvVar::new("GITHUB_REF_NAME");
pub const GITHUB_REF_TYPE: EnvVar = EnvVar::new("GITHUB_REF_TYPE");
pub const GITHUB_HEAD_REF: EnvVar = EnvVar::new("GITHUB_HEAD_REF");
pub const GITHUB_BASE_REF: EnvVar = EnvVar::new("GITHUB_BASE_REF");
pub const GITHUB_SHA: EnvVar = EnvVar::new("GITHUB_SHA");

// Repository
pub const GITHUB_REPOSITORY: EnvVar = EnvVar::new("GITHUB_REPOSITORY");
pub const GITHUB_REPOSITORY_OWNER: EnvVar = EnvVar::new("GITHUB_REPOSITORY_OWNER");
pub const GITHUB_WORKSPACE: EnvVar = EnvVar::new("GITHUB_WORKSPACE");

// Run
pub const GITHUB_WORKFLOW: EnvVar = EnvVar::new("GITHUB_WORKFLOW");
pub const GITHUB_JOB: EnvVar = EnvVar::new("GITHUB_JOB");
pub const GITHUB_RUN_ID: EnvVar = EnvVar::new("GITHUB_RUN_ID");
pub const GITHUB_RUN_NUMBER: EnvVar = EnvVar::new("GITHUB_RUN_NUMBER");
pub const GITHUB_RUN_ATTEMPT: EnvVar = EnvVar::new("GITHUB_RUN_ATTEMPT");

// Files the runner reads back after a step
pub const GITHUB_ENV: EnvVar = EnvVar::new("GITHUB_ENV");
pub const GITHUB_OUTPUT: EnvVar = EnvVar::new("GITHUB_OUTPUT");
pub const GITHUB_PATH: EnvVar = EnvVar::new("GITHUB_PATH");
pub const GITHUB_STEP_SUMMARY: EnvVar = EnvVar::new("GITHUB_STEP_SUMMARY");

// Runner
pub const RUNNER_OS: EnvVar = EnvVar::new("RUNNER_OS");
pub const RUNNER_ARCH: EnvVar = EnvVar::new("RUNNER_ARCH");
pub const RUNNER_NAME: EnvVar = EnvVar::new("RUNNER_NAME");
pub const RUNNER_TEMP: EnvVar = EnvVar::new("RUNNER_TEMP");
pub const RUNNER_TOOL_CACHE: EnvVar = EnvVar::new("RUNNER_TOOL_CACHE");
pub const RUNNER_DEBUG: EnvVar = EnvVar::new("RUNNER_DEBUG");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forms() {
        assert_eq!(GITHUB_SHA.name(), "GITHUB_SHA");
        assert_eq!(GITHUB_SHA.expr(), "env.GITHUB_SHA");
        assert_eq!(GITHUB_SHA.shell(), "$GITHUB_SHA");
        assert_eq!(GITHUB_SHA.interpolated(), "${{ env.GITHUB_SHA }}");
        assert_eq!(RUNNER_OS.to_string(), "RUNNER_OS");
    }
}
