//! Attribute name to document key translation

/// Internal attribute names whose document key differs lexically.
///
/// Anything not listed is emitted under its own name.
pub const KEY_TABLE: &[(&str, &str)] = &[
    ("pullRequest", "pull_request"),
    ("workflowDispatch", "workflow_dispatch"),
    ("workflowCall", "workflow_call"),
    ("repositoryDispatch", "repository_dispatch"),
    ("continueOnError", "continue-on-error"),
    ("timeoutMinutes", "timeout-minutes"),
    ("workingDirectory", "working-directory"),
    ("runsOn", "runs-on"),
];

/// Translate an internal attribute name to its document key
pub fn target_key(name: &str) -> &str {
    KEY_TABLE
        .iter()
        .find(|(internal, _)| *internal == name)
        .map(|(_, target)| *target)
        .unwrap_or(name)
}

/// Translated key as a YAML mapping key
pub(crate) fn key(name: &str) -> serde_yaml::Value {
    serde_yaml::Value::String(target_key(name).to_string())
}
