//! Error types for tree assembly, validation and synthesis

use thiserror::Error;

/// Raised while assembling the construct tree.
///
/// These indicate a programming error in how the tree was put together and
/// are not meant to be recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("Node {0} does not exist in this construct tree")]
    UnknownNode(usize),

    #[error("Expected a {expected} scope but found a {found} ('{id}')")]
    InvalidScope {
        expected: &'static str,
        found: &'static str,
        id: String,
    },

    #[error("Node {0} belongs to a different construct tree")]
    ForeignNode(usize),

    #[error("Job '{job}' is already declared as '{declared}'")]
    AlreadyDeclared { job: String, declared: String },
}

/// Every rule violation found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation errors:\n{}", .errors.join("\n"))]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl ValidationError {
    /// Wrap the aggregated messages, or `Ok` when there are none.
    pub fn check(errors: Vec<String>) -> Result<(), ValidationError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors })
        }
    }
}

/// A malformed `owner/name@version` action string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid action reference '{input}': expected owner/name or owner/name@version")]
pub struct FormatError {
    pub input: String,
}

/// Errors surfaced by synthesizing and persisting a pipeline.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to emit YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_message() {
        let err = ValidationError::check(vec![
            "Job must have at least one step".to_string(),
            "Step cannot have both uses and run".to_string(),
        ])
        .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Validation errors:\n"));
        assert!(message.contains("Job must have at least one step"));
        assert!(message.contains("Step cannot have both uses and run"));
    }

    #[test]
    fn test_validation_error_check_passes_when_empty() {
        assert!(ValidationError::check(vec![]).is_ok());
    }
}
