//! Directory-backed workflow store

use crate::core::config::OutputConfig;
use crate::core::SynthError;
use crate::persistence::WorkflowStore;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes workflow files into a directory, creating it when absent
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the configured output directory
    pub fn from_env() -> Self {
        Self::from_config(&OutputConfig::from_env())
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl WorkflowStore for DirectoryStore {
    fn save(&self, file_name: &str, content: &str) -> Result<PathBuf, SynthError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| SynthError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;

        let path = self.dir.join(file_name);
        debug!(path = %path.display(), bytes = content.len(), "writing workflow file");
        std::fs::write(&path, content).map_err(|source| SynthError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(path)
    }
}
