//! Writing synthesized workflows out as files

pub mod store;

pub use store::DirectoryStore;

use crate::core::{Pipeline, SynthError};
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{OnceLock, RwLock};
use tracing::info;

/// File name for a pipeline: whitespace runs become `_`, plus `.yml`
pub fn file_name(pipeline_name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static pattern"));
    format!("{}.yml", whitespace.replace_all(pipeline_name, "_"))
}

/// Destination for rendered workflow documents
pub trait WorkflowStore {
    /// Store `content` under `file_name`, returning where it landed
    fn save(&self, file_name: &str, content: &str) -> Result<PathBuf, SynthError>;
}

/// In-memory store (for testing or dry runs)
#[derive(Debug, Default)]
pub struct InMemoryStore {
    files: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<String> {
        self.files
            .read()
            .ok()
            .and_then(|files| files.get(file_name).cloned())
    }

    pub fn len(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WorkflowStore for InMemoryStore {
    fn save(&self, file_name: &str, content: &str) -> Result<PathBuf, SynthError> {
        if let Ok(mut files) = self.files.write() {
            files.insert(file_name.to_string(), content.to_string());
        }
        Ok(PathBuf::from(file_name))
    }
}

/// Validate, synthesize and store a pipeline under its derived file name
pub fn write_pipeline(pipeline: &Pipeline, store: &dyn WorkflowStore) -> Result<PathBuf, SynthError> {
    let content = pipeline.to_yaml()?;
    let path = store.save(&file_name(pipeline.name()), &content)?;
    info!(pipeline = %pipeline.name(), path = %path.display(), "wrote workflow");
    Ok(path)
}

impl Pipeline {
    /// Write this pipeline into the configured output directory
    pub fn synth(&self) -> Result<PathBuf, SynthError> {
        write_pipeline(self, &DirectoryStore::from_env())
    }

    /// Write this pipeline into `dir`
    pub fn synth_to(&self, dir: impl Into<PathBuf>) -> Result<PathBuf, SynthError> {
        write_pipeline(self, &DirectoryStore::new(dir))
    }
}
