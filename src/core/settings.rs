//! Setting blocks shared by workflows and jobs

use crate::core::value::{Value, ValueMap};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default `run` settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultRun {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "workingDirectory")]
    pub working_directory: Option<String>,
}

/// Defaults applied to every `run` step underneath
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<DefaultRun>,
}

impl Defaults {
    pub fn shell(shell: impl Into<String>) -> Self {
        Self {
            run: Some(DefaultRun {
                shell: Some(shell.into()),
                working_directory: None,
            }),
        }
    }

    pub fn working_directory(dir: impl Into<String>) -> Self {
        Self {
            run: Some(DefaultRun {
                shell: None,
                working_directory: Some(dir.into()),
            }),
        }
    }
}

/// Concurrency group settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Concurrency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "cancelInProgress")]
    pub cancel_in_progress: Option<bool>,
}

impl Concurrency {
    pub fn group(group: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            cancel_in_progress: None,
        }
    }

    pub fn cancel_in_progress(mut self, cancel: bool) -> Self {
        self.cancel_in_progress = Some(cancel);
        self
    }
}

/// Access level for a token permission scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Access {
    Read,
    Write,
    None,
    /// Any level the provider adds later, written as given
    Other(String),
}

impl From<String> for Access {
    fn from(level: String) -> Self {
        match level.as_str() {
            "read" => Access::Read,
            "write" => Access::Write,
            "none" => Access::None,
            _ => Access::Other(level),
        }
    }
}

impl From<Access> for String {
    fn from(access: Access) -> Self {
        match access {
            Access::Read => "read".to_string(),
            Access::Write => "write".to_string(),
            Access::None => "none".to_string(),
            Access::Other(level) => level,
        }
    }
}

/// Token permissions: a blanket level such as `read-all`, or per-scope levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Permissions {
    All(String),
    Scopes(IndexMap<String, Access>),
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::Scopes(IndexMap::new())
    }
}

impl Permissions {
    pub fn read_all() -> Self {
        Permissions::All("read-all".to_string())
    }

    pub fn write_all() -> Self {
        Permissions::All("write-all".to_string())
    }

    /// No scopes listed; blanket levels are never empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Permissions::Scopes(scopes) if scopes.is_empty())
    }

    /// Set one scope. A blanket level is replaced by the scope list.
    pub fn insert(&mut self, scope: impl Into<String>, access: Access) {
        match self {
            Permissions::Scopes(scopes) => {
                scopes.insert(scope.into(), access);
            }
            Permissions::All(_) => {
                *self = Permissions::Scopes(IndexMap::from([(scope.into(), access)]));
            }
        }
    }

    pub fn to_value(&self) -> Result<Option<serde_yaml::Value>, serde_yaml::Error> {
        if self.is_empty() {
            return Ok(None);
        }
        serde_yaml::to_value(self).map(Some)
    }
}

/// Matrix axes plus include/exclude entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    #[serde(flatten)]
    pub axes: IndexMap<String, Vec<Value>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<ValueMap>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<ValueMap>,
}

impl Matrix {
    pub fn axis<K, V, I>(mut self, name: K, values: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        self.axes
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }
}

/// Matrix build strategy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Strategy {
    pub matrix: Matrix,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "failFast")]
    pub fail_fast: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "maxParallel")]
    pub max_parallel: Option<u32>,
}

impl Strategy {
    pub fn matrix(matrix: Matrix) -> Self {
        Self {
            matrix,
            ..Self::default()
        }
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = Some(fail_fast);
        self
    }

    pub fn max_parallel(mut self, max: u32) -> Self {
        self.max_parallel = Some(max);
        self
    }
}

/// Registry credentials for a container image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Container a job runs in, or a service container alongside it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub env: ValueMap,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl Container {
    pub fn image(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }

    pub fn port(mut self, port: impl Into<Value>) -> Self {
        self.ports.push(port.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }
}
