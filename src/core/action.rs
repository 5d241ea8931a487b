//! Reusable action references (`owner/name@version`)

use crate::core::error::FormatError;
use std::fmt;
use std::str::FromStr;

/// An immutable reference to a published action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionRef {
    owner: String,
    name: String,
    version: Option<String>,
}

impl ActionRef {
    /// Create a reference from its parts
    pub fn new(owner: impl Into<String>, name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            version: version.map(str::to_string),
        }
    }

    /// Create a reference pinned to a version
    pub fn pinned(owner: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// Parse `owner/name` or `owner/name@version`.
    ///
    /// The version is split off at the last `@`; the remainder must contain
    /// exactly one `/` with non-empty text on both sides.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        let error = || FormatError { input: s.to_string() };

        let (path, version) = match s.rsplit_once('@') {
            Some((path, version)) if !version.is_empty() => (path, Some(version)),
            Some(_) => return Err(error()),
            None => (s, None),
        };

        let mut parts = path.split('/');
        let (owner, name) = match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => (owner, name),
            _ => return Err(error()),
        };

        Ok(Self::new(owner, name, version))
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl fmt::Display for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}/{}@{}", self.owner, self.name, version),
            None => write!(f, "{}/{}", self.owner, self.name),
        }
    }
}

impl FromStr for ActionRef {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_version() {
        let action = ActionRef::parse("actions/checkout@v5").unwrap();
        assert_eq!(action.owner(), "actions");
        assert_eq!(action.name(), "checkout");
        assert_eq!(action.version(), Some("v5"));
    }

    #[test]
    fn test_parse_without_version() {
        let action = ActionRef::parse("actions/cache").unwrap();
        assert_eq!(action.version(), None);
        assert_eq!(action.to_string(), "actions/cache");
    }

    #[test]
    fn test_version_split_on_last_at() {
        let action = ActionRef::parse("octo/tool@feature@x").unwrap();
        assert_eq!(action.owner(), "octo");
        assert_eq!(action.name(), "tool@feature");
        assert_eq!(action.version(), Some("x"));
        assert_eq!(action.to_string(), "octo/tool@feature@x");
    }

    #[test]
    fn test_round_trip() {
        for s in [
            "actions/checkout@v5",
            "actions/setup-node@v4.1.0",
            "docker/build-push-action",
            "owner/name@8f4b7f84864484a7bf31766abe9204da3cbe65b3",
        ] {
            assert_eq!(ActionRef::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_rejects_malformed() {
        for s in ["checkout", "a/b/c", "/name", "owner/", "owner/name@", ""] {
            assert!(ActionRef::parse(s).is_err(), "{s} should not parse");
        }
    }

    #[test]
    fn test_from_str() {
        let action: ActionRef = "actions/upload-artifact@v4".parse().unwrap();
        assert_eq!(action, ActionRef::pinned("actions", "upload-artifact", "v4"));
    }
}
