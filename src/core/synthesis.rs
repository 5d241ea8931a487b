//! Synthesis: construct tree to an ordered YAML document
//!
//! Synthesis is a pure function of tree state. It assumes the tree has
//! already been validated and does not re-check any rule.

use crate::core::construct::{NodeId, Tree};
use crate::core::keys;
use crate::core::pipeline::Construct;
use crate::core::value::{self, ValueMap};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Banner written at the top of every generated file
pub const HEADER: &str = "# this file was generated by a tool. DO NOT EDIT";

/// Ordered field writer that translates attribute names through the key table
/// and omits absent or empty attributes.
#[derive(Debug, Default)]
pub(crate) struct Fields(Mapping);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.0.insert(keys::key(name), value.into());
    }

    pub fn opt<T: Into<Value>>(&mut self, name: &str, value: Option<T>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    pub fn list(&mut self, name: &str, items: &[String]) {
        if !items.is_empty() {
            self.insert(name, items.to_vec());
        }
    }

    pub fn map(&mut self, name: &str, map: &ValueMap) {
        if !map.is_empty() {
            self.insert(name, value::to_mapping(map));
        }
    }

    pub fn serialize<T: Serialize>(&mut self, name: &str, value: &Option<T>) -> Result<(), serde_yaml::Error> {
        if let Some(value) = value {
            self.insert(name, serde_yaml::to_value(value)?);
        }
        Ok(())
    }

    pub fn serialize_map<K, V>(&mut self, name: &str, map: &indexmap::IndexMap<K, V>) -> Result<(), serde_yaml::Error>
    where
        K: Serialize,
        V: Serialize,
    {
        if !map.is_empty() {
            self.insert(name, serde_yaml::to_value(map)?);
        }
        Ok(())
    }

    /// Pass-through attributes, after the known ones; never replaces a known key
    pub fn extra(&mut self, extra: &indexmap::IndexMap<String, Value>) {
        for (name, value) in extra {
            let key = keys::key(name);
            if !self.0.contains_key(&key) {
                self.0.insert(key, value.clone());
            }
        }
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.0)
    }
}

/// Synthesize `node` and everything under it.
///
/// Children are rendered in insertion order. Jobs are keyed by their declared
/// identifier, falling back to the construct id for undeclared jobs.
pub fn synthesize(tree: &Tree<Construct>, node: NodeId) -> Result<Value, serde_yaml::Error> {
    let Some(payload) = tree.payload(node) else {
        return Ok(Value::Null);
    };

    match payload {
        Construct::Step(step) => Ok(step.synthesize()),
        Construct::Job(job) => {
            let steps = tree
                .children(node)
                .iter()
                .filter(|child| matches!(tree.payload(**child), Some(Construct::Step(_))))
                .map(|child| synthesize(tree, *child))
                .collect::<Result<Vec<_>, _>>()?;
            job.synthesize(steps)
        }
        Construct::Workflow(workflow) => {
            let mut jobs = Mapping::new();
            for child in tree.children(node) {
                if !matches!(tree.payload(*child), Some(Construct::Job(_))) {
                    continue;
                }
                let id = workflow.registry.effective_id(tree, *child);
                debug!(job = %id, "synthesizing job");
                jobs.insert(Value::String(id.to_string()), synthesize(tree, *child)?);
            }
            workflow.props.synthesize(jobs)
        }
    }
}

/// Render a synthesized document as YAML text with the generated-file banner
pub fn emit(document: &Value) -> Result<String, serde_yaml::Error> {
    let body = serde_yaml::to_string(document)?;
    Ok(format!("{}\n\n{}", HEADER, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_translate_and_omit() {
        let mut fields = Fields::new();
        fields.opt::<String>("name", None);
        fields.opt("continueOnError", Some(true));
        fields.list("needs", &[]);
        fields.map("env", &ValueMap::new());
        fields.insert("custom_key", "kept");

        let mut extra = indexmap::IndexMap::new();
        extra.insert("custom_key".to_string(), Value::from("ignored"));
        extra.insert("environment".to_string(), Value::from("production"));
        fields.extra(&extra);

        let value = fields.into_value();
        let mapping = value.as_mapping().unwrap();
        assert_eq!(mapping.len(), 3);
        assert_eq!(value["continue-on-error"], Value::Bool(true));
        assert_eq!(value["custom_key"].as_str(), Some("kept"));
        assert_eq!(value["environment"].as_str(), Some("production"));
    }

    #[test]
    fn test_emit_prepends_header() {
        let document: Value = serde_yaml::from_str("name: CI").unwrap();
        let text = emit(&document).unwrap();
        assert_eq!(text, "# this file was generated by a tool. DO NOT EDIT\n\nname: CI\n");
    }
}
