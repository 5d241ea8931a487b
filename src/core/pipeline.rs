//! Pipeline (workflow) root and the construct tree it owns

use crate::core::construct::{NodeId, Tree};
use crate::core::error::{StructuralError, SynthError, ValidationError};
use crate::core::job::Job;
use crate::core::settings::{Access, Concurrency, Defaults, Permissions};
use crate::core::step::Step;
use crate::core::synthesis::{self, Fields};
use crate::core::trigger::Triggers;
use crate::core::validation;
use crate::core::value::{Value, ValueMap};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Payload of a construct tree node
#[derive(Debug)]
pub enum Construct {
    Workflow(Workflow),
    Job(Job),
    Step(Step),
}

impl Construct {
    pub fn kind(&self) -> &'static str {
        match self {
            Construct::Workflow(_) => "workflow",
            Construct::Job(_) => "job",
            Construct::Step(_) => "step",
        }
    }
}

/// Handle to a job in a [`Pipeline`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(NodeId);

impl JobId {
    pub fn node(self) -> NodeId {
        self.0
    }
}

/// Handle to a step in a [`Pipeline`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(NodeId);

impl StepId {
    pub fn node(self) -> NodeId {
        self.0
    }
}

/// Workflow-level attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineProps {
    pub name: String,
    pub on: Triggers,
    pub env: ValueMap,
    pub defaults: Option<Defaults>,
    pub permissions: Permissions,
    pub concurrency: Option<Concurrency>,
}

impl PipelineProps {
    pub fn new(name: impl Into<String>, on: Triggers) -> Self {
        Self {
            name: name.into(),
            on,
            ..Self::default()
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Some(defaults);
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

    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    pub(crate) fn synthesize(&self, jobs: serde_yaml::Mapping) -> Result<serde_yaml::Value, serde_yaml::Error> {
        let mut fields = Fields::new();
        fields.insert("name", self.name.clone());
        fields.insert("on", self.on.synthesize()?);
        fields.map("env", &self.env);
        fields.serialize("defaults", &self.defaults)?;
        fields.serialize("permissions", &self.permissions.to_value()?)?;
        fields.serialize("concurrency", &self.concurrency)?;
        fields.insert("jobs", jobs);
        Ok(fields.into_value())
    }
}

/// Declared job identifiers, indexed both ways.
///
/// The first job declared under an identifier keeps it for lookups; later
/// ones still map back to it and surface as duplicates at validation.
#[derive(Debug, Default)]
pub struct JobRegistry {
    by_id: HashMap<String, NodeId>,
    by_node: HashMap<NodeId, String>,
}

impl JobRegistry {
    fn declare(&mut self, declared: String, node: NodeId) {
        self.by_id.entry(declared.clone()).or_insert(node);
        self.by_node.insert(node, declared);
    }

    pub fn declared_id(&self, node: NodeId) -> Option<&str> {
        self.by_node.get(&node).map(String::as_str)
    }

    /// Declared id, or the construct id for a job that was never declared
    pub fn effective_id<'a>(&'a self, tree: &'a Tree<Construct>, node: NodeId) -> &'a str {
        match self.declared_id(node) {
            Some(id) => id,
            None => tree.node(node).map(|n| n.id()).unwrap_or_default(),
        }
    }

    /// Find the sibling job answering to `declared`
    pub fn resolve(&self, tree: &Tree<Construct>, declared: &str) -> Option<NodeId> {
        if let Some(node) = self.by_id.get(declared) {
            return Some(*node);
        }
        tree.children(tree.root()).iter().copied().find(|child| {
            matches!(tree.payload(*child), Some(Construct::Job(_)))
                && !self.by_node.contains_key(child)
                && tree.node(*child).map(|n| n.id() == declared).unwrap_or(false)
        })
    }
}

/// Root payload: workflow attributes plus the declared-id registry
#[derive(Debug)]
pub struct Workflow {
    pub props: PipelineProps,
    pub registry: JobRegistry,
}

impl Workflow {
    fn validate(&self, tree: &Tree<Construct>, node: NodeId) -> Vec<String> {
        let mut errors = Vec::new();

        if self.props.name.trim().is_empty() {
            errors.push("Workflow name is required".to_string());
        }

        if self.props.on.is_empty() {
            errors.push("Workflow must have at least one trigger".to_string());
        }

        let jobs = job_children(tree, node);
        if jobs.is_empty() {
            errors.push("Workflow must have at least one job".to_string());
        }

        // Declared and undeclared jobs share one key space in the document
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for job in &jobs {
            let id = self.registry.effective_id(tree, *job);
            if !seen.insert(id) && reported.insert(id) {
                errors.push(format!("Duplicate job ID: {}", id));
            }
        }

        errors
    }
}

fn job_children(tree: &Tree<Construct>, node: NodeId) -> Vec<NodeId> {
    tree.children(node)
        .iter()
        .copied()
        .filter(|child| matches!(tree.payload(*child), Some(Construct::Job(_))))
        .collect()
}

fn step_count(tree: &Tree<Construct>, node: NodeId) -> usize {
    tree.children(node)
        .iter()
        .filter(|child| matches!(tree.payload(**child), Some(Construct::Step(_))))
        .count()
}

fn validate_workflow(tree: &Tree<Construct>, node: NodeId) -> Vec<String> {
    match tree.payload(node) {
        Some(Construct::Workflow(workflow)) => workflow.validate(tree, node),
        _ => Vec::new(),
    }
}

fn validate_job(tree: &Tree<Construct>, node: NodeId) -> Vec<String> {
    let Some(Construct::Job(job)) = tree.payload(node) else {
        return Vec::new();
    };
    let Some(Construct::Workflow(workflow)) = tree.scope(node).and_then(|scope| tree.payload(scope)) else {
        return Vec::new();
    };

    let id = workflow.registry.effective_id(tree, node);
    job.validate(id, step_count(tree, node), |need| workflow.registry.resolve(tree, need).is_some())
}

fn validate_step(tree: &Tree<Construct>, node: NodeId) -> Vec<String> {
    match (tree.payload(node), tree.node(node)) {
        (Some(Construct::Step(step)), Ok(n)) => step.validate(n.id()),
        _ => Vec::new(),
    }
}

/// A CI workflow definition and the construct tree underneath it
#[derive(Debug)]
pub struct Pipeline {
    tree: Tree<Construct>,
}

impl Pipeline {
    pub fn new(props: PipelineProps) -> Self {
        let workflow = Workflow {
            props,
            registry: JobRegistry::default(),
        };
        let tree = Tree::new("", Construct::Workflow(workflow)).with_root_validator(validate_workflow);
        Self { tree }
    }

    fn workflow(&self) -> &Workflow {
        match self.tree.payload(self.tree.root()) {
            Some(Construct::Workflow(workflow)) => workflow,
            _ => unreachable!("the root of a pipeline tree is always its workflow"),
        }
    }

    fn workflow_mut(&mut self) -> &mut Workflow {
        let root = self.tree.root();
        match self.tree.payload_mut(root) {
            Some(Construct::Workflow(workflow)) => workflow,
            _ => unreachable!("the root of a pipeline tree is always its workflow"),
        }
    }

    pub fn name(&self) -> &str {
        &self.workflow().props.name
    }

    pub fn props(&self) -> &PipelineProps {
        &self.workflow().props
    }

    pub fn props_mut(&mut self) -> &mut PipelineProps {
        &mut self.workflow_mut().props
    }

    pub fn tree(&self) -> &Tree<Construct> {
        &self.tree
    }

    /// Create a job as the last child of the workflow without declaring it.
    ///
    /// Until [`Pipeline::declare_job`] is called the job is keyed by `id`.
    pub fn construct_job(&mut self, id: impl Into<String>, job: Job) -> JobId {
        JobId(self.tree.construct_at_root(id, Construct::Job(job), validate_job))
    }

    /// Register a job under the identifier it is exposed as in the document
    pub fn declare_job(&mut self, declared: impl Into<String>, job: JobId) -> Result<(), StructuralError> {
        let node = self.tree.node(job.0)?;
        if !matches!(node.payload(), Construct::Job(_)) {
            return Err(StructuralError::InvalidScope {
                expected: "job",
                found: node.payload().kind(),
                id: node.id().to_string(),
            });
        }
        let declared = declared.into();
        if let Some(existing) = self.workflow().registry.declared_id(job.0) {
            return Err(StructuralError::AlreadyDeclared {
                job: node.id().to_string(),
                declared: existing.to_string(),
            });
        }

        debug!(job = %node.id(), declared = %declared, "declaring job");
        self.workflow_mut().registry.declare(declared, job.0);
        Ok(())
    }

    /// Create and declare a job in one go; the construct id is the declared id
    pub fn add_job(&mut self, declared: impl Into<String>, job: Job) -> JobId {
        let declared = declared.into();
        let id = self.construct_job(declared.clone(), job);
        self.workflow_mut().registry.declare(declared, id.0);
        id
    }

    /// Create a step under `scope`, which must be a job of this pipeline
    pub fn construct_step(&mut self, scope: NodeId, id: impl Into<String>, step: Step) -> Result<StepId, StructuralError> {
        let owner = self.tree.node(scope)?;
        if !matches!(owner.payload(), Construct::Job(_)) {
            return Err(StructuralError::InvalidScope {
                expected: "job",
                found: owner.payload().kind(),
                id: owner.id().to_string(),
            });
        }

        let node = self.tree.construct_validated(scope, id, Construct::Step(step), validate_step)?;
        Ok(StepId(node))
    }

    /// Append a step to a job
    pub fn add_step(&mut self, job: JobId, id: impl Into<String>, step: Step) -> Result<StepId, StructuralError> {
        self.construct_step(job.0, id, step)
    }

    /// Jobs in declaration order
    pub fn jobs(&self) -> Vec<JobId> {
        job_children(&self.tree, self.tree.root()).into_iter().map(JobId).collect()
    }

    pub fn job(&self, job: JobId) -> Option<&Job> {
        match self.tree.payload(job.0) {
            Some(Construct::Job(job)) => Some(job),
            _ => None,
        }
    }

    pub fn job_mut(&mut self, job: JobId) -> Option<&mut Job> {
        match self.tree.payload_mut(job.0) {
            Some(Construct::Job(job)) => Some(job),
            _ => None,
        }
    }

    /// Look up a job by its declared identifier
    pub fn find_job(&self, declared: &str) -> Option<JobId> {
        self.workflow().registry.resolve(&self.tree, declared).map(JobId)
    }

    /// Identifier the job is exposed under in the document
    pub fn declared_id(&self, job: JobId) -> &str {
        self.workflow().registry.effective_id(&self.tree, job.0)
    }

    /// Steps of a job in insertion order
    pub fn steps(&self, job: JobId) -> Vec<StepId> {
        self.tree
            .children(job.0)
            .iter()
            .copied()
            .filter(|child| matches!(self.tree.payload(*child), Some(Construct::Step(_))))
            .map(StepId)
            .collect()
    }

    pub fn step(&self, step: StepId) -> Option<&Step> {
        match self.tree.payload(step.0) {
            Some(Construct::Step(step)) => Some(step),
            _ => None,
        }
    }

    pub fn step_mut(&mut self, step: StepId) -> Option<&mut Step> {
        match self.tree.payload_mut(step.0) {
            Some(Construct::Step(step)) => Some(step),
            _ => None,
        }
    }

    /// Every rule violation in the tree; empty when valid
    pub fn validate(&self) -> Vec<String> {
        validation::collect_errors(&self.tree, self.tree.root())
    }

    /// Validate, then render the whole workflow document
    pub fn synthesize(&self) -> Result<serde_yaml::Value, SynthError> {
        ValidationError::check(self.validate())?;
        let document = synthesis::synthesize(&self.tree, self.tree.root())?;
        info!(pipeline = %self.name(), jobs = self.jobs().len(), "synthesized pipeline");
        Ok(document)
    }

    /// Validate and render the workflow as YAML text
    pub fn to_yaml(&self) -> Result<String, SynthError> {
        Ok(synthesis::emit(&self.synthesize()?)?)
    }
}
