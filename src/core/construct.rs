//! Construct tree primitive
//!
//! Nodes live in an arena owned by the tree and are addressed by [`NodeId`].
//! Each node has exactly one parent (except the root), an ordered child list
//! and any number of validators. Child order is insertion order and is the
//! order used when the tree is rendered.

use crate::core::error::StructuralError;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TREE: AtomicU64 = AtomicU64::new(1);

/// Handle to a node in a [`Tree`].
///
/// A handle is only valid for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    tree: u64,
    index: usize,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index
    }
}

/// Validation hook attached to a node; receives the tree and its own node
pub type Validator<T> = Box<dyn Fn(&Tree<T>, NodeId) -> Vec<String>>;

/// A single node in the construct tree
pub struct Node<T> {
    id: String,
    scope: Option<NodeId>,
    children: Vec<NodeId>,
    validators: Vec<Validator<T>>,
    payload: T,
}

impl<T> Node<T> {
    /// Construct id, stored verbatim
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Parent node, `None` only for the root
    pub fn scope(&self) -> Option<NodeId> {
        self.scope
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub(crate) fn validators(&self) -> &[Validator<T>] {
        &self.validators
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("scope", &self.scope)
            .field("children", &self.children)
            .field("validators", &self.validators.len())
            .field("payload", &self.payload)
            .finish()
    }
}

/// Arena-backed construct tree with a single root
#[derive(Debug)]
pub struct Tree<T> {
    token: u64,
    nodes: Vec<Node<T>>,
}

impl<T> Tree<T> {
    /// Create a tree holding only a root node
    pub fn new(root_id: impl Into<String>, payload: T) -> Self {
        Self {
            token: NEXT_TREE.fetch_add(1, Ordering::Relaxed),
            nodes: vec![Node {
                id: root_id.into(),
                scope: None,
                children: Vec::new(),
                validators: Vec::new(),
                payload,
            }],
        }
    }

    /// Attach a validator to the root
    pub fn with_root_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Tree<T>, NodeId) -> Vec<String> + 'static,
    {
        self.nodes[0].validators.push(Box::new(validator));
        self
    }

    pub fn root(&self) -> NodeId {
        self.handle(0)
    }

    fn handle(&self, index: usize) -> NodeId {
        NodeId {
            tree: self.token,
            index,
        }
    }

    /// Append a node under `scope`, which has already been checked
    fn insert(&mut self, scope: NodeId, id: String, payload: T, validators: Vec<Validator<T>>) -> NodeId {
        let node = self.handle(self.nodes.len());
        self.nodes.push(Node {
            id,
            scope: Some(scope),
            children: Vec::new(),
            validators,
            payload,
        });
        self.nodes[scope.index].children.push(node);
        node
    }

    /// Create a node as the last child of `scope`
    pub fn construct(
        &mut self,
        scope: NodeId,
        id: impl Into<String>,
        payload: T,
    ) -> Result<NodeId, StructuralError> {
        self.node(scope)?;
        Ok(self.insert(scope, id.into(), payload, Vec::new()))
    }

    /// Create a node under `scope` with its first validator already attached
    pub fn construct_validated<F>(
        &mut self,
        scope: NodeId,
        id: impl Into<String>,
        payload: T,
        validator: F,
    ) -> Result<NodeId, StructuralError>
    where
        F: Fn(&Tree<T>, NodeId) -> Vec<String> + 'static,
    {
        self.node(scope)?;
        Ok(self.insert(scope, id.into(), payload, vec![Box::new(validator)]))
    }

    /// Same as [`Tree::construct_validated`] under the root, which always exists
    pub(crate) fn construct_at_root<F>(&mut self, id: impl Into<String>, payload: T, validator: F) -> NodeId
    where
        F: Fn(&Tree<T>, NodeId) -> Vec<String> + 'static,
    {
        let root = self.root();
        self.insert(root, id.into(), payload, vec![Box::new(validator)])
    }

    /// Attach a validator to a node; a node may carry several
    pub fn add_validator<F>(&mut self, node: NodeId, validator: F) -> Result<(), StructuralError>
    where
        F: Fn(&Tree<T>, NodeId) -> Vec<String> + 'static,
    {
        self.node_mut(node)?.validators.push(Box::new(validator));
        Ok(())
    }

    pub fn node(&self, node: NodeId) -> Result<&Node<T>, StructuralError> {
        if node.tree != self.token {
            return Err(StructuralError::ForeignNode(node.index));
        }
        self.nodes.get(node.index).ok_or(StructuralError::UnknownNode(node.index))
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node<T>, StructuralError> {
        if node.tree != self.token {
            return Err(StructuralError::ForeignNode(node.index));
        }
        self.nodes.get_mut(node.index).ok_or(StructuralError::UnknownNode(node.index))
    }

    pub fn payload(&self, node: NodeId) -> Option<&T> {
        self.node(node).ok().map(|n| &n.payload)
    }

    pub fn payload_mut(&mut self, node: NodeId) -> Option<&mut T> {
        self.node_mut(node).ok().map(|n| &mut n.payload)
    }

    /// Children of `node` in insertion order (empty for unknown nodes)
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn scope(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).ok().and_then(|n| n.scope)
    }

    /// Walk up the scope chain to the root
    pub fn root_of(&self, mut node: NodeId) -> NodeId {
        while let Some(parent) = self.scope(node) {
            node = parent;
        }
        node
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
