//! Validation aggregation over a construct tree

use crate::core::construct::{NodeId, Tree};
use tracing::debug;

/// Run every validator on every node under `root` and concatenate the results.
///
/// Read-only: the tree is never modified, so this can be called any number
/// of times. An empty list means the tree is valid.
pub fn collect_errors<T>(tree: &Tree<T>, root: NodeId) -> Vec<String> {
    let mut errors = Vec::new();
    let mut pending = vec![root];

    while let Some(node) = pending.pop() {
        let Ok(current) = tree.node(node) else {
            continue;
        };

        for validator in current.validators() {
            errors.extend(validator(tree, node));
        }

        // Reverse so children are visited in insertion order
        pending.extend(current.children().iter().rev().copied());
    }

    debug!(root = %tree.node(root).map(|n| n.id()).unwrap_or_default(), errors = errors.len(), "validated construct tree");
    errors
}
