use crate::errors::Result;
use crate::model::NodeId;
use crate::tree::ConstructTree;

/// Enumerate a subtree in depth-first pre-order
///
/// The scope node comes first, followed by each child subtree in insertion
/// order. Every reachable node appears exactly once.
///
/// # Errors
/// * `NodeNotFound` - If `scope` is not in this tree
pub fn find_all(tree: &ConstructTree, scope: NodeId) -> Result<Vec<NodeId>> {
    tree.node(scope)?;

    let mut out = Vec::new();
    let mut stack = vec![scope];

    while let Some(id) = stack.pop() {
        out.push(id);
        // Reverse push so the first child is visited first
        stack.extend(tree.node(id)?.children().iter().rev().copied());
    }

    Ok(out)
}

impl ConstructTree {
    /// All nodes of the subtree rooted at `scope`, depth-first pre-order
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle is not in this tree.
    pub fn find_all(&self, scope: NodeId) -> Result<Vec<NodeId>> {
        find_all(self, scope)
    }
}
