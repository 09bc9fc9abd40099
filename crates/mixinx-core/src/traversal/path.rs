use crate::errors::{MixinError, Result};
use crate::model::NodeId;
use crate::tree::{ConstructTree, PATH_SEPARATOR};

/// Compute the chain of nodes from the root down to `node`
///
/// Follows parent pointers upward and then reverses to get root-to-node
/// order. The chain always starts with the tree root and ends with `node`.
///
/// # Errors
/// * `NodeNotFound` - If `node` is not in this tree
/// * `Internal` - If the parent chain is longer than the tree (cycle)
pub fn compute_chain(tree: &ConstructTree, node: NodeId) -> Result<Vec<NodeId>> {
    tree.node(node)?;

    let mut chain = Vec::new();
    let mut current = Some(node);

    while let Some(id) = current {
        if chain.len() > tree.len() {
            return Err(MixinError::Internal {
                message: format!("parent chain of {} does not terminate", node),
            });
        }
        chain.push(id);
        current = tree.node(id)?.parent();
    }

    chain.reverse();

    Ok(chain)
}

/// Full path of a node: ancestor ids, root included, joined by `/`
///
/// # Errors
/// * `NodeNotFound` - If `node` is not in this tree
pub fn path_of(tree: &ConstructTree, node: NodeId) -> Result<String> {
    let chain = compute_chain(tree, node)?;
    let segments = chain
        .iter()
        .map(|id| tree.node(*id).map(|n| n.id()))
        .collect::<Result<Vec<_>>>()?;
    Ok(segments.join(&PATH_SEPARATOR.to_string()))
}

impl ConstructTree {
    /// Full `/`-joined path of a node
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle is not in this tree.
    pub fn path_of(&self, node: NodeId) -> Result<String> {
        path_of(self, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_of_root_is_single_element() {
        let tree = ConstructTree::new("Root").unwrap();

        let chain = compute_chain(&tree, tree.root()).unwrap();

        assert_eq!(chain, vec![tree.root()]);
        assert_eq!(path_of(&tree, tree.root()).unwrap(), "Root");
    }

    #[test]
    fn test_chain_is_root_to_node_order() {
        let mut tree = ConstructTree::new("Root").unwrap();
        let a = tree.add_child(tree.root(), "A").unwrap();
        let b = tree.add_child(a, "B").unwrap();
        let c = tree.add_child(b, "C").unwrap();

        assert_eq!(compute_chain(&tree, c).unwrap(), vec![tree.root(), a, b, c]);
        assert_eq!(tree.path_of(c).unwrap(), "Root/A/B/C");
    }

    #[test]
    fn test_chain_of_foreign_handle_fails() {
        let tree = ConstructTree::new("Root").unwrap();
        let result = compute_chain(&tree, NodeId(42));
        assert!(matches!(result, Err(MixinError::NodeNotFound { .. })));
    }
}
