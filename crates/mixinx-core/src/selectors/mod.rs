//! Construct selectors
//!
//! A selector is a pure function from a scope node to an ordered list of
//! nodes. Selectors hold no node handles and never mutate the tree, so one
//! selector can be evaluated any number of times against any tree.
//!
//! Built-in kinds are created through [`ConstructSelector`]:
//!
//! ```
//! use mixinx_core::selectors::{ConstructSelector, Selector};
//! use mixinx_core::tree::ConstructTree;
//!
//! let mut tree = ConstructTree::new("Stack").unwrap();
//! let prod = tree.add_child(tree.root(), "prod-bucket").unwrap();
//! tree.add_child(tree.root(), "dev-bucket").unwrap();
//!
//! let selector = ConstructSelector::by_id("*prod*").unwrap();
//! assert_eq!(selector.select(&tree, tree.root()), vec![prod]);
//! ```

pub mod glob;

use std::collections::HashSet;
use std::fmt;

use crate::errors::Result;
use crate::model::NodeId;
use crate::tree::ConstructTree;

pub use glob::{Glob, GlobMode};

/// Selector trait: scope -> ordered candidate nodes
///
/// Implementations must be deterministic for a fixed tree snapshot. A scope
/// that is not part of `tree` selects nothing.
pub trait Selector: fmt::Debug {
    fn select(&self, tree: &ConstructTree, scope: NodeId) -> Vec<NodeId>;
}

impl<S: Selector + ?Sized> Selector for Box<S> {
    fn select(&self, tree: &ConstructTree, scope: NodeId) -> Vec<NodeId> {
        (**self).select(tree, scope)
    }
}

/// Factory for the built-in selector kinds
pub struct ConstructSelector;

impl ConstructSelector {
    /// Every node under scope, scope included, depth-first pre-order
    pub fn all() -> Box<dyn Selector> {
        Box::new(AllSelector)
    }

    /// Resource nodes whose type alias or wire-format name equals `type_name`
    pub fn resources_of_type(type_name: impl Into<String>) -> Box<dyn Selector> {
        Box::new(ResourcesOfTypeSelector {
            type_name: type_name.into(),
        })
    }

    /// Nodes whose local id matches an id glob
    ///
    /// # Errors
    ///
    /// Returns `InvalidGlob` for malformed patterns.
    pub fn by_id(pattern: &str) -> Result<Box<dyn Selector>> {
        Ok(Box::new(ByIdSelector {
            glob: Glob::id(pattern)?,
        }))
    }

    /// Nodes whose full path matches a path glob
    ///
    /// # Errors
    ///
    /// Returns `InvalidGlob` for malformed patterns.
    pub fn by_path(pattern: &str) -> Result<Box<dyn Selector>> {
        Ok(Box::new(ByPathSelector {
            glob: Glob::path(pattern)?,
        }))
    }

    /// The scope if it is a resource, else its default child if that is one
    pub fn cfn_resource() -> Box<dyn Selector> {
        Box::new(CfnResourceSelector)
    }

    /// Exactly the scope node
    pub fn only_itself() -> Box<dyn Selector> {
        Box::new(OnlyItselfSelector)
    }

    /// Nodes selected by either side: `left` order, then unseen `right` nodes
    pub fn union(left: Box<dyn Selector>, right: Box<dyn Selector>) -> Box<dyn Selector> {
        Box::new(UnionSelector { left, right })
    }

    /// Nodes selected by both sides, in `left` order
    pub fn intersect(left: Box<dyn Selector>, right: Box<dyn Selector>) -> Box<dyn Selector> {
        Box::new(IntersectSelector { left, right })
    }

    /// Wrap an arbitrary selection function
    pub fn custom<F>(name: impl Into<String>, f: F) -> Box<dyn Selector>
    where
        F: Fn(&ConstructTree, NodeId) -> Vec<NodeId> + 'static,
    {
        Box::new(FnSelector {
            name: name.into(),
            f,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllSelector;

impl Selector for AllSelector {
    fn select(&self, tree: &ConstructTree, scope: NodeId) -> Vec<NodeId> {
        tree.find_all(scope).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ResourcesOfTypeSelector {
    type_name: String,
}

impl Selector for ResourcesOfTypeSelector {
    fn select(&self, tree: &ConstructTree, scope: NodeId) -> Vec<NodeId> {
        filter_all(tree, scope, |id| {
            tree.resource_type(id)
                .is_some_and(|ty| ty.matches(&self.type_name))
        })
    }
}

#[derive(Debug, Clone)]
pub struct ByIdSelector {
    glob: Glob,
}

impl Selector for ByIdSelector {
    fn select(&self, tree: &ConstructTree, scope: NodeId) -> Vec<NodeId> {
        filter_all(tree, scope, |id| {
            tree.node(id).is_ok_and(|node| self.glob.is_match(node.id()))
        })
    }
}

#[derive(Debug, Clone)]
pub struct ByPathSelector {
    glob: Glob,
}

impl Selector for ByPathSelector {
    fn select(&self, tree: &ConstructTree, scope: NodeId) -> Vec<NodeId> {
        filter_all(tree, scope, |id| {
            tree.path_of(id).is_ok_and(|path| self.glob.is_match(&path))
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CfnResourceSelector;

impl Selector for CfnResourceSelector {
    fn select(&self, tree: &ConstructTree, scope: NodeId) -> Vec<NodeId> {
        if tree.is_cfn_resource(scope) {
            return vec![scope];
        }
        match tree.default_child(scope) {
            Ok(Some(child)) if tree.is_cfn_resource(child) => vec![child],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OnlyItselfSelector;

impl Selector for OnlyItselfSelector {
    fn select(&self, tree: &ConstructTree, scope: NodeId) -> Vec<NodeId> {
        if tree.contains(scope) {
            vec![scope]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug)]
pub struct UnionSelector {
    left: Box<dyn Selector>,
    right: Box<dyn Selector>,
}

impl Selector for UnionSelector {
    fn select(&self, tree: &ConstructTree, scope: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.left
            .select(tree, scope)
            .into_iter()
            .chain(self.right.select(tree, scope))
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

#[derive(Debug)]
pub struct IntersectSelector {
    left: Box<dyn Selector>,
    right: Box<dyn Selector>,
}

impl Selector for IntersectSelector {
    fn select(&self, tree: &ConstructTree, scope: NodeId) -> Vec<NodeId> {
        let right: HashSet<NodeId> = self.right.select(tree, scope).into_iter().collect();
        self.left
            .select(tree, scope)
            .into_iter()
            .filter(|id| right.contains(id))
            .collect()
    }
}

pub struct FnSelector<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnSelector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSelector")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> Selector for FnSelector<F>
where
    F: Fn(&ConstructTree, NodeId) -> Vec<NodeId>,
{
    fn select(&self, tree: &ConstructTree, scope: NodeId) -> Vec<NodeId> {
        (self.f)(tree, scope)
    }
}

fn filter_all<P>(tree: &ConstructTree, scope: NodeId, predicate: P) -> Vec<NodeId>
where
    P: Fn(NodeId) -> bool,
{
    AllSelector
        .select(tree, scope)
        .into_iter()
        .filter(|id| predicate(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceType;

    /// Root -> [A -> [C], B]
    fn sample_tree() -> (ConstructTree, NodeId, NodeId, NodeId) {
        let mut tree = ConstructTree::new("R").unwrap();
        let a = tree.add_child(tree.root(), "A").unwrap();
        let b = tree.add_child(tree.root(), "B").unwrap();
        let c = tree.add_child(a, "C").unwrap();
        (tree, a, b, c)
    }

    #[test]
    fn test_by_path_double_star_excludes_anchor() {
        let (tree, _a, _b, c) = sample_tree();
        let selected = ConstructSelector::by_path("*/A/**")
            .unwrap()
            .select(&tree, tree.root());
        assert_eq!(selected, vec![c]);
    }

    #[test]
    fn test_only_itself_ignores_descendants() {
        let (tree, a, _b, _c) = sample_tree();
        assert_eq!(ConstructSelector::only_itself().select(&tree, a), vec![a]);
    }

    #[test]
    fn test_cfn_resource_falls_back_to_default_child() {
        let mut tree = ConstructTree::new("Stack").unwrap();
        let l2 = tree.add_child(tree.root(), "L2Bucket").unwrap();
        let inner = tree
            .add_resource(l2, "Resource", ResourceType::new("CfnBucket", "AWS::S3::Bucket"))
            .unwrap();

        let selector = ConstructSelector::cfn_resource();
        assert_eq!(selector.select(&tree, l2), vec![inner]);
        assert_eq!(selector.select(&tree, inner), vec![inner]);
        assert!(selector.select(&tree, tree.root()).is_empty());
    }

    #[test]
    fn test_union_and_intersect_keep_left_order() {
        let (tree, a, b, c) = sample_tree();

        let union = ConstructSelector::union(
            ConstructSelector::by_id("B").unwrap(),
            ConstructSelector::by_id("*").unwrap(),
        );
        assert_eq!(union.select(&tree, tree.root()), vec![b, tree.root(), a, c]);

        let intersect = ConstructSelector::intersect(
            ConstructSelector::all(),
            ConstructSelector::by_path("R/*").unwrap(),
        );
        assert_eq!(intersect.select(&tree, tree.root()), vec![a, b]);
    }

    #[test]
    fn test_custom_selector() {
        let (tree, a, b, _c) = sample_tree();
        let children = ConstructSelector::custom("children", |tree, scope| {
            tree.children(scope).map(<[NodeId]>::to_vec).unwrap_or_default()
        });
        assert_eq!(children.select(&tree, tree.root()), vec![a, b]);
        assert!(format!("{:?}", children).contains("children"));
    }

    #[test]
    fn test_foreign_scope_selects_nothing() {
        let (tree, ..) = sample_tree();
        let foreign = NodeId(99);
        assert!(ConstructSelector::all().select(&tree, foreign).is_empty());
        assert!(ConstructSelector::only_itself()
            .select(&tree, foreign)
            .is_empty());
    }
}
