use std::cell::{Cell, RefCell};

use mixinx_core::{ConstructTree, Mixin, MixinError, MixinTag, NodeId, ResourceType, Result};
use serde_json::json;

/// Build `R -> [A -> [C], B]`
#[allow(dead_code)]
pub fn abc_tree() -> (ConstructTree, NodeId, NodeId, NodeId) {
    let mut tree = ConstructTree::new("R").unwrap();
    let a = tree.add_child(tree.root(), "A").unwrap();
    let b = tree.add_child(tree.root(), "B").unwrap();
    let c = tree.add_child(a, "C").unwrap();
    (tree, a, b, c)
}

/// Build a stack with two L2 constructs each wrapping a bucket resource
///
/// `App -> Stack -> [prod-logs -> Resource(CfnBucket), dev-logs -> Resource(CfnBucket)]`
#[allow(dead_code)]
pub fn bucket_stack() -> (ConstructTree, NodeId, Vec<NodeId>) {
    let mut tree = ConstructTree::new("App").unwrap();
    let stack = tree.add_child(tree.root(), "Stack").unwrap();
    let mut resources = Vec::new();
    for name in ["prod-logs", "dev-logs"] {
        let l2 = tree.add_child(stack, name).unwrap();
        let res = tree
            .add_resource(l2, "Resource", ResourceType::new("CfnBucket", "AWS::S3::Bucket"))
            .unwrap();
        resources.push(res);
    }
    (tree, stack, resources)
}

/// Build a tree with exactly `n` nodes as a chain under the root
#[allow(dead_code)]
pub fn chain_tree(n: usize) -> ConstructTree {
    let mut tree = ConstructTree::new("N0").unwrap();
    let mut parent = tree.root();
    for i in 1..n {
        parent = tree.add_child(parent, format!("N{}", i)).unwrap();
    }
    tree
}

/// Mixin that records every call it receives
#[allow(dead_code)]
pub struct CountingMixin {
    tag: MixinTag,
    answer: bool,
    pub supports_calls: Cell<usize>,
    pub applied_to: RefCell<Vec<NodeId>>,
}

#[allow(dead_code)]
impl CountingMixin {
    pub fn new(answer: bool) -> Self {
        Self::with_origin("mixinx_core::testing::CountingMixin", answer)
    }

    pub fn with_origin(origin: &'static str, answer: bool) -> Self {
        Self {
            tag: MixinTag::with_origin(origin),
            answer,
            supports_calls: Cell::new(0),
            applied_to: RefCell::new(Vec::new()),
        }
    }

    pub fn apply_count(&self) -> usize {
        self.applied_to.borrow().len()
    }
}

impl Mixin for CountingMixin {
    fn tag(&self) -> &MixinTag {
        &self.tag
    }

    fn supports(&self, _tree: &ConstructTree, _node: NodeId) -> Result<bool> {
        self.supports_calls.set(self.supports_calls.get() + 1);
        Ok(self.answer)
    }

    fn apply_to(&self, tree: &mut ConstructTree, node: NodeId) -> Result<()> {
        self.applied_to.borrow_mut().push(node);
        tree.set_property(node, "counted", json!(true))
    }
}

/// Mixin that fails `apply_to` on one node id and marks every other node
#[allow(dead_code)]
pub struct FailOn {
    tag: MixinTag,
    pub failing_id: &'static str,
}

#[allow(dead_code)]
impl FailOn {
    pub fn new(failing_id: &'static str) -> Self {
        Self {
            tag: MixinTag::with_origin("mixinx_core::testing::FailOn"),
            failing_id,
        }
    }
}

impl Mixin for FailOn {
    fn tag(&self) -> &MixinTag {
        &self.tag
    }

    fn apply_to(&self, tree: &mut ConstructTree, node: NodeId) -> Result<()> {
        if tree.node(node)?.id() == self.failing_id {
            return Err(MixinError::mixin(format!("refusing {}", self.failing_id)));
        }
        tree.set_property(node, "visited", json!(true))
    }
}

/// Mixin that supports only resource nodes and attaches a child to them
#[allow(dead_code)]
pub struct AttachChild {
    tag: MixinTag,
}

#[allow(dead_code)]
impl AttachChild {
    pub fn new() -> Self {
        Self {
            tag: MixinTag::with_origin("mixinx_core::testing::AttachChild"),
        }
    }
}

impl Mixin for AttachChild {
    fn tag(&self) -> &MixinTag {
        &self.tag
    }

    fn supports(&self, tree: &ConstructTree, node: NodeId) -> Result<bool> {
        Ok(tree.is_cfn_resource(node))
    }

    fn apply_to(&self, tree: &mut ConstructTree, node: NodeId) -> Result<()> {
        tree.add_child(node, "Attached").map(|_| ())
    }
}
