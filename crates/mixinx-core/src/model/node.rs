use serde::{Deserialize, Serialize};

use super::metadata::Metadata;

/// Handle to a node inside a [`ConstructTree`](crate::tree::ConstructTree)
///
/// Handles are plain indices: cheap to copy, stable for the lifetime of the
/// tree, and meaningless outside the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declared resource type of a low-level resource node
///
/// `alias` is the short logical name (`CfnBucket`), `type_name` the
/// wire-format type string (`AWS::S3::Bucket`). Selectors match either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceType {
    pub alias: String,
    pub type_name: String,
}

impl ResourceType {
    pub fn new(alias: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            type_name: type_name.into(),
        }
    }

    /// Check whether `name` is this type's alias or wire-format name
    pub fn matches(&self, name: &str) -> bool {
        self.alias == name || self.type_name == name
    }
}

/// Node - one construct in the tree
///
/// A node has a local id segment, a parent back-reference (absent for the
/// root), ordered children, optional resource type, domain properties,
/// explicit ordering dependencies and an append-only metadata log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) id: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) resource_type: Option<ResourceType>,
    pub(crate) properties: serde_json::Map<String, serde_json::Value>,
    pub(crate) dependencies: Vec<NodeId>,
    pub(crate) metadata: Metadata,
}

impl Node {
    pub(crate) fn new(id: String, parent: Option<NodeId>) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            resource_type: None,
            properties: serde_json::Map::new(),
            dependencies: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    /// Local identity segment
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn resource_type(&self) -> Option<&ResourceType> {
        self.resource_type.as_ref()
    }

    /// Check whether this node is a low-level resource
    pub fn is_cfn_resource(&self) -> bool {
        self.resource_type.is_some()
    }

    pub fn properties(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    /// Nodes this node must be sequenced after
    pub fn dependencies(&self) -> &[NodeId] {
        &self.dependencies
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}
