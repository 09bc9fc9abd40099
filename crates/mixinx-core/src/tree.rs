use crate::errors::{MixinError, Result};
use crate::model::{Node, NodeId, ResourceType};

/// Path separator between node id segments
pub const PATH_SEPARATOR: char = '/';

/// Child ids consulted, in order, when looking up a node's default child
pub const DEFAULT_CHILD_IDS: [&str; 2] = ["Resource", "Default"];

/// In-memory construct tree
///
/// Arena of [`Node`]s addressed by [`NodeId`]. Nodes are only ever added;
/// the whole tree is dropped at the end of a run. Not thread-safe (no
/// Arc/RwLock): callers mutating a tree hold `&mut ConstructTree`, so the
/// borrow checker enforces a single writer.
#[derive(Debug, Clone)]
pub struct ConstructTree {
    pub(crate) nodes: Vec<Node>,
}

impl ConstructTree {
    /// Create a tree containing only a root node
    ///
    /// # Errors
    ///
    /// Returns `InvalidNodeId` if `root_id` is empty or contains `/`.
    pub fn new(root_id: impl Into<String>) -> Result<Self> {
        let root_id = root_id.into();
        validate_id(&root_id)?;
        Ok(Self {
            nodes: vec![Node::new(root_id, None)],
        })
    }

    /// Handle of the root node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether a handle was issued by this tree
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Get a node by handle
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this tree.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or_else(|| MixinError::NodeNotFound {
            node: id.to_string(),
        })
    }

    /// Get a mutable node by handle
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle was not issued by this tree.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or_else(|| MixinError::NodeNotFound {
            node: id.to_string(),
        })
    }

    /// Attach a plain child node
    ///
    /// # Errors
    ///
    /// * `NodeNotFound` - parent is not in this tree
    /// * `InvalidNodeId` - id is empty or contains `/`
    /// * `DuplicateChildId` - parent already has a child with this id
    pub fn add_child(&mut self, parent: NodeId, id: impl Into<String>) -> Result<NodeId> {
        let id = id.into();
        validate_id(&id)?;

        if self.find_child(parent, &id)?.is_some() {
            return Err(MixinError::DuplicateChildId {
                parent_path: self.path_of(parent)?,
                id,
            });
        }

        let handle = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, Some(parent)));
        self.node_mut(parent)?.children.push(handle);
        Ok(handle)
    }

    /// Attach a low-level resource node
    ///
    /// # Errors
    ///
    /// Same as [`add_child`](Self::add_child).
    pub fn add_resource(
        &mut self,
        parent: NodeId,
        id: impl Into<String>,
        resource_type: ResourceType,
    ) -> Result<NodeId> {
        let handle = self.add_child(parent, id)?;
        self.node_mut(handle)?.resource_type = Some(resource_type);
        Ok(handle)
    }

    /// Find a direct child by local id
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if `parent` is not in this tree.
    pub fn find_child(&self, parent: NodeId, id: &str) -> Result<Option<NodeId>> {
        let parent = self.node(parent)?;
        Ok(parent
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].id == id))
    }

    /// Children of a node in insertion order
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle is not in this tree.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// Parent of a node (`None` for the root)
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle is not in this tree.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Designated default child, if any
    ///
    /// The first child whose id is listed in [`DEFAULT_CHILD_IDS`] wins.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle is not in this tree.
    pub fn default_child(&self, id: NodeId) -> Result<Option<NodeId>> {
        for candidate in DEFAULT_CHILD_IDS {
            if let Some(child) = self.find_child(id, candidate)? {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// Check whether a node is a low-level resource (false for foreign handles)
    pub fn is_cfn_resource(&self, id: NodeId) -> bool {
        self.node(id).map(Node::is_cfn_resource).unwrap_or(false)
    }

    /// Declared resource type of a node, if any
    pub fn resource_type(&self, id: NodeId) -> Option<&ResourceType> {
        self.node(id).ok().and_then(Node::resource_type)
    }

    /// Set a domain property
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle is not in this tree.
    pub fn set_property(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<()> {
        self.node_mut(id)?.properties.insert(key.into(), value);
        Ok(())
    }

    /// Read a domain property (None for foreign handles or unset keys)
    pub fn property(&self, id: NodeId, key: &str) -> Option<&serde_json::Value> {
        self.node(id).ok().and_then(|n| n.property(key))
    }

    /// Declare that `id` must be sequenced after `on`
    ///
    /// Declaring the same dependency twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if either handle is not in this tree.
    pub fn add_dependency(&mut self, id: NodeId, on: NodeId) -> Result<()> {
        self.node(on)?;
        let node = self.node_mut(id)?;
        if !node.dependencies.contains(&on) {
            node.dependencies.push(on);
        }
        Ok(())
    }

    /// Append a value to a node's metadata log
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle is not in this tree.
    pub fn add_metadata(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<()> {
        self.node_mut(id)?.metadata.append(key, value);
        Ok(())
    }

    /// ARN of a node
    ///
    /// An explicit `arn` string property wins; otherwise a deterministic
    /// token derived from the node path is returned.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle is not in this tree.
    pub fn arn_of(&self, id: NodeId) -> Result<String> {
        if let Some(arn) = self.node(id)?.property("arn").and_then(|v| v.as_str()) {
            return Ok(arn.to_string());
        }
        Ok(format!("${{Token[{}.Arn]}}", self.path_of(id)?))
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(MixinError::InvalidNodeId {
            id: id.to_string(),
            reason: "id cannot be empty".to_string(),
        });
    }
    if id.contains(PATH_SEPARATOR) {
        return Err(MixinError::InvalidNodeId {
            id: id.to_string(),
            reason: format!("id cannot contain '{}'", PATH_SEPARATOR),
        });
    }
    Ok(())
}
