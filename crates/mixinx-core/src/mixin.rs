//! Mixin contract
//!
//! A mixin is a reusable unit of cross-cutting configuration. It owns no
//! node: the applicator asks it whether it [`supports`](Mixin::supports) a
//! node and, only if so, lets it [`apply_to`](Mixin::apply_to) that node.
//!
//! Every mixin carries a [`MixinTag`] stamped at construction. The tag names
//! the mixin's origin for provenance and is the marker [`is_mixin`] looks
//! for on type-erased values.

use std::any::Any;
use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use crate::errors::Result;
use crate::model::NodeId;
use crate::tree::ConstructTree;

/// Construction-time marker carried by every mixin
///
/// The field is private: the only way to obtain a tag is through
/// [`MixinTag::of`] or [`MixinTag::with_origin`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MixinTag {
    origin: Cow<'static, str>,
}

impl MixinTag {
    /// Tag whose origin is the Rust type path of `T`
    ///
    /// Generic arguments are dropped so the origin only names the crate that
    /// defines the mixin type.
    pub fn of<T: ?Sized>() -> Self {
        let name = std::any::type_name::<T>();
        let base = name.split('<').next().unwrap_or(name);
        Self {
            origin: Cow::Borrowed(base),
        }
    }

    /// Tag with an explicitly declared origin
    pub fn with_origin(origin: impl Into<Cow<'static, str>>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// Declared origin identity (unfiltered)
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// Capability interface implemented by every mixin
///
/// # Example
///
/// ```
/// use mixinx_core::mixin::{Mixin, MixinTag};
/// use mixinx_core::model::NodeId;
/// use mixinx_core::tree::ConstructTree;
/// use mixinx_core::Result;
/// use serde_json::json;
///
/// struct Versioned {
///     tag: MixinTag,
/// }
///
/// impl Versioned {
///     fn new() -> Self {
///         Self { tag: MixinTag::of::<Self>() }
///     }
/// }
///
/// impl Mixin for Versioned {
///     fn tag(&self) -> &MixinTag {
///         &self.tag
///     }
///
///     fn supports(&self, tree: &ConstructTree, node: NodeId) -> Result<bool> {
///         Ok(tree.is_cfn_resource(node))
///     }
///
///     fn apply_to(&self, tree: &mut ConstructTree, node: NodeId) -> Result<()> {
///         tree.set_property(node, "versioning", json!("Enabled"))
///     }
/// }
/// ```
pub trait Mixin {
    /// Marker stamped at construction
    fn tag(&self) -> &MixinTag;

    /// Whether this mixin can be applied to `node`
    ///
    /// Must be a pure predicate: calling it twice without an intervening
    /// mutation returns the same answer. Check capabilities (resource type,
    /// properties, default child) rather than exact identity.
    ///
    /// # Errors
    ///
    /// An error aborts the whole apply call.
    fn supports(&self, tree: &ConstructTree, node: NodeId) -> Result<bool> {
        let _ = (tree, node);
        Ok(true)
    }

    /// Mutate `node`; only called after `supports` returned true
    ///
    /// May attach child nodes, set domain properties and declare
    /// dependencies. Metadata is recorded by the engine, not here.
    ///
    /// # Errors
    ///
    /// An error aborts the whole apply call; mutations already made stay.
    fn apply_to(&self, tree: &mut ConstructTree, node: NodeId) -> Result<()>;
}

impl<M: Mixin + ?Sized> Mixin for Box<M> {
    fn tag(&self) -> &MixinTag {
        (**self).tag()
    }

    fn supports(&self, tree: &ConstructTree, node: NodeId) -> Result<bool> {
        (**self).supports(tree, node)
    }

    fn apply_to(&self, tree: &mut ConstructTree, node: NodeId) -> Result<()> {
        (**self).apply_to(tree, node)
    }
}

impl<M: Mixin + ?Sized> Mixin for Arc<M> {
    fn tag(&self) -> &MixinTag {
        (**self).tag()
    }

    fn supports(&self, tree: &ConstructTree, node: NodeId) -> Result<bool> {
        (**self).supports(tree, node)
    }

    fn apply_to(&self, tree: &mut ConstructTree, node: NodeId) -> Result<()> {
        (**self).apply_to(tree, node)
    }
}

/// Recover a mixin from a type-erased value
///
/// Recognises the shared and owned trait-object forms a mixin travels in
/// (`Box<dyn Mixin>`, `Arc<dyn Mixin>`, `Rc<dyn Mixin>`).
pub fn as_mixin(candidate: &dyn Any) -> Option<&dyn Mixin> {
    if let Some(m) = candidate.downcast_ref::<Box<dyn Mixin>>() {
        return Some(m.as_ref());
    }
    if let Some(m) = candidate.downcast_ref::<Arc<dyn Mixin>>() {
        return Some(m.as_ref());
    }
    if let Some(m) = candidate.downcast_ref::<Rc<dyn Mixin>>() {
        return Some(m.as_ref());
    }
    None
}

/// Check whether a type-erased value is a genuine tagged mixin
///
/// The marker alone decides, whatever origin the tag declares. Arbitrary
/// values (strings, maps, structs that merely look like mixins) return false.
pub fn is_mixin(candidate: &dyn Any) -> bool {
    as_mixin(candidate).is_some()
}
