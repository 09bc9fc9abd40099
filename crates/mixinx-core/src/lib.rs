//! MixinX Core - construct-tree mixin application engine
//!
//! This crate provides:
//! - An in-memory construct tree (arena of nodes addressed by `NodeId`)
//! - Deterministic traversals (root chain, depth-first pre-order)
//! - Selectors choosing which nodes a mixin is offered to
//! - The mixin contract and the applicator that drives it
//! - Provenance metadata recording with a trusted-origin allow-list
//! - Deterministic node-derived names
//! - A structured logging facility

pub mod applicator;
pub mod errors;
pub mod logging_facility;
pub mod mixin;
pub mod model;
pub mod names;
pub mod provenance;
pub mod selectors;
pub mod traversal;
pub mod tree;

// Re-export commonly used types
pub use applicator::{ApplyReport, MixinApplicator, Mixins};
pub use errors::{ExError, ExErrorKind, MixinError, Result};
pub use mixin::{is_mixin, Mixin, MixinTag};
pub use model::{Metadata, Node, NodeId, ResourceType};
pub use provenance::{recorded_mixins, MetadataRecord, ProvenanceRecorder};
pub use selectors::{ConstructSelector, Selector};
pub use tree::ConstructTree;
