//! Mixin applicator
//!
//! Binds a scope node and a selector, then applies mixins to every selected
//! node that supports them. Each [`MixinApplicator::apply`] call:
//!
//! 1. evaluates the selector once and freezes the candidate list,
//! 2. visits mixins in caller order, and for each mixin every candidate in
//!    selector order,
//! 3. calls `apply_to` only where `supports` answered true, then records one
//!    provenance entry on that node.
//!
//! Nothing is rolled back. If a mixin fails, the call stops and mutations
//! made before the failure stay in the tree.
//!
//! ## Logging
//!
//! Emits `start` / `end` / `end_error` events for op `apply_mixins` with
//! `mixin_count`, `candidate_count` and `applied_count` fields.

use std::time::Instant;

use crate::errors::{MixinError, Result};
use crate::mixin::Mixin;
use crate::model::NodeId;
use crate::provenance::{MetadataRecord, ProvenanceRecorder};
use crate::selectors::{ConstructSelector, Selector};
use crate::tree::ConstructTree;
use crate::{log_op_end, log_op_error, log_op_start};

/// Entry point for applying mixins
pub struct Mixins;

impl Mixins {
    /// Bind a scope and selector; `None` selects every node under scope
    ///
    /// # Example
    ///
    /// ```
    /// use mixinx_core::{ConstructSelector, ConstructTree, Mixins};
    ///
    /// let mut tree = ConstructTree::new("App").unwrap();
    /// let scope = tree.root();
    /// let applicator = Mixins::of(scope, Some(ConstructSelector::by_id("*prod*").unwrap()));
    /// assert_eq!(applicator.apply(&mut tree, &[]).unwrap(), scope);
    /// ```
    pub fn of(scope: NodeId, selector: Option<Box<dyn Selector>>) -> MixinApplicator {
        MixinApplicator {
            scope,
            selector: selector.unwrap_or_else(ConstructSelector::all),
            recorder: ProvenanceRecorder::default(),
        }
    }
}

/// Outcome of one apply call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub scope: NodeId,
    /// Size of the frozen candidate list
    pub candidate_count: usize,
    /// One entry per successful application, in application order
    pub records: Vec<MetadataRecord>,
}

/// Scope + selector + provenance recorder
#[derive(Debug)]
pub struct MixinApplicator {
    scope: NodeId,
    selector: Box<dyn Selector>,
    recorder: ProvenanceRecorder,
}

impl MixinApplicator {
    /// Replace the provenance recorder (e.g. with a different allow-list)
    pub fn with_recorder(mut self, recorder: ProvenanceRecorder) -> Self {
        self.recorder = recorder;
        self
    }

    pub fn scope(&self) -> NodeId {
        self.scope
    }

    pub fn recorder(&self) -> &ProvenanceRecorder {
        &self.recorder
    }

    /// Apply `mixins` to the selected nodes; returns the scope for chaining
    ///
    /// # Errors
    ///
    /// * `NodeNotFound` - scope is not part of `tree`
    /// * `SupportCheckFailed` - a `supports` call failed
    /// * `ApplyFailed` - an `apply_to` call failed
    pub fn apply(&self, tree: &mut ConstructTree, mixins: &[&dyn Mixin]) -> Result<NodeId> {
        self.apply_with_report(tree, mixins).map(|report| report.scope)
    }

    /// Apply a single mixin
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn apply_one(&self, tree: &mut ConstructTree, mixin: &dyn Mixin) -> Result<NodeId> {
        self.apply(tree, &[mixin])
    }

    /// Like [`apply`](Self::apply) but returns what happened
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn apply_with_report(
        &self,
        tree: &mut ConstructTree,
        mixins: &[&dyn Mixin],
    ) -> Result<ApplyReport> {
        log_op_start!("apply_mixins", mixin_count = mixins.len() as u64);
        let start = Instant::now();

        let report = self.apply_impl(tree, mixins).map_err(|e| {
            log_op_error!(
                "apply_mixins",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "apply_mixins",
            duration_ms = start.elapsed().as_millis() as u64,
            candidate_count = report.candidate_count as u64,
            applied_count = report.records.len() as u64
        );

        Ok(report)
    }

    fn apply_impl(&self, tree: &mut ConstructTree, mixins: &[&dyn Mixin]) -> Result<ApplyReport> {
        tree.node(self.scope)?;

        // Frozen: nodes attached by mixins below are not visited in this call
        let candidates = self.selector.select(tree, self.scope);
        let mut records = Vec::new();

        for mixin in mixins {
            for &node in &candidates {
                let supported = mixin.supports(tree, node).map_err(|source| {
                    let (mixin_id, node_path) = failure_context(tree, node, *mixin);
                    MixinError::SupportCheckFailed {
                        mixin: mixin_id,
                        node_path,
                        source: Box::new(source),
                    }
                })?;
                if !supported {
                    continue;
                }

                mixin.apply_to(tree, node).map_err(|source| {
                    let (mixin_id, node_path) = failure_context(tree, node, *mixin);
                    MixinError::ApplyFailed {
                        mixin: mixin_id,
                        node_path,
                        source: Box::new(source),
                    }
                })?;

                let record = self.recorder.record(tree, node, *mixin)?;
                tracing::debug!(
                    node = %node,
                    mixin = %record.mixin_identity,
                    "mixin applied"
                );
                records.push(record);
            }
        }

        Ok(ApplyReport {
            scope: self.scope,
            candidate_count: candidates.len(),
            records,
        })
    }
}

/// Mixin identity and node path attached to wrapped failures
fn failure_context(tree: &ConstructTree, node: NodeId, mixin: &dyn Mixin) -> (String, String) {
    let node_path = tree.path_of(node).unwrap_or_else(|_| node.to_string());
    (mixin.tag().origin().to_string(), node_path)
}

impl ConstructTree {
    /// Apply mixins to `node` and all of its descendants
    ///
    /// # Errors
    ///
    /// Same as [`MixinApplicator::apply`].
    pub fn with(&mut self, node: NodeId, mixins: &[&dyn Mixin]) -> Result<NodeId> {
        Mixins::of(node, None).apply(self, mixins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixin::MixinTag;
    use serde_json::json;

    struct Tagger {
        tag: MixinTag,
    }

    impl Tagger {
        fn new() -> Self {
            Self {
                tag: MixinTag::of::<Self>(),
            }
        }
    }

    impl Mixin for Tagger {
        fn tag(&self) -> &MixinTag {
            &self.tag
        }

        fn apply_to(&self, tree: &mut ConstructTree, node: NodeId) -> Result<()> {
            tree.set_property(node, "tagged", json!(true))
        }
    }

    struct Spawner {
        tag: MixinTag,
    }

    impl Mixin for Spawner {
        fn tag(&self) -> &MixinTag {
            &self.tag
        }

        fn apply_to(&self, tree: &mut ConstructTree, node: NodeId) -> Result<()> {
            tree.add_child(node, "Spawned").map(|_| ())
        }
    }

    #[test]
    fn test_apply_returns_scope_and_records() {
        let mut tree = ConstructTree::new("App").unwrap();
        let a = tree.add_child(tree.root(), "A").unwrap();
        let tagger = Tagger::new();

        let report = Mixins::of(tree.root(), None)
            .apply_with_report(&mut tree, &[&tagger])
            .unwrap();

        assert_eq!(report.scope, tree.root());
        assert_eq!(report.candidate_count, 2);
        assert_eq!(report.records.len(), 2);
        assert_eq!(tree.property(a, "tagged"), Some(&json!(true)));
    }

    #[test]
    fn test_candidates_frozen_before_mutation() {
        let mut tree = ConstructTree::new("App").unwrap();
        let spawner = Spawner {
            tag: MixinTag::with_origin("mixinx_core::test::Spawner"),
        };

        let report = Mixins::of(tree.root(), None)
            .apply_with_report(&mut tree, &[&spawner])
            .unwrap();

        assert_eq!(report.candidate_count, 1);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_unknown_scope_is_rejected() {
        let mut tree = ConstructTree::new("App").unwrap();
        let err = Mixins::of(NodeId(5), None)
            .apply(&mut tree, &[])
            .unwrap_err();
        assert!(matches!(err, MixinError::NodeNotFound { .. }));
    }

    #[test]
    fn test_tree_with_covers_subtree() {
        let mut tree = ConstructTree::new("App").unwrap();
        let a = tree.add_child(tree.root(), "A").unwrap();
        let b = tree.add_child(tree.root(), "B").unwrap();
        let c = tree.add_child(a, "C").unwrap();

        tree.with(a, &[&Tagger::new()]).unwrap();

        assert!(tree.property(a, "tagged").is_some());
        assert!(tree.property(c, "tagged").is_some());
        assert!(tree.property(b, "tagged").is_none());
    }
}
