//! Provenance metadata recorder
//!
//! Records which mixin touched which node. The reported identity is the
//! mixin's origin when it starts with a trusted prefix, otherwise the
//! redaction sentinel, so third-party type names never reach analytics.

use mixinx_core_types::provenance::{
    ALLOWED_ORIGIN_PREFIXES, MIXIN_METADATA_FIELD, MIXIN_METADATA_KEY, REDACTED_ORIGIN,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::Result;
use crate::mixin::Mixin;
use crate::model::NodeId;
use crate::tree::ConstructTree;

/// One provenance entry as recorded on a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Allow-listed origin or `"*"`
    pub mixin_identity: String,
    pub node: NodeId,
}

/// Writes provenance entries using an injected allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceRecorder {
    allowed_prefixes: Vec<String>,
}

impl Default for ProvenanceRecorder {
    fn default() -> Self {
        Self::new(ALLOWED_ORIGIN_PREFIXES.iter().copied())
    }
}

impl ProvenanceRecorder {
    /// Create a recorder trusting exactly the given prefixes
    pub fn new<I, S>(allowed_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_prefixes: allowed_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allowed_prefixes(&self) -> &[String] {
        &self.allowed_prefixes
    }

    /// Identity to report for an origin
    pub fn resolve_identity(&self, origin: &str) -> String {
        let trusted = !origin.is_empty()
            && self
                .allowed_prefixes
                .iter()
                .any(|prefix| origin.starts_with(prefix.as_str()));
        if trusted {
            origin.to_string()
        } else {
            REDACTED_ORIGIN.to_string()
        }
    }

    /// Append one provenance entry for `mixin` on `node`
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle is not in this tree.
    pub fn record(
        &self,
        tree: &mut ConstructTree,
        node: NodeId,
        mixin: &dyn Mixin,
    ) -> Result<MetadataRecord> {
        let mixin_identity = self.resolve_identity(mixin.tag().origin());
        tree.add_metadata(
            node,
            MIXIN_METADATA_KEY,
            json!({ MIXIN_METADATA_FIELD: &mixin_identity }),
        )?;
        Ok(MetadataRecord {
            mixin_identity,
            node,
        })
    }
}

/// Identities recorded on a node, oldest first
///
/// # Errors
///
/// Returns `NodeNotFound` if the handle is not in this tree.
pub fn recorded_mixins(tree: &ConstructTree, node: NodeId) -> Result<Vec<String>> {
    Ok(tree
        .node(node)?
        .metadata()
        .get(MIXIN_METADATA_KEY)
        .iter()
        .filter_map(|value| value.get(MIXIN_METADATA_FIELD))
        .filter_map(|value| value.as_str())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origin_is_reported_verbatim() {
        let recorder = ProvenanceRecorder::default();
        assert_eq!(
            recorder.resolve_identity("mixinx_logs::mixin::VendedLogsMixin"),
            "mixinx_logs::mixin::VendedLogsMixin"
        );
    }

    #[test]
    fn test_untrusted_origin_is_redacted() {
        let recorder = ProvenanceRecorder::default();
        assert_eq!(recorder.resolve_identity("acme_corp::SecretMixin"), "*");
        assert_eq!(recorder.resolve_identity(""), "*");
    }

    #[test]
    fn test_injected_allow_list_replaces_default() {
        let recorder = ProvenanceRecorder::new(["acme_corp::"]);
        assert_eq!(
            recorder.resolve_identity("acme_corp::SecretMixin"),
            "acme_corp::SecretMixin"
        );
        assert_eq!(recorder.resolve_identity("mixinx_core::Anything"), "*");
    }

    #[test]
    fn test_prefix_match_is_not_substring_match() {
        let recorder = ProvenanceRecorder::default();
        assert_eq!(recorder.resolve_identity("evil::mixinx_core::Fake"), "*");
    }
}
