//! Delivery destinations
//!
//! Every binding except [`DestinationKind::Existing`] creates a fresh
//! destination node under the binding's container. Destination nodes are
//! never shared between bindings.

use mixinx_core::names::unique_resource_name;
use mixinx_core::{ConstructTree, MixinError, NodeId, Result};
use serde_json::json;

use crate::naming::make_dest_id;
use crate::props::{delivery_destination_type, S3LogsDeliveryPermissionsVersion, DELIVERY_DESTINATION_TYPE};

pub const PROP_DESTINATION_TYPE: &str = "deliveryDestinationType";
pub const PROP_DESTINATION_RESOURCE_ARN: &str = "destinationResourceArn";
pub const PROP_OUTPUT_FORMAT: &str = "outputFormat";
pub const PROP_PERMISSIONS_VERSION: &str = "permissionsVersion";
pub const PROP_KMS_KEY_ARN: &str = "kmsKeyArn";
pub const PROP_SOURCE_RESOURCE_ARN: &str = "sourceResourceArn";

const MAX_DESTINATION_NAME_LEN: usize = 60;

/// Where a binding sends its logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationKind {
    S3 {
        bucket: NodeId,
        permissions_version: S3LogsDeliveryPermissionsVersion,
        kms_key: Option<NodeId>,
        output_format: Option<String>,
    },
    Firehose {
        delivery_stream: NodeId,
        output_format: Option<String>,
    },
    LogGroup {
        log_group: NodeId,
        output_format: Option<String>,
    },
    /// Trace segments, bound to the source resource
    XRay,
    /// A caller-supplied destination node; nothing is created for it
    Existing(NodeId),
}

impl DestinationKind {
    /// Short name used in container ids and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "S3",
            Self::Firehose { .. } => "Firehose",
            Self::LogGroup { .. } => "LogGroup",
            Self::XRay => "XRay",
            Self::Existing(_) => "Destination",
        }
    }

    /// Value of the `deliveryDestinationType` property on created nodes
    pub fn wire_type(&self) -> Option<&'static str> {
        match self {
            Self::S3 { .. } => Some("S3"),
            Self::Firehose { .. } => Some("FH"),
            Self::LogGroup { .. } => Some("CWL"),
            Self::XRay => Some("XRAY"),
            Self::Existing(_) => None,
        }
    }

    /// Resource the destination writes into, for kinds that have one
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Self::S3 { bucket, .. } => Some(*bucket),
            Self::Firehose {
                delivery_stream, ..
            } => Some(*delivery_stream),
            Self::LogGroup { log_group, .. } => Some(*log_group),
            Self::XRay | Self::Existing(_) => None,
        }
    }

    fn output_format(&self) -> Option<&str> {
        match self {
            Self::S3 { output_format, .. }
            | Self::Firehose { output_format, .. }
            | Self::LogGroup { output_format, .. } => output_format.as_deref(),
            Self::XRay | Self::Existing(_) => None,
        }
    }

    /// Check that every referenced node belongs to `tree`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDestination` for foreign handles, or when an
    /// `Existing` node is not a delivery destination resource.
    pub fn validate(&self, tree: &ConstructTree) -> Result<()> {
        let invalid = |reason: String| MixinError::InvalidDestination {
            kind: self.label().to_string(),
            reason,
        };

        if let Some(target) = self.target() {
            if !tree.contains(target) {
                return Err(invalid(format!("target {} is not part of this tree", target)));
            }
        }
        if let Self::S3 {
            kms_key: Some(key), ..
        } = self
        {
            if !tree.contains(*key) {
                return Err(invalid(format!("KMS key {} is not part of this tree", key)));
            }
        }
        if let Self::Existing(destination) = self {
            let is_destination = tree
                .resource_type(*destination)
                .is_some_and(|ty| ty.type_name == DELIVERY_DESTINATION_TYPE);
            if !is_destination {
                return Err(invalid(format!(
                    "{} is not a {} resource",
                    destination, DELIVERY_DESTINATION_TYPE
                )));
            }
        }
        Ok(())
    }
}

/// Create the destination node for `kind` under `container`
///
/// For [`DestinationKind::Existing`] the given node is returned unchanged.
///
/// # Errors
///
/// Returns `NodeNotFound` for foreign handles and `DuplicateChildId` if the
/// container already holds a destination for this log type.
pub fn create_destination(
    tree: &mut ConstructTree,
    container: NodeId,
    log_type: &str,
    kind: &DestinationKind,
    source_arn: &str,
) -> Result<NodeId> {
    let wire_type = match (kind, kind.wire_type()) {
        (DestinationKind::Existing(existing), _) => return Ok(*existing),
        (_, Some(wire_type)) => wire_type,
        (_, None) => {
            return Err(MixinError::Internal {
                message: format!("{} destination has no wire type", kind.label()),
            })
        }
    };

    let destination = tree.add_resource(container, make_dest_id(log_type), delivery_destination_type())?;

    let prefix = format!("cdk-{}-dest-", kind.label().to_ascii_lowercase());
    let budget = MAX_DESTINATION_NAME_LEN.saturating_sub(prefix.len());
    let name = format!("{}{}", prefix, unique_resource_name(tree, destination, budget)?);
    tree.set_property(destination, "name", json!(name))?;
    tree.set_property(destination, PROP_DESTINATION_TYPE, json!(wire_type))?;

    if let Some(target) = kind.target() {
        let arn = tree.arn_of(target)?;
        tree.set_property(destination, PROP_DESTINATION_RESOURCE_ARN, json!(arn))?;
    }
    if let Some(format) = kind.output_format() {
        tree.set_property(destination, PROP_OUTPUT_FORMAT, json!(format))?;
    }

    match kind {
        DestinationKind::S3 {
            permissions_version,
            kms_key,
            ..
        } => {
            tree.set_property(
                destination,
                PROP_PERMISSIONS_VERSION,
                json!(permissions_version.as_str()),
            )?;
            if let Some(key) = kms_key {
                let key_arn = tree.arn_of(*key)?;
                tree.set_property(destination, PROP_KMS_KEY_ARN, json!(key_arn))?;
                tree.add_dependency(destination, *key)?;
            }
        }
        DestinationKind::XRay => {
            tree.set_property(destination, PROP_SOURCE_RESOURCE_ARN, json!(source_arn))?;
        }
        _ => {}
    }

    Ok(destination)
}
