//! Logs delivery bindings
//!
//! A binding wires one source resource to one destination:
//!
//! - a delivery source for (scope, log type, ARN), reused when it exists
//! - a container `Cdk{Dest}{LogType}Delivery{uniqueIds}` under the scope
//! - a destination node inside the container (unless one was supplied)
//! - a `Delivery` node inside the container, depending on both ends
//!
//! ## Logging
//!
//! Emits `start` / `end` / `end_error` events for op `bind_logs_delivery`.

use std::fmt;
use std::time::Instant;

use mixinx_core::names::unique_id;
use mixinx_core::{log_op_end, log_op_error, log_op_start};
use mixinx_core::{ConstructTree, MixinError, NodeId, Result};
use serde_json::json;

use crate::destination::{create_destination, DestinationKind};
use crate::naming::delivery_id;
use crate::props::{delivery_type, DeliveryProps, RecordFieldDeliveryProps, S3LogsDeliveryProps};
use crate::record_fields::compute_record_fields;
use crate::source::{check_source_inputs, get_or_create_delivery_source, source_name};

pub const DELIVERY_ID: &str = "Delivery";
pub const PROP_DELIVERY_SOURCE_NAME: &str = "deliverySourceName";
pub const PROP_DELIVERY_DESTINATION_ARN: &str = "deliveryDestinationArn";
pub const PROP_RECORD_FIELDS: &str = "recordFields";

/// Nodes produced or reused by one binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogsDeliveryConfig {
    pub delivery_source: NodeId,
    pub delivery_destination: NodeId,
    pub delivery: NodeId,
}

/// A destination that vended logs can be bound to
pub trait LogsDelivery: fmt::Debug {
    /// Wire `scope`'s logs of `log_type` to this destination
    ///
    /// # Errors
    ///
    /// * `UnresolvableSource` - empty log type or ARN, or foreign scope
    /// * `InvalidDestination` - the destination references foreign nodes
    /// * `DuplicateChildId` - this exact binding already exists under scope
    fn bind(
        &self,
        tree: &mut ConstructTree,
        scope: NodeId,
        log_type: &str,
        source_arn: &str,
    ) -> Result<LogsDeliveryConfig>;
}

impl<D: LogsDelivery + ?Sized> LogsDelivery for Box<D> {
    fn bind(
        &self,
        tree: &mut ConstructTree,
        scope: NodeId,
        log_type: &str,
        source_arn: &str,
    ) -> Result<LogsDeliveryConfig> {
        (**self).bind(tree, scope, log_type, source_arn)
    }
}

/// Delivers vended logs to an S3 bucket
#[derive(Debug, Clone)]
pub struct S3LogsDelivery {
    destination: DestinationKind,
    record_fields: RecordFieldDeliveryProps,
}

impl S3LogsDelivery {
    pub fn new(bucket: NodeId, props: S3LogsDeliveryProps) -> Self {
        Self {
            destination: DestinationKind::S3 {
                bucket,
                permissions_version: props.permissions_version,
                kms_key: props.kms_key,
                output_format: props.delivery.output_format,
            },
            record_fields: props.delivery.record_fields,
        }
    }
}

impl LogsDelivery for S3LogsDelivery {
    fn bind(
        &self,
        tree: &mut ConstructTree,
        scope: NodeId,
        log_type: &str,
        source_arn: &str,
    ) -> Result<LogsDeliveryConfig> {
        bind_delivery(tree, scope, log_type, source_arn, &self.destination, &self.record_fields)
    }
}

/// Delivers vended logs to a Firehose delivery stream
#[derive(Debug, Clone)]
pub struct FirehoseLogsDelivery {
    destination: DestinationKind,
    record_fields: RecordFieldDeliveryProps,
}

impl FirehoseLogsDelivery {
    pub fn new(delivery_stream: NodeId, props: DeliveryProps) -> Self {
        Self {
            destination: DestinationKind::Firehose {
                delivery_stream,
                output_format: props.output_format,
            },
            record_fields: props.record_fields,
        }
    }
}

impl LogsDelivery for FirehoseLogsDelivery {
    fn bind(
        &self,
        tree: &mut ConstructTree,
        scope: NodeId,
        log_type: &str,
        source_arn: &str,
    ) -> Result<LogsDeliveryConfig> {
        bind_delivery(tree, scope, log_type, source_arn, &self.destination, &self.record_fields)
    }
}

/// Delivers vended logs to a log group
#[derive(Debug, Clone)]
pub struct LogGroupLogsDelivery {
    destination: DestinationKind,
    record_fields: RecordFieldDeliveryProps,
}

impl LogGroupLogsDelivery {
    pub fn new(log_group: NodeId, props: DeliveryProps) -> Self {
        Self {
            destination: DestinationKind::LogGroup {
                log_group,
                output_format: props.output_format,
            },
            record_fields: props.record_fields,
        }
    }
}

impl LogsDelivery for LogGroupLogsDelivery {
    fn bind(
        &self,
        tree: &mut ConstructTree,
        scope: NodeId,
        log_type: &str,
        source_arn: &str,
    ) -> Result<LogsDeliveryConfig> {
        bind_delivery(tree, scope, log_type, source_arn, &self.destination, &self.record_fields)
    }
}

/// Delivers trace segments to X-Ray
#[derive(Debug, Clone, Default)]
pub struct XRayLogsDelivery {
    record_fields: RecordFieldDeliveryProps,
}

impl XRayLogsDelivery {
    pub fn new(props: RecordFieldDeliveryProps) -> Self {
        Self {
            record_fields: props,
        }
    }
}

impl LogsDelivery for XRayLogsDelivery {
    fn bind(
        &self,
        tree: &mut ConstructTree,
        scope: NodeId,
        log_type: &str,
        source_arn: &str,
    ) -> Result<LogsDeliveryConfig> {
        bind_delivery(tree, scope, log_type, source_arn, &DestinationKind::XRay, &self.record_fields)
    }
}

/// Delivers vended logs to a destination node the caller already owns
#[derive(Debug, Clone)]
pub struct DestinationLogsDelivery {
    destination: DestinationKind,
    record_fields: RecordFieldDeliveryProps,
}

impl DestinationLogsDelivery {
    pub fn new(destination: NodeId, props: RecordFieldDeliveryProps) -> Self {
        Self {
            destination: DestinationKind::Existing(destination),
            record_fields: props,
        }
    }
}

impl LogsDelivery for DestinationLogsDelivery {
    fn bind(
        &self,
        tree: &mut ConstructTree,
        scope: NodeId,
        log_type: &str,
        source_arn: &str,
    ) -> Result<LogsDeliveryConfig> {
        bind_delivery(tree, scope, log_type, source_arn, &self.destination, &self.record_fields)
    }
}

/// Shared binding logic for every destination kind
///
/// # Errors
///
/// See [`LogsDelivery::bind`].
pub fn bind_delivery(
    tree: &mut ConstructTree,
    scope: NodeId,
    log_type: &str,
    source_arn: &str,
    destination: &DestinationKind,
    record_fields: &RecordFieldDeliveryProps,
) -> Result<LogsDeliveryConfig> {
    log_op_start!(
        "bind_logs_delivery",
        log_type = log_type,
        destination = destination.label()
    );
    let start = Instant::now();

    let config = bind_delivery_impl(tree, scope, log_type, source_arn, destination, record_fields)
        .map_err(|e| {
            log_op_error!(
                "bind_logs_delivery",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        "bind_logs_delivery",
        duration_ms = start.elapsed().as_millis() as u64,
        delivery = %config.delivery
    );

    Ok(config)
}

fn bind_delivery_impl(
    tree: &mut ConstructTree,
    scope: NodeId,
    log_type: &str,
    source_arn: &str,
    destination: &DestinationKind,
    record_fields: &RecordFieldDeliveryProps,
) -> Result<LogsDeliveryConfig> {
    // Every check that can fail runs before any node is attached
    destination.validate(tree)?;
    check_source_inputs(tree, log_type, scope, source_arn)?;
    let target_container_id = match destination.target() {
        Some(target) => {
            let id = delivery_id(tree, destination.label(), log_type, &[scope, target])?;
            if tree.find_child(scope, &id)?.is_some() {
                return Err(MixinError::DuplicateChildId {
                    parent_path: tree.path_of(scope)?,
                    id,
                });
            }
            Some(id)
        }
        None => None,
    };

    let source = get_or_create_delivery_source(tree, log_type, scope, source_arn)?;

    // Source-keyed ids: a freshly created source never collides
    let container_id = match (target_container_id, destination) {
        (Some(id), _) => id,
        (None, DestinationKind::Existing(existing)) => {
            let dest_type = format!("Dest{}", unique_id(tree, *existing)?);
            delivery_id(tree, &dest_type, log_type, &[scope, source])?
        }
        (None, _) => delivery_id(tree, destination.label(), log_type, &[scope, source])?,
    };
    let container = tree.add_child(scope, container_id)?;

    let delivery_destination = create_destination(tree, container, log_type, destination, source_arn)?;

    let source_ref = source_name(tree, source)?;
    let destination_arn = tree.arn_of(delivery_destination)?;
    let fields = compute_record_fields(
        record_fields.provided_fields.as_deref(),
        record_fields.mandatory_fields.as_deref(),
    );

    let delivery = tree.add_resource(container, DELIVERY_ID, delivery_type())?;
    tree.set_property(delivery, PROP_DELIVERY_SOURCE_NAME, json!(source_ref))?;
    tree.set_property(delivery, PROP_DELIVERY_DESTINATION_ARN, json!(destination_arn))?;
    if let Some(fields) = fields {
        tree.set_property(delivery, PROP_RECORD_FIELDS, json!(fields))?;
    }
    tree.add_dependency(delivery, source)?;
    tree.add_dependency(delivery, delivery_destination)?;

    Ok(LogsDeliveryConfig {
        delivery_source: source,
        delivery_destination,
        delivery,
    })
}
