//! Vended-logs mixin
//!
//! [`VendedLogsMixin`] offers itself to resource nodes of one declared type
//! and, when applied, binds that resource's logs to a delivery destination
//! using the resource's ARN.
//!
//! ```
//! use mixinx_core::{ConstructTree, Mixins, ResourceType};
//! use mixinx_logs::{VendedLogs, DeliveryProps};
//!
//! let mut tree = ConstructTree::new("App").unwrap();
//! let stack = tree.add_child(tree.root(), "Stack").unwrap();
//! let dist = tree.add_child(stack, "Distribution").unwrap();
//! tree.add_resource(dist, "Resource", ResourceType::new("CfnDistribution", "AWS::CloudFront::Distribution"))
//!     .unwrap();
//! let logs = tree.add_resource(stack, "AccessLogs", ResourceType::new("CfnLogGroup", "AWS::Logs::LogGroup"))
//!     .unwrap();
//!
//! let mixin = VendedLogs::new("AWS::CloudFront::Distribution", "ACCESS_LOGS")
//!     .to_log_group(logs, DeliveryProps::default());
//! Mixins::of(stack, None).apply(&mut tree, &[&mixin]).unwrap();
//! ```

use mixinx_core::{ConstructTree, Mixin, MixinTag, NodeId, Result};

use crate::delivery::{
    DestinationLogsDelivery, FirehoseLogsDelivery, LogGroupLogsDelivery, LogsDelivery,
    S3LogsDelivery, XRayLogsDelivery,
};
use crate::props::{DeliveryProps, RecordFieldDeliveryProps, S3LogsDeliveryProps};

/// Binds one log type of one resource type to a delivery destination
#[derive(Debug)]
pub struct VendedLogsMixin {
    tag: MixinTag,
    resource_type: String,
    log_type: String,
    delivery: Box<dyn LogsDelivery>,
}

impl VendedLogsMixin {
    pub fn new(
        resource_type: impl Into<String>,
        log_type: impl Into<String>,
        delivery: Box<dyn LogsDelivery>,
    ) -> Self {
        Self {
            tag: MixinTag::of::<Self>(),
            resource_type: resource_type.into(),
            log_type: log_type.into(),
            delivery,
        }
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn log_type(&self) -> &str {
        &self.log_type
    }
}

impl Mixin for VendedLogsMixin {
    fn tag(&self) -> &MixinTag {
        &self.tag
    }

    fn supports(&self, tree: &ConstructTree, node: NodeId) -> Result<bool> {
        Ok(tree.is_cfn_resource(node)
            && tree
                .resource_type(node)
                .is_some_and(|ty| ty.matches(&self.resource_type)))
    }

    fn apply_to(&self, tree: &mut ConstructTree, node: NodeId) -> Result<()> {
        let arn = tree.arn_of(node)?;
        self.delivery.bind(tree, node, &self.log_type, &arn)?;
        Ok(())
    }
}

/// Builder producing [`VendedLogsMixin`]s for one (resource type, log type)
///
/// Mandatory record fields declared here replace any mandatory list in the
/// destination props; callers only choose the provided fields.
#[derive(Debug, Clone)]
pub struct VendedLogs {
    resource_type: String,
    log_type: String,
    mandatory_fields: Option<Vec<String>>,
}

impl VendedLogs {
    pub fn new(resource_type: impl Into<String>, log_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            log_type: log_type.into(),
            mandatory_fields: None,
        }
    }

    /// Fields this log type always delivers
    pub fn with_mandatory_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn to_s3(&self, bucket: NodeId, mut props: S3LogsDeliveryProps) -> VendedLogsMixin {
        self.fill_mandatory(&mut props.delivery.record_fields);
        self.mixin(Box::new(S3LogsDelivery::new(bucket, props)))
    }

    pub fn to_firehose(&self, delivery_stream: NodeId, mut props: DeliveryProps) -> VendedLogsMixin {
        self.fill_mandatory(&mut props.record_fields);
        self.mixin(Box::new(FirehoseLogsDelivery::new(delivery_stream, props)))
    }

    pub fn to_log_group(&self, log_group: NodeId, mut props: DeliveryProps) -> VendedLogsMixin {
        self.fill_mandatory(&mut props.record_fields);
        self.mixin(Box::new(LogGroupLogsDelivery::new(log_group, props)))
    }

    pub fn to_xray(&self, mut props: RecordFieldDeliveryProps) -> VendedLogsMixin {
        self.fill_mandatory(&mut props);
        self.mixin(Box::new(XRayLogsDelivery::new(props)))
    }

    pub fn to_destination(
        &self,
        destination: NodeId,
        mut props: RecordFieldDeliveryProps,
    ) -> VendedLogsMixin {
        self.fill_mandatory(&mut props);
        self.mixin(Box::new(DestinationLogsDelivery::new(destination, props)))
    }

    fn fill_mandatory(&self, props: &mut RecordFieldDeliveryProps) {
        if self.mandatory_fields.is_some() {
            props.mandatory_fields = self.mandatory_fields.clone();
        }
    }

    fn mixin(&self, delivery: Box<dyn LogsDelivery>) -> VendedLogsMixin {
        VendedLogsMixin::new(self.resource_type.clone(), self.log_type.clone(), delivery)
    }
}
