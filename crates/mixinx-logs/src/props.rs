//! Resource types and configuration structs for vended-log delivery

use mixinx_core::{NodeId, ResourceType};
use serde::{Deserialize, Serialize};

pub const DELIVERY_SOURCE_TYPE: &str = "AWS::Logs::DeliverySource";
pub const DELIVERY_DESTINATION_TYPE: &str = "AWS::Logs::DeliveryDestination";
pub const DELIVERY_TYPE: &str = "AWS::Logs::Delivery";

pub fn delivery_source_type() -> ResourceType {
    ResourceType::new("CfnDeliverySource", DELIVERY_SOURCE_TYPE)
}

pub fn delivery_destination_type() -> ResourceType {
    ResourceType::new("CfnDeliveryDestination", DELIVERY_DESTINATION_TYPE)
}

pub fn delivery_type() -> ResourceType {
    ResourceType::new("CfnDelivery", DELIVERY_TYPE)
}

/// Record fields requested by the caller and required by the log type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFieldDeliveryProps {
    /// `None` keeps the destination's default field set
    pub provided_fields: Option<Vec<String>>,
    /// `None` means the log type has no mandatory fields
    pub mandatory_fields: Option<Vec<String>>,
}

/// Props shared by destinations that accept an output format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryProps {
    pub output_format: Option<String>,
    #[serde(flatten)]
    pub record_fields: RecordFieldDeliveryProps,
}

/// Permission model granted to the log delivery service on a bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum S3LogsDeliveryPermissionsVersion {
    V1,
    #[default]
    V2,
}

impl S3LogsDeliveryPermissionsVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "V1",
            Self::V2 => "V2",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3LogsDeliveryProps {
    pub permissions_version: S3LogsDeliveryPermissionsVersion,
    /// Encryption key node the delivery service is granted use of
    pub kms_key: Option<NodeId>,
    #[serde(flatten)]
    pub delivery: DeliveryProps,
}
