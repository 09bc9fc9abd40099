//! Vended-logs delivery wiring
//!
//! Builds on the mixin engine in `mixinx-core` to connect resources that
//! emit vended logs to a destination. A binding creates (or reuses) a
//! delivery source for the resource, a destination node, and a delivery
//! node that depends on both.
//!
//! ## Entry points
//!
//! - [`VendedLogs`] builds a [`VendedLogsMixin`] for one resource type and
//!   log type, ready to be applied through `mixinx_core::Mixins`
//! - [`LogsDelivery`] implementations bind a single scope directly
//! - [`compute_record_fields`] merges provided and mandatory record fields

pub mod delivery;
pub mod destination;
pub mod mixin;
pub mod naming;
pub mod props;
pub mod record_fields;
pub mod source;

pub use delivery::{
    bind_delivery, DestinationLogsDelivery, FirehoseLogsDelivery, LogGroupLogsDelivery,
    LogsDelivery, LogsDeliveryConfig, S3LogsDelivery, XRayLogsDelivery,
};
pub use destination::{create_destination, DestinationKind};
pub use mixin::{VendedLogs, VendedLogsMixin};
pub use props::{
    DeliveryProps, RecordFieldDeliveryProps, S3LogsDeliveryPermissionsVersion,
    S3LogsDeliveryProps,
};
pub use record_fields::compute_record_fields;
pub use source::{
    check_source_inputs, find_delivery_source, get_or_create_delivery_source, source_name,
};
