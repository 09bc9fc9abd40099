//! Core types shared across MixinX facilities
//!
//! This crate provides foundational constants used by the engine, the
//! logging facility and domain mixin crates:
//!
//! - **Schema constants**: Canonical field keys and event names
//! - **Provenance constants**: Metadata key, redaction sentinel and the
//!   trusted-origin allow-list

pub mod provenance;
pub mod schema;

pub use provenance::{ALLOWED_ORIGIN_PREFIXES, MIXIN_METADATA_KEY, REDACTED_ORIGIN};
