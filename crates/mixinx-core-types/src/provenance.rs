//! Provenance constants for mixin analytics metadata
//!
//! Every successful mixin application appends one entry under
//! [`MIXIN_METADATA_KEY`] on the target node. The entry names the mixin's
//! origin only when it falls inside one of the trusted namespaces listed in
//! [`ALLOWED_ORIGIN_PREFIXES`]; anything else is reported as
//! [`REDACTED_ORIGIN`].

/// Metadata key under which mixin provenance is appended
pub const MIXIN_METADATA_KEY: &str = "mixinx:analytics:mixin";

/// Field inside the metadata value that carries the reported identity
pub const MIXIN_METADATA_FIELD: &str = "mixin";

/// Identity reported for origins outside the allow-list
pub const REDACTED_ORIGIN: &str = "*";

/// Trusted origin prefixes
///
/// Origins are Rust type paths (`std::any::type_name`) or explicitly declared
/// names. Only first-party crates are listed.
pub const ALLOWED_ORIGIN_PREFIXES: &[&str] = &[
    // Engine crates
    "mixinx_core::",
    "mixinx_logs::",
    // Declared namespaces
    "mixinx.",
    "@mixinx/",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_not_an_allowed_prefix() {
        assert!(!ALLOWED_ORIGIN_PREFIXES
            .iter()
            .any(|p| REDACTED_ORIGIN.starts_with(p)));
    }

    #[test]
    fn test_prefixes_are_non_empty() {
        for prefix in ALLOWED_ORIGIN_PREFIXES {
            assert!(!prefix.is_empty(), "empty prefix would allow every origin");
        }
    }
}
