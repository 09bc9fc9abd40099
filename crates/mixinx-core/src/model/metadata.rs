use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Append-only metadata log attached to every node
///
/// Each key maps to the ordered list of values recorded under it. Values are
/// never overwritten or removed; recording the same value twice yields two
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Metadata {
    entries: BTreeMap<String, Vec<serde_json::Value>>,
}

impl Metadata {
    /// Create a new empty Metadata log
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Append a value under a key
    pub fn append(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.entries.entry(key.into()).or_default().push(value);
    }

    /// All values recorded under a key, in recording order
    pub fn get(&self, key: &str) -> &[serde_json::Value] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of values recorded under a key
    pub fn count(&self, key: &str) -> usize {
        self.get(key).len()
    }

    /// Check if a key has at least one value
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get all keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Total number of recorded values across all keys
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let mut md = Metadata::new();
        md.append("k", json!(1));
        md.append("k", json!(2));
        md.append("k", json!(1));

        assert_eq!(md.get("k"), &[json!(1), json!(2), json!(1)]);
        assert_eq!(md.count("k"), 3);
        assert_eq!(md.len(), 3);
    }

    #[test]
    fn test_missing_key_is_empty_slice() {
        let md = Metadata::new();
        assert!(md.get("absent").is_empty());
        assert!(!md.contains_key("absent"));
        assert!(md.is_empty());
    }
}
