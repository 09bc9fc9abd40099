#![allow(clippy::unwrap_used, clippy::expect_used)]

use mixinx_logs::compute_record_fields;
use proptest::prelude::*;

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_mandatory_fields_move_to_the_end() {
    let provided = fields(&["x", "y", "z"]);
    let mandatory = fields(&["y"]);

    assert_eq!(
        compute_record_fields(Some(provided.as_slice()), Some(mandatory.as_slice())),
        Some(fields(&["x", "z", "y"]))
    );
}

#[test]
fn test_nothing_provided_keeps_destination_defaults() {
    let mandatory = fields(&["a", "b"]);
    assert_eq!(compute_record_fields(None, Some(mandatory.as_slice())), None);
    assert_eq!(compute_record_fields(None, None), None);
}

fn field_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]", 0..8)
}

proptest! {
    #[test]
    fn prop_merge_contains_every_field_once(provided in field_list(), mandatory in field_list()) {
        let merged = compute_record_fields(Some(provided.as_slice()), Some(mandatory.as_slice()))
            .unwrap();

        for field in provided.iter().chain(mandatory.iter()) {
            prop_assert_eq!(merged.iter().filter(|f| *f == field).count(), 1);
        }
        prop_assert!(merged.iter().all(|f| provided.contains(f) || mandatory.contains(f)));
    }

    #[test]
    fn prop_optional_fields_precede_mandatory(provided in field_list(), mandatory in field_list()) {
        let merged = compute_record_fields(Some(provided.as_slice()), Some(mandatory.as_slice()))
            .unwrap();

        let first_mandatory = merged.iter().position(|f| mandatory.contains(f));
        if let Some(split) = first_mandatory {
            prop_assert!(merged[split..].iter().all(|f| mandatory.contains(f)));
        }

        // Optional fields keep their first-seen provided order
        let optional: Vec<&String> = merged.iter().filter(|f| !mandatory.contains(f)).collect();
        let mut expected: Vec<&String> = Vec::new();
        for field in provided.iter().filter(|f| !mandatory.contains(f)) {
            if !expected.contains(&field) {
                expected.push(field);
            }
        }
        prop_assert_eq!(optional, expected);
    }
}
