#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::HashSet;

use common::{abc_tree, bucket_stack};
use mixinx_core::selectors::Glob;
use mixinx_core::{ConstructSelector, ConstructTree, MixinError, NodeId, Selector};
use proptest::prelude::*;

/// Build a tree from a parent-index list: node `i + 1` hangs under
/// `parents[i] % (i + 1)`, so every prefix is a valid tree
fn tree_from_parents(parents: &[usize]) -> ConstructTree {
    let mut tree = ConstructTree::new("root").unwrap();
    let mut handles = vec![tree.root()];
    for (i, p) in parents.iter().enumerate() {
        let parent = handles[p % handles.len()];
        let child = tree.add_child(parent, format!("n{}", i)).unwrap();
        handles.push(child);
    }
    tree
}

/// Reference pre-order using recursion
fn recursive_pre_order(tree: &ConstructTree, node: NodeId, out: &mut Vec<NodeId>) {
    out.push(node);
    for child in tree.children(node).unwrap() {
        recursive_pre_order(tree, *child, out);
    }
}

proptest! {
    #[test]
    fn prop_all_visits_every_node_once_in_pre_order(parents in prop::collection::vec(0usize..64, 0..40)) {
        let tree = tree_from_parents(&parents);
        let selected = ConstructSelector::all().select(&tree, tree.root());

        prop_assert_eq!(selected.len(), tree.len());
        prop_assert_eq!(selected[0], tree.root());
        let unique: HashSet<_> = selected.iter().copied().collect();
        prop_assert_eq!(unique.len(), selected.len());

        let mut expected = Vec::new();
        recursive_pre_order(&tree, tree.root(), &mut expected);
        prop_assert_eq!(selected, expected);
    }

    #[test]
    fn prop_by_id_prod_glob_matches_substring(ids in prop::collection::hash_set("[a-z]{0,4}(prod)?[a-z]{0,4}", 1..12)) {
        let mut tree = ConstructTree::new("root").unwrap();
        let mut expected = Vec::new();
        for id in ids.iter().filter(|id| !id.is_empty()) {
            let handle = tree.add_child(tree.root(), id.clone()).unwrap();
            if id.contains("prod") {
                expected.push(handle);
            }
        }

        let selected = ConstructSelector::by_id("*prod*").unwrap().select(&tree, tree.root());
        prop_assert_eq!(selected, expected);
    }

    #[test]
    fn prop_selection_is_deterministic(parents in prop::collection::vec(0usize..16, 0..20)) {
        let tree = tree_from_parents(&parents);
        let selector = ConstructSelector::by_path("root/**").unwrap();
        prop_assert_eq!(
            selector.select(&tree, tree.root()),
            selector.select(&tree, tree.root())
        );
    }
}

#[test]
fn test_by_path_anchored_double_star() {
    let (tree, _a, _b, c) = abc_tree();
    let selected = ConstructSelector::by_path("*/A/**")
        .unwrap()
        .select(&tree, tree.root());
    assert_eq!(selected, vec![c]);
}

#[test]
fn test_by_path_single_star_stays_in_segment() {
    let (tree, a, b, _c) = abc_tree();
    let selected = ConstructSelector::by_path("R/*")
        .unwrap()
        .select(&tree, tree.root());
    assert_eq!(selected, vec![a, b]);
}

#[test]
fn test_unmatched_glob_is_empty_not_error() {
    let (tree, ..) = abc_tree();
    let selected = ConstructSelector::by_id("nothing-here*")
        .unwrap()
        .select(&tree, tree.root());
    assert!(selected.is_empty());
}

#[test]
fn test_childless_scope_all_is_itself() {
    let (tree, _a, b, _c) = abc_tree();
    assert_eq!(ConstructSelector::all().select(&tree, b), vec![b]);
}

#[test]
fn test_resources_of_type_matches_alias_and_type_name() {
    let (tree, stack, resources) = bucket_stack();
    let by_alias = ConstructSelector::resources_of_type("CfnBucket").select(&tree, stack);
    let by_type = ConstructSelector::resources_of_type("AWS::S3::Bucket").select(&tree, stack);
    assert_eq!(by_alias, resources);
    assert_eq!(by_type, resources);
    assert!(ConstructSelector::resources_of_type("AWS::SQS::Queue")
        .select(&tree, stack)
        .is_empty());
}

#[test]
fn test_malformed_globs_rejected() {
    for pattern in ["", "a***", "a/b", "**"] {
        let err = ConstructSelector::by_id(pattern).unwrap_err();
        assert!(
            matches!(err, MixinError::InvalidGlob { .. }),
            "expected InvalidGlob for {:?}",
            pattern
        );
    }
    for pattern in ["", "R/a**", "***/x"] {
        assert!(matches!(
            Glob::path(pattern),
            Err(MixinError::InvalidGlob { .. })
        ));
    }
}

#[test]
fn test_selector_reusable_across_trees() {
    let selector = ConstructSelector::by_id("B").unwrap();
    let (first, _, b1, _) = abc_tree();
    let (second, _, b2, _) = abc_tree();
    assert_eq!(selector.select(&first, first.root()), vec![b1]);
    assert_eq!(selector.select(&second, second.root()), vec![b2]);
}
