//! Delivery source lookup and creation
//!
//! A delivery source is keyed by (scope, log type, resource ARN). Binding
//! several destinations for the same triple reuses one source node; any
//! difference in the triple yields a distinct node.

use mixinx_core::names::{unique_id, unique_resource_name};
use mixinx_core::{ConstructTree, MixinError, NodeId, Result};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::props::{delivery_source_type, DELIVERY_SOURCE_TYPE};

/// Longest source name the delivery service accepts
pub const MAX_SOURCE_NAME_LEN: usize = 60;

pub const PROP_NAME: &str = "name";
pub const PROP_LOG_TYPE: &str = "logType";
pub const PROP_RESOURCE_ARN: &str = "resourceArn";

/// Existing source under `scope` for this log type and ARN, if any
///
/// # Errors
///
/// Returns `NodeNotFound` if `scope` is not in this tree.
pub fn find_delivery_source(
    tree: &ConstructTree,
    scope: NodeId,
    log_type: &str,
    source_arn: &str,
) -> Result<Option<NodeId>> {
    Ok(tree.children(scope)?.iter().copied().find(|child| {
        tree.resource_type(*child)
            .is_some_and(|ty| ty.type_name == DELIVERY_SOURCE_TYPE)
            && tree.property(*child, PROP_LOG_TYPE) == Some(&json!(log_type))
            && tree.property(*child, PROP_RESOURCE_ARN) == Some(&json!(source_arn))
    }))
}

/// Reuse or create the delivery source for (scope, log type, ARN)
///
/// New sources get id `CDKSource{logType}{uniqueId(scope)}` and name
/// `cdk-{logtype}-source-{unique resource name}` capped at
/// [`MAX_SOURCE_NAME_LEN`]. If that id is already held by a source for a
/// different ARN, both id and name gain an ARN hash suffix.
///
/// # Errors
///
/// Returns `UnresolvableSource` if the log type or ARN is empty or `scope`
/// is not in this tree.
pub fn get_or_create_delivery_source(
    tree: &mut ConstructTree,
    log_type: &str,
    scope: NodeId,
    source_arn: &str,
) -> Result<NodeId> {
    check_source_inputs(tree, log_type, scope, source_arn)?;

    if let Some(existing) = find_delivery_source(tree, scope, log_type, source_arn)? {
        tracing::debug!(source = %existing, log_type, "reusing delivery source");
        return Ok(existing);
    }

    let prefix = format!(
        "cdk-{}-source-",
        log_type.split('_').map(str::to_lowercase).collect::<String>()
    );
    let base_id = format!("CDKSource{}{}", log_type, unique_id(tree, scope)?);
    let name_budget = MAX_SOURCE_NAME_LEN.saturating_sub(prefix.len());

    let (id, name) = if tree.find_child(scope, &base_id)?.is_some() {
        let suffix = arn_hash(source_arn);
        let resource_name =
            unique_resource_name(tree, scope, name_budget.saturating_sub(suffix.len() + 1))?;
        (
            format!("{}{}", base_id, suffix),
            format!("{}{}-{}", prefix, resource_name, suffix.to_ascii_lowercase()),
        )
    } else {
        let resource_name = unique_resource_name(tree, scope, name_budget)?;
        (base_id, format!("{}{}", prefix, resource_name))
    };

    let source = tree.add_resource(scope, id, delivery_source_type())?;
    tree.set_property(source, PROP_NAME, json!(name))?;
    tree.set_property(source, PROP_LOG_TYPE, json!(log_type))?;
    tree.set_property(source, PROP_RESOURCE_ARN, json!(source_arn))?;
    tracing::debug!(source = %source, log_type, "created delivery source");
    Ok(source)
}

/// Reject inputs no source can be resolved for, without touching the tree
///
/// # Errors
///
/// Returns `UnresolvableSource` if the log type or ARN is empty or `scope`
/// is not in this tree.
pub fn check_source_inputs(
    tree: &ConstructTree,
    log_type: &str,
    scope: NodeId,
    source_arn: &str,
) -> Result<()> {
    if !tree.contains(scope) {
        return Err(unresolvable(tree, scope, log_type, "scope is not part of this tree"));
    }
    if log_type.trim().is_empty() {
        return Err(unresolvable(tree, scope, log_type, "log type is empty"));
    }
    if source_arn.trim().is_empty() {
        return Err(unresolvable(tree, scope, log_type, "source ARN is empty"));
    }
    Ok(())
}

/// Name other resources use to refer to a source
///
/// # Errors
///
/// Returns `NodeNotFound` if the handle is not in this tree.
pub fn source_name(tree: &ConstructTree, source: NodeId) -> Result<String> {
    let node = tree.node(source)?;
    Ok(node
        .property(PROP_NAME)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| node.id().to_string()))
}

fn unresolvable(tree: &ConstructTree, scope: NodeId, log_type: &str, reason: &str) -> MixinError {
    MixinError::UnresolvableSource {
        log_type: log_type.to_string(),
        scope_path: tree.path_of(scope).unwrap_or_else(|_| scope.to_string()),
        reason: reason.to_string(),
    }
}

fn arn_hash(arn: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(arn.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(8);
    digest.to_ascii_uppercase()
}
