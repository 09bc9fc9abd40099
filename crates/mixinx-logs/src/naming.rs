//! Node ids derived from log types and scopes

use mixinx_core::names::unique_id;
use mixinx_core::{ConstructTree, NodeId, Result};

/// `ACCESS_LOGS` -> `AccessLogs`
pub fn log_type_camel(log_type: &str) -> String {
    log_type
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect()
}

/// Container id for one binding: `Cdk{dest}{LogTypeCamel}Delivery{uniqueIds}`
///
/// # Errors
///
/// Returns `NodeNotFound` if any of `scopes` is not in this tree.
pub fn delivery_id(
    tree: &ConstructTree,
    dest_type: &str,
    log_type: &str,
    scopes: &[NodeId],
) -> Result<String> {
    let ids = scopes
        .iter()
        .map(|scope| unique_id(tree, *scope))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!(
        "Cdk{}{}Delivery{}",
        dest_type,
        log_type_camel(log_type),
        ids.concat()
    ))
}

/// Destination node id: `ACCESS_LOGS` -> `Destaccess-logs`
pub fn make_dest_id(log_type: &str) -> String {
    let words: Vec<String> = log_type.split('_').map(str::to_lowercase).collect();
    format!("Dest{}", words.join("-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_type_camel() {
        assert_eq!(log_type_camel("ACCESS_LOGS"), "AccessLogs");
        assert_eq!(log_type_camel("TRACES"), "Traces");
        assert_eq!(log_type_camel("APPLICATION__LOGS"), "ApplicationLogs");
    }

    #[test]
    fn test_make_dest_id() {
        assert_eq!(make_dest_id("ACCESS_LOGS"), "Destaccess-logs");
        assert_eq!(make_dest_id("TRACES"), "Desttraces");
    }

    #[test]
    fn test_delivery_id_concatenates_unique_ids() {
        let mut tree = ConstructTree::new("App").unwrap();
        let bucket = tree.add_child(tree.root(), "Bucket").unwrap();
        let target = tree.add_child(tree.root(), "Target").unwrap();

        let id = delivery_id(&tree, "S3", "ACCESS_LOGS", &[bucket, target]).unwrap();
        let expected = format!(
            "CdkS3AccessLogsDelivery{}{}",
            unique_id(&tree, bucket).unwrap(),
            unique_id(&tree, target).unwrap()
        );
        assert_eq!(id, expected);
    }
}
