//! Deterministic node-derived names
//!
//! Names are built from the node path below the root. Segments named
//! `Default` are dropped entirely; segments named `Resource` are hidden from
//! the human-readable part but still feed the hash, so two nodes differing
//! only there stay distinct.
//!
//! ## Determinism Guarantees
//!
//! - Same path -> same name
//! - Different paths -> different 8-character hash suffix (SHA256-based)

use sha2::{Digest, Sha256};

use crate::errors::Result;
use crate::model::NodeId;
use crate::traversal::compute_chain;
use crate::tree::ConstructTree;

const HIDDEN_ID: &str = "Default";
const HIDDEN_FROM_HUMAN_ID: &str = "Resource";
const HASH_LEN: usize = 8;
const MAX_HUMAN_LEN: usize = 240;

/// Unique identifier of a node: alphanumeric path segments concatenated,
/// followed by an uppercase hash of the path
///
/// The root itself yields its alphanumeric id with no hash.
///
/// # Errors
///
/// Returns `NodeNotFound` if the handle is not in this tree.
///
/// # Example
///
/// ```
/// use mixinx_core::names::unique_id;
/// use mixinx_core::tree::ConstructTree;
///
/// let mut tree = ConstructTree::new("App").unwrap();
/// let stack = tree.add_child(tree.root(), "my-stack").unwrap();
/// let id = unique_id(&tree, stack).unwrap();
/// assert!(id.starts_with("mystack"));
/// assert_eq!(id.len(), "mystack".len() + 8);
/// ```
pub fn unique_id(tree: &ConstructTree, node: NodeId) -> Result<String> {
    let components = components(tree, node)?;
    if components.is_empty() {
        return Ok(alphanumeric(tree.node(node)?.id()));
    }

    let mut human: String = human_components(&components).map(alphanumeric).collect();
    human.truncate(MAX_HUMAN_LEN);
    Ok(format!("{}{}", human, path_hash(&components)))
}

/// Unique resource name: lowercase alphanumeric segments joined by `-`,
/// followed by `-` and a lowercase hash of the path, at most `max_len` chars
///
/// Overlong names keep the head and tail of the human-readable part.
///
/// # Errors
///
/// Returns `NodeNotFound` if the handle is not in this tree.
pub fn unique_resource_name(tree: &ConstructTree, node: NodeId, max_len: usize) -> Result<String> {
    let components = components(tree, node)?;
    let hash = path_hash(&components).to_ascii_lowercase();

    let human = human_components(&components)
        .map(|c| alphanumeric(c).to_ascii_lowercase())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let suffix = format!("-{}", hash);
    if max_len <= suffix.len() {
        return Ok(hash.chars().take(max_len).collect());
    }

    let budget = max_len - suffix.len();
    let human = if human.chars().count() > budget {
        let head = budget / 2;
        let tail = budget - head;
        let chars: Vec<char> = human.chars().collect();
        let mut kept: String = chars[..head].iter().collect();
        kept.extend(&chars[chars.len() - tail..]);
        kept
    } else {
        human
    };

    if human.is_empty() {
        Ok(hash)
    } else {
        Ok(format!("{}{}", human, suffix))
    }
}

/// Path segments below the root with `Default` ids removed
fn components(tree: &ConstructTree, node: NodeId) -> Result<Vec<String>> {
    compute_chain(tree, node)?
        .into_iter()
        .skip(1)
        .map(|id| tree.node(id).map(|n| n.id().to_string()))
        .filter(|c| !matches!(c, Ok(id) if id == HIDDEN_ID))
        .collect()
}

fn human_components(components: &[String]) -> impl Iterator<Item = &str> {
    let mut previous: Option<&str> = None;
    components.iter().filter_map(move |c| {
        let c = c.as_str();
        let keep = c != HIDDEN_FROM_HUMAN_ID && previous != Some(c);
        previous = Some(c);
        keep.then_some(c)
    })
}

fn path_hash(components: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(components.join("/").as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(HASH_LEN);
    digest.to_ascii_uppercase()
}

fn alphanumeric(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect()
}
