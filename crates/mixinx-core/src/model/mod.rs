pub mod metadata;
pub mod node;

pub use metadata::Metadata;
pub use node::{Node, NodeId, ResourceType};
