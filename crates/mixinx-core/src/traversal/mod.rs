//! Deterministic tree traversals
//!
//! - [`path`]: root-to-node chain and `/`-joined path strings
//! - [`dfs`]: depth-first pre-order enumeration of a subtree

pub mod dfs;
pub mod path;

pub use dfs::find_all;
pub use path::{compute_chain, path_of};
