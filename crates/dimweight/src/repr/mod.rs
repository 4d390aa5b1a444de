//! Canonical tree and forest storage shared by training, persistence and
//! inference.

mod forest;
mod tree;

pub use forest::{Forest, ForestValidationError};
pub use tree::{MutableTree, Tree, TreeValidationError};

/// Index of a node within its tree. The root is `0`.
pub type NodeId = u32;
