pub mod node;
pub mod visit;

// Re-export commonly used items
pub use node::{ElementNode, Fields, Node, OtherNode, RawNode};
pub use visit::{collect_paths, node_at, node_at_mut, NodePath};
