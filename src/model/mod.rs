/// Tree structure and structural operations
pub mod tree;
/// Tree vertex types (internal, leaf)
pub mod vertex;
/// Leaf label mapping to compact indices
pub mod leaf_label_map;
