//! Vertex type for the arena-based tree representation.

use crate::model::tree::{LabelIndex, TreeIndex};

/// During construction, and for the root, a vertex might not have a parent set.
const NO_PARENT_SET: TreeIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex in a rooted bifurcating phylogenetic tree.
///
/// A vertex is either:
/// - **Internal**: Has exactly two children and no label
/// - **Leaf**: Has no children and a label (via index into a [LeafLabelMap])
///
/// Whether a vertex is the root is a property of the [Tree] (its `root_index`),
/// not of the vertex itself. This allows the degenerate one-leaf tree, whose
/// root is a leaf.
///
/// # Invariants
/// - `index` is the position of this vertex in the tree arena
/// - `parent` is the [TreeIndex] of the parent; `usize::MAX` sentinel while
///   unset (during construction, for the root, and for detached subtrees)
/// - Internal vertices have `children` as an ordered tuple of [TreeIndex];
///   the order carries no meaning but is stable within one operation
///
/// [Tree]: crate::model::tree::Tree
/// [LeafLabelMap]: crate::model::leaf_label_map::LeafLabelMap
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Internal vertex (two children, no label)
    Internal {
        /// Index of this vertex in the tree arena
        index: TreeIndex,
        /// Index of the parent vertex (sentinel while unset)
        parent: TreeIndex,
        /// Indices of the two child vertices
        children: (TreeIndex, TreeIndex),
    },
    /// Leaf vertex (label, no children)
    Leaf {
        /// Index of this vertex in the tree arena
        index: TreeIndex,
        /// Index into the shared label map
        label_index: LabelIndex,
        /// Index of the parent vertex (sentinel while unset)
        parent: TreeIndex,
    },
}

impl Vertex {
    /// Creates a new internal vertex with no parent set.
    pub fn new_internal(index: TreeIndex, children: (TreeIndex, TreeIndex)) -> Self {
        Vertex::Internal {
            index,
            parent: NO_PARENT_SET,
            children,
        }
    }

    /// Creates a new leaf vertex with no parent set.
    pub fn new_leaf(index: TreeIndex, label_index: LabelIndex) -> Self {
        Vertex::Leaf {
            index,
            label_index,
            parent: NO_PARENT_SET,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> TreeIndex {
        match self {
            Vertex::Internal { index, .. } => *index,
            Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns the label index if this is a leaf, else `None`.
    pub fn label_index(&self) -> Option<LabelIndex> {
        match self {
            Vertex::Leaf { label_index, .. } => Some(*label_index),
            _ => None,
        }
    }

    /// Returns the children if this is an internal vertex, else `None`.
    pub fn children(&self) -> Option<(TreeIndex, TreeIndex)> {
        match self {
            Vertex::Internal { children, .. } => Some(*children),
            Vertex::Leaf { .. } => None,
        }
    }

    /// Returns the index of the parent, or `None` if no parent is set.
    ///
    /// No parent means this vertex is the root, a detached subtree root,
    /// or still under construction.
    pub fn parent_index(&self) -> Option<TreeIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                if *parent == NO_PARENT_SET {
                    None
                } else {
                    Some(*parent)
                }
            }
        }
    }

    /// Returns `true` if this vertex has a parent set.
    pub fn has_parent(&self) -> bool {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                *parent != NO_PARENT_SET
            }
        }
    }

    /// Sets a new parent for this vertex.
    pub fn set_parent(&mut self, new_parent: TreeIndex) {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => *parent = new_parent,
        }
    }

    /// Clears the parent of this vertex, making it a (sub)tree root.
    pub fn clear_parent(&mut self) {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                *parent = NO_PARENT_SET
            }
        }
    }

    /// Replaces child `old` with `new` in this vertex's children tuple.
    ///
    /// This is the edge-rewrite primitive behind [Tree::detach] and
    /// [Tree::subdivide].
    ///
    /// # Panics
    /// Panics if this vertex is a leaf or `old` is not one of its children.
    ///
    /// [Tree::detach]: crate::model::tree::Tree::detach
    /// [Tree::subdivide]: crate::model::tree::Tree::subdivide
    pub fn replace_child(&mut self, old: TreeIndex, new: TreeIndex) {
        match self {
            Vertex::Internal { children, .. } => {
                if children.0 == old {
                    children.0 = new;
                } else if children.1 == old {
                    children.1 = new;
                } else {
                    panic!("Vertex {} is not a child of vertex {}", old, self.index());
                }
            }
            Vertex::Leaf { .. } => panic!("Cannot replace child on a leaf vertex"),
        }
    }
}
