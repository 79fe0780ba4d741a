//! Tree module for the rooted bifurcating phylogenetic tree representation.
//!
//! This module provides the core data structures for representing trees:
//! - `Tree`: The main tree structure using the arena pattern.
//! - `TreeIndex` is used to index vertices.
//! - `LabelIndex` is used to index leaf labels.
//! - `TreeError` for structural violations.

use crate::model::vertex::Vertex;
use thiserror::Error;

/// Index of a vertex in a tree (arena).
pub type TreeIndex = usize;

/// *While unset*, index for root.
const NO_ROOT_SET_INDEX: TreeIndex = usize::MAX;

/// Index of a leaf label in a [LeafLabelMap](crate::model::leaf_label_map::LeafLabelMap).
pub type LabelIndex = usize;

// =#========================================================================#=
// TREE ERROR
// =#========================================================================#=
/// Errors for structural operations on a [Tree].
#[derive(Error, Debug, PartialEq)]
pub enum TreeError {
    /// Tried to use a subtree as a child or root while it still has a parent
    #[error("vertex {0} is already attached to a parent")]
    AlreadyAttached(TreeIndex),
    /// Structural violation, e.g. detaching a vertex that has no parent
    #[error("invalid tree operation: {0}")]
    InvalidOperation(&'static str),
}

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted bifurcating phylogenetic tree using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by [TreeIndex].
/// Parent and child references are plain index fields, so the structural
/// rewrites of the vector codec ([detach](Tree::detach) and
/// [subdivide](Tree::subdivide)) are cheap index updates with no ownership
/// cycles.
///
/// # Structure
/// - All vertices are stored in the arena; the root is tracked by index
/// - Indices are stable: structural edits never move or reindex vertices,
///   so contracted vertices become unreachable slots rather than being removed
/// - Leaves hold a [LabelIndex] into a
///   [LeafLabelMap](crate::model::leaf_label_map::LeafLabelMap)
///
/// # Construction
/// Build bottom-up: add leaves, combine them with [add_internal](Tree::add_internal),
/// and finish with [set_root](Tree::set_root). Test validity with [Tree::is_valid].
///
/// # Example
/// ```
/// use treevec::model::tree::Tree;
/// use treevec::model::leaf_label_map::LeafLabelMap;
///
/// // Create the tree ((A,B),C);
/// let mut tree = Tree::new(3);
/// let mut labels = LeafLabelMap::new(3);
///
/// let a = tree.add_leaf(labels.get_or_insert("A"));
/// let b = tree.add_leaf(labels.get_or_insert("B"));
/// let c = tree.add_leaf(labels.get_or_insert("C"));
///
/// let ab = tree.add_internal((a, b)).unwrap();
/// let root = tree.add_internal((ab, c)).unwrap();
/// tree.set_root(root).unwrap();
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.num_leaves(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// Number of leaves this tree was sized for
    num_leaves_init: usize,

    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: TreeIndex,
}

// ============================================================================
// New, Construction, Getters / Accessors (pub)
// ============================================================================
impl Tree {
    /// Creates a new tree with capacity for a bifurcating tree with `num_leaves` leaves.
    ///
    /// # Arguments
    /// * `num_leaves` - number of leaves of the new tree; must be positive
    pub fn new(num_leaves: usize) -> Self {
        assert!(num_leaves > 0);
        let capacity = 2 * num_leaves - 1;
        Tree {
            num_leaves_init: num_leaves,
            root_index: NO_ROOT_SET_INDEX,
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// The leaf starts out unattached; it becomes part of the tree structure
    /// when used as a child in [add_internal](Tree::add_internal) or as the
    /// root of a one-leaf tree via [set_root](Tree::set_root).
    ///
    /// # Arguments
    /// * `label_index` - Index into the leaf label map for this leaf's name
    pub fn add_leaf(&mut self, label_index: LabelIndex) -> TreeIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_leaf(index, label_index));
        index
    }

    /// Adds an internal vertex with the two given subtrees as children,
    /// assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Tuple of child indices; both must be unattached
    ///
    /// # Errors
    /// [TreeError::AlreadyAttached] if either child already has a parent.
    pub fn add_internal(
        &mut self,
        children: (TreeIndex, TreeIndex),
    ) -> Result<TreeIndex, TreeError> {
        if self[children.0].has_parent() {
            return Err(TreeError::AlreadyAttached(children.0));
        }
        if self[children.1].has_parent() {
            return Err(TreeError::AlreadyAttached(children.1));
        }

        let index = self.vertices.len();
        self.vertices.push(Vertex::new_internal(index, children));
        self[children.0].set_parent(index);
        self[children.1].set_parent(index);

        Ok(index)
    }

    /// Marks the vertex at `index` as the root of this tree.
    ///
    /// # Errors
    /// [TreeError::AlreadyAttached] if the vertex still has a parent.
    pub fn set_root(&mut self, index: TreeIndex) -> Result<(), TreeError> {
        if self[index].has_parent() {
            return Err(TreeError::AlreadyAttached(index));
        }
        self.root_index = index;
        Ok(())
    }

    /// Returns whether the root of the tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set yet.
    pub fn root_index(&self) -> TreeIndex {
        assert!(self.is_root_set());
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    pub fn vertex(&self, index: TreeIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the number of leaves this tree was initialized to hold.
    pub fn num_leaves_init(&self) -> usize {
        self.num_leaves_init
    }

    /// Returns the number of leaves currently reachable from the root.
    ///
    /// Structural edits can leave unreachable slots in the arena, so this
    /// counts via traversal rather than scanning the arena.
    pub fn num_leaves(&self) -> usize {
        self.post_order_iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of internal vertices currently reachable from the root.
    pub fn num_internal(&self) -> usize {
        self.post_order_iter().filter(|v| v.is_internal()).count()
    }

    /// Returns the number of vertex slots in the arena,
    /// including unreachable ones left behind by [detach](Tree::detach).
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the index of the sibling of the vertex at `index`,
    /// or `None` if the vertex has no parent.
    pub fn sibling(&self, index: TreeIndex) -> Option<TreeIndex> {
        let parent = self[index].parent_index()?;
        let (left, right) = self[parent]
            .children()
            .expect("parent of a vertex has children");
        Some(if left == index { right } else { left })
    }

    /// Validates the tree structure reachable from the root.
    ///
    /// Checks:
    /// - Root is set, in bounds, and has no parent
    /// - Every reachable vertex is visited exactly once (no cycles, no sharing)
    /// - Children point back to their parent
    /// - Leaves have label indices within the initialized leaf count
    /// - Exactly `num_leaves_init` leaves and, for n >= 2, `n - 1` internal
    ///   vertices are reachable
    ///
    /// # Returns
    /// `true` if the tree is valid, `false` otherwise.
    pub fn is_valid(&self) -> bool {
        if !self.is_root_set() || self.root_index >= self.vertices.len() {
            return false;
        }
        if self[self.root_index].has_parent() {
            return false;
        }

        let mut visited = vec![false; self.vertices.len()];
        let mut leaf_count = 0;
        let mut internal_count = 0;

        let mut stack = vec![self.root_index];
        while let Some(index) = stack.pop() {
            if index >= self.vertices.len() || visited[index] {
                return false;
            }
            visited[index] = true;

            let vertex = &self.vertices[index];
            if vertex.index() != index {
                return false;
            }

            if let Some((left, right)) = vertex.children() {
                internal_count += 1;
                if left >= self.vertices.len() || right >= self.vertices.len() {
                    return false;
                }
                // Children must point back to this vertex as parent
                if self.vertices[left].parent_index() != Some(index)
                    || self.vertices[right].parent_index() != Some(index)
                {
                    return false;
                }
                stack.push(left);
                stack.push(right);
            } else {
                leaf_count += 1;
                if vertex
                    .label_index()
                    .is_none_or(|idx| idx >= self.num_leaves_init)
                {
                    return false;
                }
            }
        }

        let expected_internal = self.num_leaves_init.saturating_sub(1);
        leaf_count == self.num_leaves_init && internal_count == expected_internal
    }
}

// ============================================================================
// Structural edits: detach (un-subdivide) and subdivide (pub)
// ============================================================================
impl Tree {
    /// Detaches the subtree rooted at `index` and contracts its parent.
    ///
    /// The subtree at `index` loses its parent reference and becomes a
    /// standalone tree inside the arena. Its former parent, now with a single
    /// child, is contracted: the sibling of `index` is promoted one level up,
    /// taking the parent's place under the grandparent. If the parent was the
    /// root, the sibling becomes the new root. The contracted parent becomes
    /// an unreachable arena slot.
    ///
    /// This is the "un-subdivide" operation of the vector codec's
    /// deconstruction loop; [subdivide](Tree::subdivide) is its inverse.
    ///
    /// # Returns
    /// The index of the promoted sibling.
    ///
    /// # Errors
    /// [TreeError::InvalidOperation] if the vertex at `index` has no parent.
    pub fn detach(&mut self, index: TreeIndex) -> Result<TreeIndex, TreeError> {
        let parent = self[index]
            .parent_index()
            .ok_or(TreeError::InvalidOperation(
                "cannot detach a vertex that has no parent",
            ))?;
        let sibling = self
            .sibling(index)
            .expect("vertex with a parent has a sibling");
        let grandparent = self[parent].parent_index();

        self[index].clear_parent();

        match grandparent {
            Some(grandparent) => {
                self[grandparent].replace_child(parent, sibling);
                self[sibling].set_parent(grandparent);
            }
            None => {
                // Parent was the root; the sibling takes over
                self[sibling].clear_parent();
                if self.root_index == parent {
                    self.root_index = sibling;
                }
            }
        }

        // Unlink the contracted parent so it cannot be reached via parent walks
        self[parent].clear_parent();

        Ok(sibling)
    }

    /// Subdivides the edge above `at` and attaches a fresh leaf as the new
    /// sister of `at`.
    ///
    /// A new internal vertex is inserted into the edge between `at` and its
    /// parent, with `at` and the new leaf as its children. If `at` is the
    /// root, the new internal vertex becomes the root instead.
    ///
    /// This is the iterative construction step of the vector codec;
    /// [detach](Tree::detach) is its inverse.
    ///
    /// # Arguments
    /// * `at` - Index of the subtree whose parent edge gets subdivided
    /// * `leaf_label` - Label index for the new leaf
    ///
    /// # Returns
    /// Tuple of (new internal vertex index, new leaf index).
    pub fn subdivide(&mut self, at: TreeIndex, leaf_label: LabelIndex) -> (TreeIndex, TreeIndex) {
        let parent = self[at].parent_index();

        let leaf = self.add_leaf(leaf_label);
        let internal = self.vertices.len();
        self.vertices.push(Vertex::new_internal(internal, (at, leaf)));
        self[at].set_parent(internal);
        self[leaf].set_parent(internal);

        match parent {
            Some(parent) => {
                self[parent].replace_child(at, internal);
                self[internal].set_parent(parent);
            }
            None => {
                if self.root_index == at {
                    self.root_index = internal;
                }
            }
        }

        (internal, leaf)
    }
}

impl std::ops::Index<TreeIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: TreeIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<TreeIndex> for Tree {
    fn index_mut(&mut self, index: TreeIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// ============================================================================
// Traversal (pub)
// ============================================================================
impl Tree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// The iterator is lazy, finite, and restartable (call again for a fresh
    /// traversal). Yields nothing if the root is not set.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self, self.root_index)
    }

    /// Returns a post-order iterator over the subtree rooted at `start`.
    pub fn post_order_from(&self, start: TreeIndex) -> PostOrderIter<'_> {
        PostOrderIter::new(self, start)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// The iterator is lazy, finite, and restartable. Yields nothing if the
    /// root is not set.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self, self.root_index)
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for post-order traversal (children before parents).
///
/// Uses a stack-based approach to traverse the tree without recursion.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(TreeIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree, start: TreeIndex) -> Self {
        let mut stack = Vec::new();
        if start != NO_ROOT_SET_INDEX {
            stack.push((start, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            } else {
                self.stack.push((index, true));

                // Push children (right first, so left is processed first)
                if let Some((left, right)) = vertex.children() {
                    self.stack.push((right, false));
                    self.stack.push((left, false));
                }
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// Uses a stack-based approach to traverse the tree without recursion.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<TreeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree, start: TreeIndex) -> Self {
        let mut stack = Vec::new();
        if start != NO_ROOT_SET_INDEX {
            stack.push(start);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        if let Some((left, right)) = vertex.children() {
            self.stack.push(right);
            self.stack.push(left);
        }

        Some(vertex)
    }
}
