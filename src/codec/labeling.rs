//! Canonical edge labeling.
//!
//! The vector encoding rests on a canonical labeling of a tree's edges,
//! computed in two steps:
//! - [LeafRanks]: each leaf's 0-based position in the lexicographic order of
//!   all leaf names.
//! - [EdgeLabels]: one postorder pass assigning each vertex's incoming edge an
//!   integer label. A leaf's edge label is its rank; an internal vertex's edge
//!   label is the negated maximum over its children's minimum-rank-below.
//!
//! Both are transient side tables indexed by [TreeIndex], valid only for the
//! tree they were computed from and discarded after one encode operation.

use crate::codec::CodecError;
use crate::model::leaf_label_map::LeafLabelMap;
use crate::model::tree::{LabelIndex, Tree, TreeIndex};
use crate::vector::EdgeLabel;

// =#========================================================================#=
// LEAF RANKS
// =#========================================================================#=
/// Leaf ranks of a tree: the 0-based index of each leaf's name in the sorted
/// list of all leaf names.
///
/// Ranks are recomputed per tree and never persisted.
#[derive(Debug)]
pub struct LeafRanks {
    /// Rank keyed by [LabelIndex]
    rank_by_label: Vec<usize>,
    /// Arena index of the leaf holding each rank
    leaf_by_rank: Vec<TreeIndex>,
}

impl LeafRanks {
    /// Computes the leaf ranks of `tree` over the names in `labels`.
    ///
    /// # Errors
    /// [CodecError::DuplicateLeafName] if two leaves share a name.
    pub fn compute(tree: &Tree, labels: &LeafLabelMap) -> Result<Self, CodecError> {
        let mut leaf_of_label: Vec<Option<TreeIndex>> = vec![None; labels.num_labels()];

        for vertex in tree.post_order_iter() {
            if !vertex.is_leaf() {
                continue;
            }
            let label_index = vertex
                .label_index()
                .expect("leaf vertex has a label index");
            if leaf_of_label[label_index].is_some() {
                return Err(CodecError::DuplicateLeafName(
                    labels[label_index].to_string(),
                ));
            }
            leaf_of_label[label_index] = Some(vertex.index());
        }

        // Sort by name (lexicographic byte order) to assign ranks
        let mut by_name: Vec<(&str, LabelIndex, TreeIndex)> = leaf_of_label
            .iter()
            .enumerate()
            .filter_map(|(label_index, leaf)| {
                leaf.map(|leaf| (&labels[label_index], label_index, leaf))
            })
            .collect();
        by_name.sort_by(|a, b| a.0.cmp(b.0));

        let mut rank_by_label = vec![usize::MAX; labels.num_labels()];
        let mut leaf_by_rank = Vec::with_capacity(by_name.len());
        for (rank, &(_, label_index, leaf)) in by_name.iter().enumerate() {
            rank_by_label[label_index] = rank;
            leaf_by_rank.push(leaf);
        }

        Ok(LeafRanks {
            rank_by_label,
            leaf_by_rank,
        })
    }

    /// Returns the number of ranked leaves.
    pub fn num_leaves(&self) -> usize {
        self.leaf_by_rank.len()
    }

    /// Returns the rank of the leaf with the given label index.
    pub fn rank_of_label(&self, label_index: LabelIndex) -> usize {
        self.rank_by_label[label_index]
    }

    /// Returns the arena index of the leaf holding the given rank.
    pub fn leaf_by_rank(&self, rank: usize) -> TreeIndex {
        self.leaf_by_rank[rank]
    }
}

// =#========================================================================#=
// EDGE LABELS
// =#========================================================================#=
/// Canonical edge labels of a tree, as side tables indexed by [TreeIndex].
///
/// For every vertex:
/// - `min_label_below` is the minimum leaf rank among its descendants
///   (a leaf is its own descendant here).
/// - `edge_label` of a leaf is its rank; of an internal vertex, the negated
///   maximum over its children's `min_label_below`.
///
/// Leaf edge labels are therefore in `[0, n)` and internal edge labels in
/// `(-n, 0]`, and within one tree each label occurs at most once.
#[derive(Debug)]
pub struct EdgeLabels {
    edge_label: Vec<EdgeLabel>,
    min_label_below: Vec<EdgeLabel>,
}

impl EdgeLabels {
    /// Computes the edge labels of `tree` in a single postorder pass.
    pub fn compute(tree: &Tree, ranks: &LeafRanks) -> Self {
        let mut edge_label = vec![0; tree.num_vertices()];
        let mut min_label_below = vec![0; tree.num_vertices()];

        for vertex in tree.post_order_iter() {
            let index = vertex.index();
            match vertex.children() {
                None => {
                    let rank = ranks.rank_of_label(
                        vertex.label_index().expect("leaf vertex has a label index"),
                    ) as EdgeLabel;
                    edge_label[index] = rank;
                    min_label_below[index] = rank;
                }
                Some((left, right)) => {
                    let left_min = min_label_below[left];
                    let right_min = min_label_below[right];
                    min_label_below[index] = left_min.min(right_min);
                    edge_label[index] = -left_min.max(right_min);
                }
            }
        }

        EdgeLabels {
            edge_label,
            min_label_below,
        }
    }

    /// Returns the edge label of the vertex at `index`.
    pub fn edge_label(&self, index: TreeIndex) -> EdgeLabel {
        self.edge_label[index]
    }

    /// Returns the minimum leaf rank below the vertex at `index`.
    pub fn min_label_below(&self, index: TreeIndex) -> EdgeLabel {
        self.min_label_below[index]
    }
}
