//! Tree ↔ vector codec.
//!
//! A rooted bifurcating tree on `n` distinctly named leaves corresponds to
//! exactly one integer vector of length `n - 1` with entry `i` in `[-i, i]`,
//! and vice versa. [to_vector] and [to_tree] are mutual inverses:
//! `to_vector(to_tree(v)) == v` for every valid `v`.
//!
//! Encoding labels every edge canonically (see [labeling]), then deconstructs
//! a private copy of the tree leaf by leaf in decreasing rank order, recording
//! at each step the edge label of the removed leaf's sister. Decoding replays
//! the construction: starting from a single leaf, each vector entry names the
//! edge that gets subdivided to attach the next leaf.
//!
//! # Example
//! ```
//! use treevec::codec::{to_tree_with_names, to_vector};
//!
//! let (tree, labels) = to_tree_with_names(&[0, 1], &["a", "b", "c"]).unwrap();
//! assert_eq!(tree.num_leaves(), 3);
//! assert_eq!(to_vector(&tree, &labels).unwrap(), vec![0, 1]);
//! ```

/// Canonical edge labeling (leaf ranks and the postorder labeling pass)
pub mod labeling;

use crate::codec::labeling::{EdgeLabels, LeafRanks};
use crate::model::leaf_label_map::LeafLabelMap;
use crate::model::tree::{Tree, TreeError, TreeIndex};
use crate::vector::{self, EdgeLabel, TreeVector, VectorError};
use log::trace;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

// =#========================================================================#=
// CODEC ERROR
// =#========================================================================#=
/// Errors of the tree ↔ vector codec and the operations built on it.
///
/// Every variant reflects an invalid input, never a transient condition;
/// nothing is retried and no partial results are returned.
#[derive(Error, Debug, PartialEq)]
pub enum CodecError {
    /// Input tree has no root set
    #[error("input tree must be rooted")]
    NotRooted,
    /// Two leaves of one tree share a name
    #[error("duplicate leaf name: {0:?}")]
    DuplicateLeafName(String),
    /// Fewer names provided than the decoded tree has leaves
    #[error("need at least {required} distinct leaf names, got {provided}")]
    InsufficientNames { required: usize, provided: usize },
    /// Vector-level violation (range constraint, length mismatch)
    #[error(transparent)]
    Vector(#[from] VectorError),
    /// Structural tree violation
    #[error(transparent)]
    Tree(#[from] TreeError),
}

// ============================================================================
// Encode: tree -> vector
// ============================================================================
/// Encodes a rooted bifurcating tree as its canonical integer vector.
///
/// The tree itself is never mutated; deconstruction happens on a private
/// working copy. The resulting vector has length `n - 1` for `n` leaves and
/// satisfies the range constraint `-i <= vector[i] <= i` by construction.
///
/// # Errors
/// - [CodecError::NotRooted] if the tree's root is not set
/// - [CodecError::DuplicateLeafName] if two leaves share a name
pub fn to_vector(tree: &Tree, labels: &LeafLabelMap) -> Result<TreeVector, CodecError> {
    if !tree.is_root_set() {
        return Err(CodecError::NotRooted);
    }

    let n = tree.num_leaves();
    trace!("encoding tree with {n} leaves");

    // Small cases have a single encoding
    if n == 1 {
        return Ok(Vec::new());
    }
    if n == 2 {
        LeafRanks::compute(tree, labels)?; // still reject duplicate names
        return Ok(vec![0]);
    }

    let ranks = LeafRanks::compute(tree, labels)?;
    let edge_labels = EdgeLabels::compute(tree, &ranks);

    // Deconstruct a private copy, removing the highest-ranked leaf each round.
    // Arena indices are stable under cloning and detaching, so the side table
    // computed above stays valid throughout.
    let mut work = tree.clone();
    let mut vector = Vec::with_capacity(n - 1);
    for rank in (1..n).rev() {
        let leaf = ranks.leaf_by_rank(rank);
        let sister = work.detach(leaf)?;
        vector.push(edge_labels.edge_label(sister));
    }

    // Entries were recorded for ranks n-1 down to 1
    vector.reverse();
    Ok(vector)
}

// ============================================================================
// Decode: vector -> tree
// ============================================================================
/// Decodes a vector into its tree, naming leaves with the default
/// deterministic scheme (see [default_names]).
///
/// # Errors
/// [CodecError::Vector] with [VectorError::OutOfRange] if an entry violates
/// the range constraint.
pub fn to_tree(vector: &[EdgeLabel]) -> Result<(Tree, LeafLabelMap), CodecError> {
    let names = default_names(vector::num_leaves(vector));
    build_tree(vector, &names)
}

/// Decodes a vector into its tree, naming leaf `i` with `names[i]`.
///
/// Only the first `n = vector.len() + 1` names are used; providing more is
/// allowed.
///
/// # Errors
/// - [CodecError::InsufficientNames] if fewer than `n` names are provided
/// - [CodecError::DuplicateLeafName] if the first `n` names are not distinct
/// - [CodecError::Vector] with [VectorError::OutOfRange] for invalid entries
pub fn to_tree_with_names<S: AsRef<str>>(
    vector: &[EdgeLabel],
    names: &[S],
) -> Result<(Tree, LeafLabelMap), CodecError> {
    let n = vector::num_leaves(vector);
    if names.len() < n {
        return Err(CodecError::InsufficientNames {
            required: n,
            provided: names.len(),
        });
    }

    let mut seen = HashSet::with_capacity(n);
    for name in &names[..n] {
        if !seen.insert(name.as_ref()) {
            return Err(CodecError::DuplicateLeafName(name.as_ref().to_string()));
        }
    }

    build_tree(vector, names)
}

/// Iterative reconstruction shared by the decode entry points.
///
/// Maintains a map from edge label to the vertex currently carrying it:
/// leaf `i` carries label `i`, the internal vertex created in round `i`
/// carries label `-i`. Round `i` subdivides the edge above the vertex with
/// label `vector[i - 1]` and hangs leaf `i` under the new internal vertex.
fn build_tree<S: AsRef<str>>(
    vector: &[EdgeLabel],
    names: &[S],
) -> Result<(Tree, LeafLabelMap), CodecError> {
    vector::validate(vector)?;

    let n = vector::num_leaves(vector);
    trace!("decoding vector of length {} into tree with {n} leaves", vector.len());

    let mut tree = Tree::new(n);
    let mut labels = LeafLabelMap::new(n);
    let mut node_by_label: HashMap<EdgeLabel, TreeIndex> = HashMap::with_capacity(2 * n);

    let first = tree.add_leaf(labels.get_or_insert(names[0].as_ref()));
    tree.set_root(first)?;
    node_by_label.insert(0, first);

    for i in 1..n {
        let target = vector[i - 1];
        let at = *node_by_label
            .get(&target)
            .expect("validated vector entry refers to an already assigned label");

        let label_index = labels.get_or_insert(names[i].as_ref());
        let (internal, leaf) = tree.subdivide(at, label_index);

        node_by_label.insert(-(i as EdgeLabel), internal);
        node_by_label.insert(i as EdgeLabel, leaf);
    }

    Ok((tree, labels))
}

// ============================================================================
// Default leaf names
// ============================================================================
/// Generates `n` deterministic leaf names: `"a"` through `"z"` for n <= 26,
/// extended to multi-character names (`"aa"`, `"ab"`, ...) for larger n.
///
/// The scheme is fixed, so repeated decodes without explicit names produce
/// identical trees.
pub fn default_names(n: usize) -> Vec<String> {
    let mut names: Vec<String> = (0..n)
        .map(|i| ((b'a' + (i % 26) as u8) as char).to_string())
        .collect();

    let mut period = 26;
    while period < n {
        names = (0..n)
            .map(|i| {
                let lead = names[i / period]
                    .chars()
                    .next_back()
                    .expect("generated names are non-empty");
                format!("{lead}{}", names[i])
            })
            .collect();
        period *= 26;
    }

    names
}
