//! Treevec encodes rooted bifurcating phylogenetic trees as integer vectors.
//!
//! A tree on `n` distinctly named leaves corresponds to exactly one integer
//! vector of length `n - 1` whose entry at position `i` lies in `[-i, i]`.
//! Working in vector space makes tree comparison and exploration cheap:
//! distances are Hamming counts, neighbors are single-entry edits, and the
//! whole space enumerates as a mixed-radix odometer.
//!
//! Core functionality provided:
//! - Codec: [to_vector] and [to_tree] convert between the two
//!   representations; they are exact mutual inverses
//!   (see [crate::codec] for the labeling scheme behind the bijection).
//! - Tree model: arena-based [Tree] with a [LeafLabelMap] for leaf names;
//!   vertices are addressed by stable indices
//!   (see [crate::model] for details).
//! - Enumeration: all valid vectors of one size, and one vector per distinct
//!   tree shape (see [crate::space]).
//! - Neighborhoods: all Hamming-1 neighbors of a vector, and uniform random
//!   neighbors with or without a changed-output guarantee
//!   (see [crate::neighbor]).
//! - Distance: Hamming distance over vectors or tree encodings
//!   (see [crate::metric]).
//! - Newick boundary: parse and write topology-only Newick strings
//!   (see [crate::newick]).
//!
//! Limitations:
//! - Only rooted bifurcating trees with distinct leaf names
//! - Purely topological: branch lengths are skipped at the boundary
//!
//! # Usage
//!
//! Encode a tree parsed from a Newick string:
//! ```
//! use treevec::newick::parse_newick;
//! use treevec::to_vector;
//!
//! let (tree, labels) = parse_newick("((a,b),c);").unwrap();
//! assert_eq!(to_vector(&tree, &labels).unwrap(), vec![0, -1]);
//! ```
//!
//! Decode a vector and draw a random tree:
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use treevec::{random_tree, to_tree};
//!
//! let (tree, _labels) = to_tree(&[0, 1, -2]).unwrap();
//! assert_eq!(tree.num_leaves(), 4);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let (random, _labels) = random_tree(16, &mut rng).unwrap();
//! assert_eq!(random.num_leaves(), 16);
//! ```

pub mod codec;
pub mod metric;
pub mod model;
pub mod neighbor;
pub mod newick;
pub mod space;
pub mod vector;

pub use crate::codec::CodecError;
pub use crate::model::leaf_label_map::LeafLabelMap;
pub use crate::model::tree::{Tree, TreeError};
pub use crate::vector::{EdgeLabel, TreeVector, VectorError};

use rand::Rng;

// ============================================================================
// Quick codec API
// ============================================================================
/// Encodes a rooted bifurcating tree as its canonical integer vector.
///
/// See [`codec::to_vector`] for full documentation.
pub fn to_vector(tree: &Tree, labels: &LeafLabelMap) -> Result<TreeVector, CodecError> {
    codec::to_vector(tree, labels)
}

/// Decodes a vector into its tree, with deterministic default leaf names.
///
/// See [`codec::to_tree`] for full documentation.
pub fn to_tree(vector: &[EdgeLabel]) -> Result<(Tree, LeafLabelMap), CodecError> {
    codec::to_tree(vector)
}

/// Decodes a vector into its tree, naming leaf `i` with `names[i]`.
///
/// See [`codec::to_tree_with_names`] for full documentation.
pub fn to_tree_with_names<S: AsRef<str>>(
    vector: &[EdgeLabel],
    names: &[S],
) -> Result<(Tree, LeafLabelMap), CodecError> {
    codec::to_tree_with_names(vector, names)
}

// ============================================================================
// Quick sampling API
// ============================================================================
/// Draws a uniformly random tree on `n` leaves from a caller-supplied RNG.
///
/// See [`neighbor::random_tree`] for full documentation.
pub fn random_tree<R: Rng>(n: usize, rng: &mut R) -> Result<(Tree, LeafLabelMap), CodecError> {
    neighbor::random_tree(n, rng)
}
