//! Distance between trees via their vector encodings.

use crate::codec::{self, CodecError};
use crate::model::leaf_label_map::LeafLabelMap;
use crate::model::tree::Tree;
use crate::vector::{EdgeLabel, VectorError};

/// Hamming distance between two equal-length vectors: the number of positions
/// where they differ.
///
/// # Errors
/// [VectorError::LengthMismatch] if the lengths differ.
///
/// # Example
/// ```
/// use treevec::metric::hamming;
/// assert_eq!(hamming(&[0, 1, -2], &[0, -1, -2]).unwrap(), 1);
/// ```
pub fn hamming(a: &[EdgeLabel], b: &[EdgeLabel]) -> Result<usize, VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
}

/// Hamming distance between the vector encodings of two trees.
///
/// The trees are assumed to have identical leaf-name sets; encodings of trees
/// over different names are not comparable, even when the vector lengths
/// happen to match.
///
/// # Errors
/// Any encoding error of either tree, and [VectorError::LengthMismatch]
/// (wrapped) when the trees have different leaf counts.
pub fn hamming_of_trees(
    tree_a: &Tree,
    labels_a: &LeafLabelMap,
    tree_b: &Tree,
    labels_b: &LeafLabelMap,
) -> Result<usize, CodecError> {
    let vector_a = codec::to_vector(tree_a, labels_a)?;
    let vector_b = codec::to_vector(tree_b, labels_b)?;
    Ok(hamming(&vector_a, &vector_b)?)
}
