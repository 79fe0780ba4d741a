//! Enumeration of the vector space and of tree shapes.
//!
//! [all_vectors] walks every valid vector of a given size in a fixed
//! lexicographic order (mixed-radix odometer). [all_tree_shapes] yields one
//! vector per distinct unlabeled rooted binary tree shape, built recursively
//! from smaller shape spaces via [combine]. Both are lazy; the spaces are
//! combinatorially large and must be consumed as iterators.

use crate::codec::{self, CodecError};
use crate::model::leaf_label_map::LeafLabelMap;
use crate::model::tree::{Tree, TreeError, TreeIndex};
use crate::vector::{EdgeLabel, TreeVector};
use itertools::Itertools;
use log::debug;
use std::iter;

// ============================================================================
// All vectors (odometer)
// ============================================================================
/// Returns the number of valid vectors for trees on `n` leaves:
/// `(2n - 3)!! = prod_{i=0}^{n-2} (2i + 1)`.
///
/// Defined for `n >= 1`; exact in `u128` up to n = 40, far beyond any
/// enumerable size.
pub fn num_vectors(n: usize) -> u128 {
    (0..n.saturating_sub(1)).map(|i| (2 * i + 1) as u128).product()
}

/// Returns a lazy iterator over every valid vector of length `n - 1`,
/// in a fixed deterministic order.
///
/// The order is a lexicographic odometer: the last position increments
/// fastest, overflow carries leftward, and each position `i` cycles through
/// `[-i, i]`. The iterator is `Clone`, and calling `all_vectors` again
/// restarts the enumeration.
///
/// # Panics
/// Panics if `n == 0` (there is no tree on zero leaves).
///
/// # Example
/// ```
/// use treevec::space::all_vectors;
/// assert_eq!(all_vectors(4).count(), 15); // 1 * 3 * 5
/// ```
pub fn all_vectors(n: usize) -> AllVectors {
    assert!(n >= 1, "there is no tree on zero leaves");
    let start = (0..n - 1).map(|i| -(i as EdgeLabel)).collect();
    AllVectors { next: Some(start) }
}

/// Odometer iterator over all valid vectors of one length; see [all_vectors].
#[derive(Debug, Clone)]
pub struct AllVectors {
    next: Option<TreeVector>,
}

impl Iterator for AllVectors {
    type Item = TreeVector;

    fn next(&mut self) -> Option<TreeVector> {
        let current = self.next.take()?;

        // The length-0 vector (one leaf) has no successor
        if !current.is_empty() {
            let mut succ = current.clone();
            let last = succ.len() - 1;
            succ[last] += 1;
            // Carry leftward; position i overflows past i
            for i in (1..=last).rev() {
                if succ[i] > i as EdgeLabel {
                    succ[i] = -(i as EdgeLabel);
                    succ[i - 1] += 1;
                }
            }
            // Position 0 only holds 0; anything above means we wrapped around
            if succ[0] <= 0 {
                self.next = Some(succ);
            }
        }

        Some(current)
    }
}

// ============================================================================
// All tree shapes
// ============================================================================
/// Returns a lazy iterator yielding one vector per distinct unlabeled rooted
/// binary tree shape on `n` leaves, without duplicates.
///
/// Shapes are enumerated recursively: every shape on `n` leaves splits at the
/// root into shapes on `k` and `n - k` leaves. Ordered pairs are taken for
/// `k < n / 2`; for even `n` the symmetric split `k = n / 2` uses unordered
/// pairs (combinations with replacement) to avoid counting the swapped pair
/// twice. The counts follow the Wedderburn-Etherington numbers
/// (1, 1, 1, 2, 3, 6, 11, ... for n = 0 is empty).
///
/// # Example
/// ```
/// use treevec::space::all_tree_shapes;
/// assert_eq!(all_tree_shapes(4).count(), 2);
/// assert_eq!(all_tree_shapes(5).count(), 3);
/// ```
pub fn all_tree_shapes(n: usize) -> Box<dyn Iterator<Item = TreeVector>> {
    match n {
        0 => Box::new(iter::empty()),
        1 => Box::new(iter::once(Vec::new())),
        2 => Box::new(iter::once(vec![0])),
        _ => {
            debug!("enumerating tree shapes on {n} leaves");
            let asymmetric = (1..n.div_ceil(2)).flat_map(move |k| {
                all_tree_shapes(k).flat_map(move |left| {
                    all_tree_shapes(n - k).map(move |right| {
                        combine(&left, &right).expect("shape vectors are valid")
                    })
                })
            });

            if n % 2 == 0 {
                let symmetric = all_tree_shapes(n / 2)
                    .combinations_with_replacement(2)
                    .map(|pair| combine(&pair[0], &pair[1]).expect("shape vectors are valid"));
                Box::new(asymmetric.chain(symmetric))
            } else {
                Box::new(asymmetric)
            }
        }
    }
}

// ============================================================================
// Combine / split
// ============================================================================
/// Combines two vectors into the vector of the tree that has their trees as
/// the two children of a fresh root.
///
/// The subtrees are decoded with disjoint deterministic names, grafted under
/// a common root, and the whole is re-encoded. [split] is the exact inverse
/// for any vector whose tree has at least two leaves.
pub fn combine(left: &[EdgeLabel], right: &[EdgeLabel]) -> Result<TreeVector, CodecError> {
    let n_left = left.len() + 1;
    let n_right = right.len() + 1;
    let n = n_left + n_right;

    let names = pair_names(n);
    let (left_tree, left_labels) = codec::to_tree_with_names(left, &names[..n_left])?;
    let (right_tree, right_labels) = codec::to_tree_with_names(right, &names[n_left..])?;

    let mut tree = Tree::new(n);
    let mut labels = LeafLabelMap::new(n);
    let left_root = copy_subtree(
        &left_tree,
        &left_labels,
        left_tree.root_index(),
        &mut tree,
        &mut labels,
    )?;
    let right_root = copy_subtree(
        &right_tree,
        &right_labels,
        right_tree.root_index(),
        &mut tree,
        &mut labels,
    )?;
    let root = tree.add_internal((left_root, right_root))?;
    tree.set_root(root)?;

    codec::to_vector(&tree, &labels)
}

/// Splits a vector into the vectors of the two subtrees below its tree's
/// root, each re-encoded independently.
///
/// Exact inverse of [combine] up to leaf naming.
///
/// # Errors
/// [TreeError::InvalidOperation] (wrapped) for the empty vector, whose tree
/// is a single leaf with no split.
pub fn split(vector: &[EdgeLabel]) -> Result<(TreeVector, TreeVector), CodecError> {
    let (tree, labels) = codec::to_tree(vector)?;
    let (left, right) = tree
        .root()
        .children()
        .ok_or(TreeError::InvalidOperation(
            "cannot split a single-leaf tree",
        ))?;

    let left_vector = subtree_vector(&tree, &labels, left)?;
    let right_vector = subtree_vector(&tree, &labels, right)?;
    Ok((left_vector, right_vector))
}

/// Extracts the subtree rooted at `root` into a fresh tree and encodes it.
fn subtree_vector(
    tree: &Tree,
    labels: &LeafLabelMap,
    root: TreeIndex,
) -> Result<TreeVector, CodecError> {
    let n = tree.post_order_from(root).filter(|v| v.is_leaf()).count();
    let mut sub = Tree::new(n);
    let mut sub_labels = LeafLabelMap::new(n);
    let sub_root = copy_subtree(tree, labels, root, &mut sub, &mut sub_labels)?;
    sub.set_root(sub_root)?;
    codec::to_vector(&sub, &sub_labels)
}

/// Copies the subtree of `src` rooted at `index` into `dst`, carrying leaf
/// names over into `dst_labels`. Returns the copy's root index in `dst`.
fn copy_subtree(
    src: &Tree,
    src_labels: &LeafLabelMap,
    index: TreeIndex,
    dst: &mut Tree,
    dst_labels: &mut LeafLabelMap,
) -> Result<TreeIndex, CodecError> {
    let vertex = src.vertex(index);
    match vertex.children() {
        None => {
            let name = &src_labels[vertex.label_index().expect("leaf vertex has a label index")];
            Ok(dst.add_leaf(dst_labels.get_or_insert(name)))
        }
        Some((left, right)) => {
            let left_copy = copy_subtree(src, src_labels, left, dst, dst_labels)?;
            let right_copy = copy_subtree(src, src_labels, right, dst, dst_labels)?;
            Ok(dst.add_internal((left_copy, right_copy))?)
        }
    }
}

/// Deterministic two-character names `"aa"`, `"ab"`, ... whose lexicographic
/// order matches index order, so leaf ranks line up with the name pool.
fn pair_names(count: usize) -> Vec<String> {
    debug_assert!(count <= 26 * 26);
    (0..count)
        .map(|i| {
            let hi = (b'a' + (i / 26) as u8) as char;
            let lo = (b'a' + (i % 26) as u8) as char;
            format!("{hi}{lo}")
        })
        .collect()
}
