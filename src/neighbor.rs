//! Neighborhood exploration and random sampling in vector space.
//!
//! Two vectors are neighbors when their Hamming distance is 1. For a vector
//! of length `L = n - 1`, position `i` has `2i` alternative values, so the
//! full neighborhood has `sum 2i = L(L - 1) = (n - 1)(n - 2)` members.
//!
//! All randomized operations take an explicit `&mut impl Rng`, so results are
//! reproducible under a seeded generator.

use crate::codec::{self, CodecError};
use crate::model::leaf_label_map::LeafLabelMap;
use crate::model::tree::Tree;
use crate::vector::{EdgeLabel, TreeVector};
use rand::Rng;

// ============================================================================
// Full neighborhood
// ============================================================================
/// Returns a lazy iterator over every vector at Hamming distance exactly 1
/// from `vector`: for each position `i`, every legal value other than
/// `vector[i]`.
///
/// Assumes `vector` is valid; the neighborhood of an invalid vector is
/// meaningless.
///
/// # Example
/// ```
/// use treevec::neighbor::neighborhood;
/// // 4 leaves: (n-1)(n-2) = 6 neighbors
/// assert_eq!(neighborhood(&[0, 1, -2]).count(), 6);
/// ```
pub fn neighborhood(vector: &[EdgeLabel]) -> Neighborhood {
    Neighborhood {
        vector: vector.to_vec(),
        position: 0,
        candidate: 0,
    }
}

/// Iterator over the Hamming-1 neighborhood of a vector; see [neighborhood].
#[derive(Debug, Clone)]
pub struct Neighborhood {
    vector: TreeVector,
    position: usize,
    candidate: EdgeLabel,
}

impl Iterator for Neighborhood {
    type Item = TreeVector;

    fn next(&mut self) -> Option<TreeVector> {
        while self.position < self.vector.len() {
            let bound = self.position as EdgeLabel;
            while self.candidate <= bound {
                let value = self.candidate;
                self.candidate += 1;
                if value != self.vector[self.position] {
                    let mut neighbor = self.vector.clone();
                    neighbor[self.position] = value;
                    return Some(neighbor);
                }
            }
            self.position += 1;
            self.candidate = -(self.position as EdgeLabel);
        }
        None
    }
}

// ============================================================================
// Random sampling
// ============================================================================
/// Draws a uniformly random valid vector for a tree on `n` leaves:
/// entry `i` uniform in `[-i, i]`, independently.
///
/// # Panics
/// Panics if `n == 0`.
pub fn random_vector<R: Rng>(n: usize, rng: &mut R) -> TreeVector {
    assert!(n >= 1, "there is no tree on zero leaves");
    (0..n - 1)
        .map(|i| {
            let bound = i as EdgeLabel;
            rng.gen_range(-bound..=bound)
        })
        .collect()
}

/// Draws a uniformly random tree on `n` leaves with default leaf names,
/// by decoding a random vector.
pub fn random_tree<R: Rng>(n: usize, rng: &mut R) -> Result<(Tree, LeafLabelMap), CodecError> {
    codec::to_tree(&random_vector(n, rng))
}

/// Draws one neighbor of `vector` uniformly at random, guaranteed different
/// from `vector` at exactly one position, without materializing the
/// neighborhood.
///
/// Sampling: `(i, j)` is a uniform off-diagonal lattice point (`i` in
/// `[0, L)`, `j` in `[0, L - 1)` shifted past `i`). The modified position is
/// `k = max(i, j)` and the candidate value `i - j`, a nonzero value in
/// `[-k, k]`. To keep the draw uniform over the `2k` values different from
/// `vector[k]`, a positive candidate is shifted down by one when it does not
/// exceed the old value, a negative candidate up by one when it does not fall
/// below it; this maps the `2k` candidates bijectively onto
/// `[-k, k] \ {vector[k]}`.
///
/// Returns `None` when the vector is shorter than 2 entries (trees on at most
/// 2 leaves have a single encoding and thus no neighbor).
///
/// For the variant that may return the vector itself, see
/// [lazy_random_neighbor]; the two are deliberately separate operations.
pub fn random_neighbor<R: Rng>(vector: &[EdgeLabel], rng: &mut R) -> Option<TreeVector> {
    let len = vector.len();
    if len < 2 {
        return None;
    }

    let i = rng.gen_range(0..len);
    let mut j = rng.gen_range(0..len - 1);
    if j >= i {
        j += 1;
    }
    let k = i.max(j);

    let old = vector[k];
    let mut value = i as EdgeLabel - j as EdgeLabel;
    if value > 0 {
        if value <= old {
            value -= 1;
        }
    } else if value >= old {
        value += 1;
    }

    let mut neighbor = vector.to_vec();
    neighbor[k] = value;
    Some(neighbor)
}

/// Like [random_neighbor], but the output may equal `vector`: both lattice
/// coordinates are drawn from `[0, L)` and no adjustment is applied, so the
/// diagonal (and a candidate equal to the current entry) pass through
/// unchanged.
///
/// This is a distinct operation, useful when a self-loop is an acceptable
/// step; it is never a drop-in replacement for [random_neighbor].
pub fn lazy_random_neighbor<R: Rng>(vector: &[EdgeLabel], rng: &mut R) -> TreeVector {
    let mut neighbor = vector.to_vec();
    let len = vector.len();
    if len == 0 {
        return neighbor;
    }

    let i = rng.gen_range(0..len);
    let j = rng.gen_range(0..len);
    let k = i.max(j);
    neighbor[k] = i as EdgeLabel - j as EdgeLabel;
    neighbor
}
