//! Vector representation of trees.
//!
//! A tree on `n` leaves is encoded as an integer vector of length `n - 1`
//! whose entry at position `i` (0-indexed) lies in the range `[-i, i]`.
//! This range constraint is the sole validity invariant; it makes the space
//! a mixed-radix product where position `i` has exactly `2i + 1` legal values.
//!
//! The canonical textual form of a vector, used at the system boundary, is
//! comma-separated decimal integers (see [format_vector] and [parse_vector]).

use thiserror::Error;

/// Canonical integer label assigned to a vertex's incoming edge;
/// also the entry type of a [TreeVector].
pub type EdgeLabel = i32;

/// Integer vector encoding of a tree: length `n - 1` for `n` leaves,
/// entry `i` in `[-i, i]`.
pub type TreeVector = Vec<EdgeLabel>;

// =#========================================================================#=
// VECTOR ERROR
// =#========================================================================#=
/// Errors for operations on encoding vectors.
#[derive(Error, Debug, PartialEq)]
pub enum VectorError {
    /// A vector entry violates the range constraint `-i <= v[i] <= i`
    #[error("vector entry at position {index} must be in [-{bound}, {bound}], got {value}")]
    OutOfRange {
        index: usize,
        bound: EdgeLabel,
        value: EdgeLabel,
    },
    /// Two vectors of different lengths where equal lengths are required
    #[error("vectors must have equal length, got {left} and {right}")]
    LengthMismatch { left: usize, right: usize },
    /// Textual form could not be parsed as a comma-separated integer vector
    #[error("cannot parse vector entry: {0:?}")]
    Unparsable(String),
}

/// Returns the number of leaves of the tree encoded by a vector of this length.
pub fn num_leaves(vector: &[EdgeLabel]) -> usize {
    vector.len() + 1
}

/// Checks the range constraint `-i <= vector[i] <= i` for every position.
///
/// # Errors
/// [VectorError::OutOfRange] with the offending index, bound and value.
pub fn validate(vector: &[EdgeLabel]) -> Result<(), VectorError> {
    for (i, &value) in vector.iter().enumerate() {
        let bound = i as EdgeLabel;
        if value < -bound || value > bound {
            return Err(VectorError::OutOfRange {
                index: i,
                bound,
                value,
            });
        }
    }
    Ok(())
}

/// Renders a vector in its canonical textual form: comma-separated decimals.
///
/// # Example
/// ```
/// use treevec::vector::format_vector;
/// assert_eq!(format_vector(&[0, 1, -2]), "0,1,-2");
/// assert_eq!(format_vector(&[]), "");
/// ```
pub fn format_vector(vector: &[EdgeLabel]) -> String {
    let mut out = String::with_capacity(vector.len() * 3);
    for (i, value) in vector.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&value.to_string());
    }
    out
}

/// Parses a vector from its canonical textual form and validates it.
///
/// The empty string parses to the empty vector (the one-leaf tree).
///
/// # Errors
/// [VectorError::Unparsable] for malformed entries,
/// [VectorError::OutOfRange] if the parsed vector violates the range constraint.
pub fn parse_vector(text: &str) -> Result<TreeVector, VectorError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut vector = Vec::new();
    for entry in text.split(',') {
        let value = entry
            .trim()
            .parse::<EdgeLabel>()
            .map_err(|_| VectorError::Unparsable(entry.to_string()))?;
        vector.push(value);
    }
    validate(&vector)?;
    Ok(vector)
}
