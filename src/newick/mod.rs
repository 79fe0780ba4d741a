//! Newick boundary: parse and write leaf-labeled bifurcating rooted trees.
//!
//! This is the crate's only textual tree interface. It handles single
//! in-memory Newick strings of the form `((a,b),c);`:
//! - every internal vertex has exactly two children (multifurcation is
//!   rejected),
//! - every leaf carries a label, distinct within the tree,
//! - branch lengths (`:0.1`) are accepted on input and skipped; the vector
//!   encoding is purely topological and the writer never emits them.
//!
//! The core codec does not depend on this module; it exists so surrounding
//! tooling can move trees in and out as text.

use crate::model::leaf_label_map::LeafLabelMap;
use crate::model::tree::{Tree, TreeIndex};
use thiserror::Error;

/// Bytes that terminate an unquoted Newick label.
const LABEL_DELIMITERS: &[u8] = b"(),:; \n\t\r";

// =#========================================================================#=
// PARSE ERROR
// =#========================================================================#=
/// Errors from parsing a Newick string.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    /// Input ended in the middle of a tree
    #[error("unexpected end of input at position {0}")]
    UnexpectedEof(usize),
    /// A structurally required byte was missing
    #[error("expected {expected} at position {position}, found {found:?}")]
    Unexpected {
        expected: &'static str,
        found: char,
        position: usize,
    },
    /// An internal vertex with more than two children
    #[error("tree is not bifurcating: extra ',' at position {0}")]
    NotBinary(usize),
    /// A leaf without a label
    #[error("empty leaf label at position {0}")]
    EmptyLabel(usize),
    /// The same leaf label used twice
    #[error("leaf label {0:?} appears more than once")]
    DuplicateLeafLabel(String),
    /// Bytes left over after the terminating `;`
    #[error("trailing input after ';' at position {0}")]
    TrailingInput(usize),
}

// ============================================================================
// Parsing
// ============================================================================
/// Parses a Newick string into a tree and its leaf labels.
///
/// # Example
/// ```
/// use treevec::newick::parse_newick;
///
/// let (tree, labels) = parse_newick("((a,b),c);").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// assert!(labels.contains_label("c"));
/// ```
pub fn parse_newick(input: &str) -> Result<(Tree, LeafLabelMap), ParseError> {
    // A strictly binary Newick string has exactly one ',' per internal
    // vertex, so commas + 1 bounds the number of leaves
    let num_leaves = input.bytes().filter(|&b| b == b',').count() + 1;

    let mut tree = Tree::new(num_leaves);
    let mut labels = LeafLabelMap::new(num_leaves);
    let mut cursor = Cursor {
        bytes: input.as_bytes(),
        pos: 0,
    };

    let root = parse_vertex(&mut cursor, &mut tree, &mut labels)?;

    cursor.skip_whitespace();
    if !cursor.consume_if(b';') {
        return Err(cursor.unexpected("';' at end of tree"));
    }
    cursor.skip_whitespace();
    if cursor.peek().is_some() {
        return Err(ParseError::TrailingInput(cursor.pos));
    }

    tree.set_root(root)
        .expect("freshly parsed root is unattached");
    Ok((tree, labels))
}

/// Parses a vertex: an internal vertex `(left,right)` or a leaf label,
/// each with an optional skipped branch length.
fn parse_vertex(
    cursor: &mut Cursor,
    tree: &mut Tree,
    labels: &mut LeafLabelMap,
) -> Result<TreeIndex, ParseError> {
    cursor.skip_whitespace();
    if cursor.peek_is(b'(') {
        parse_internal(cursor, tree, labels)
    } else {
        parse_leaf(cursor, tree, labels)
    }
}

/// Parses `(left,right)` and adds the internal vertex to the tree.
fn parse_internal(
    cursor: &mut Cursor,
    tree: &mut Tree,
    labels: &mut LeafLabelMap,
) -> Result<TreeIndex, ParseError> {
    if !cursor.consume_if(b'(') {
        return Err(cursor.unexpected("'(' before children"));
    }
    let left = parse_vertex(cursor, tree, labels)?;

    cursor.skip_whitespace();
    if !cursor.consume_if(b',') {
        return Err(cursor.unexpected("',' between children"));
    }
    let right = parse_vertex(cursor, tree, labels)?;

    cursor.skip_whitespace();
    if cursor.peek_is(b',') {
        return Err(ParseError::NotBinary(cursor.pos));
    }
    if !cursor.consume_if(b')') {
        return Err(cursor.unexpected("')' after children"));
    }
    skip_branch_length(cursor);

    let index = tree
        .add_internal((left, right))
        .expect("freshly parsed subtrees are unattached");
    Ok(index)
}

/// Parses a leaf label and adds the leaf to the tree.
fn parse_leaf(
    cursor: &mut Cursor,
    tree: &mut Tree,
    labels: &mut LeafLabelMap,
) -> Result<TreeIndex, ParseError> {
    let start = cursor.pos;
    while let Some(b) = cursor.peek() {
        if LABEL_DELIMITERS.contains(&b) {
            break;
        }
        cursor.pos += 1;
    }
    if cursor.pos == start {
        return match cursor.peek() {
            None => Err(ParseError::UnexpectedEof(cursor.pos)),
            Some(_) => Err(ParseError::EmptyLabel(cursor.pos)),
        };
    }

    let label = std::str::from_utf8(&cursor.bytes[start..cursor.pos])
        .expect("label sliced at ASCII delimiters is valid UTF-8");
    if labels.contains_label(label) {
        return Err(ParseError::DuplicateLeafLabel(label.to_string()));
    }

    skip_branch_length(cursor);

    Ok(tree.add_leaf(labels.get_or_insert(label)))
}

/// Skips an optional `:number` branch length; the encoding is topological.
fn skip_branch_length(cursor: &mut Cursor) {
    cursor.skip_whitespace();
    if !cursor.consume_if(b':') {
        return;
    }
    cursor.skip_whitespace();
    while let Some(b) = cursor.peek() {
        // Float characters including scientific notation
        if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
            cursor.pos += 1;
        } else {
            break;
        }
    }
}

/// Minimal byte cursor over a single in-memory Newick string.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_is(&self, byte: u8) -> bool {
        self.peek() == Some(byte)
    }

    fn consume_if(&mut self, byte: u8) -> bool {
        if self.peek_is(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            None => ParseError::UnexpectedEof(self.pos),
            Some(b) => ParseError::Unexpected {
                expected,
                found: b as char,
                position: self.pos,
            },
        }
    }
}

// ============================================================================
// Writing
// ============================================================================
/// Renders a tree as a Newick string, terminated with `;`.
///
/// Topology and leaf names only; no branch lengths. The children order of the
/// tree is preserved, so writing a freshly parsed tree reproduces its shape.
///
/// # Example
/// ```
/// use treevec::codec::to_tree_with_names;
/// use treevec::newick::write_newick;
///
/// let (tree, labels) = to_tree_with_names(&[0], &["a", "b"]).unwrap();
/// assert_eq!(write_newick(&tree, &labels), "(a,b);");
/// ```
pub fn write_newick(tree: &Tree, labels: &LeafLabelMap) -> String {
    fn build(tree: &Tree, labels: &LeafLabelMap, index: TreeIndex, newick: &mut String) {
        let vertex = tree.vertex(index);
        match vertex.children() {
            None => {
                let label_index = vertex.label_index().expect("leaf vertex has a label index");
                newick.push_str(&labels[label_index]);
            }
            Some((left, right)) => {
                newick.push('(');
                build(tree, labels, left, newick);
                newick.push(',');
                build(tree, labels, right, newick);
                newick.push(')');
            }
        }
    }

    // Capacity: every internal vertex contributes "(,)" plus the label bytes
    let label_bytes: usize = labels.labels().iter().map(|s| s.len()).sum();
    let estimated_capacity = label_bytes + 3 * tree.num_internal() + 1;
    let mut newick = String::with_capacity(estimated_capacity);

    build(tree, labels, tree.root_index(), &mut newick);
    newick.push(';');

    newick
}
