use treevec::model::leaf_label_map::LeafLabelMap;
use treevec::model::tree::{Tree, TreeError};

/// Builds the tree ((a,b),c) and returns it with the indices of a, b, c,
/// the internal vertex ab, and the root.
fn three_leaf_tree() -> (Tree, LeafLabelMap, [usize; 5]) {
    let mut tree = Tree::new(3);
    let mut labels = LeafLabelMap::new(3);
    let a = tree.add_leaf(labels.get_or_insert("a"));
    let b = tree.add_leaf(labels.get_or_insert("b"));
    let c = tree.add_leaf(labels.get_or_insert("c"));
    let ab = tree.add_internal((a, b)).unwrap();
    let root = tree.add_internal((ab, c)).unwrap();
    tree.set_root(root).unwrap();
    (tree, labels, [a, b, c, ab, root])
}

#[test]
fn test_building_tree() {
    let (tree, _labels, [a, b, c, ab, root]) = three_leaf_tree();

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_valid());

    // Root
    assert_eq!(tree.root().index(), root);
    assert_eq!(tree.root_index(), root);
    assert!(!tree.root().has_parent());

    // Leaf
    let leaf_b = &tree[b];
    assert!(leaf_b.is_leaf());
    assert_eq!(leaf_b.index(), b);
    assert_eq!(leaf_b.label_index().unwrap(), 1);
    assert_eq!(leaf_b.parent_index(), Some(ab));

    // Internal
    let internal = &tree[ab];
    assert!(internal.is_internal());
    assert_eq!(internal.children(), Some((a, b)));
    assert_eq!(internal.parent_index(), Some(root));

    // Siblings
    assert_eq!(tree.sibling(a), Some(b));
    assert_eq!(tree.sibling(c), Some(ab));
    assert_eq!(tree.sibling(root), None);
}

#[test]
fn test_one_leaf_tree_rooted_at_leaf() {
    let mut tree = Tree::new(1);
    let mut labels = LeafLabelMap::new(1);
    let a = tree.add_leaf(labels.get_or_insert("a"));
    tree.set_root(a).unwrap();

    assert!(tree.is_valid());
    assert_eq!(tree.num_leaves(), 1);
    assert_eq!(tree.num_internal(), 0);
    assert!(tree.root().is_leaf());
}

#[test]
fn test_add_internal_rejects_attached_child() {
    let (mut tree, mut labels, [a, ..]) = three_leaf_tree();
    let d = tree.add_leaf(labels.get_or_insert("d"));

    // `a` already hangs below `ab`
    assert_eq!(tree.add_internal((a, d)), Err(TreeError::AlreadyAttached(a)));
}

#[test]
fn test_set_root_rejects_attached_vertex() {
    let (mut tree, _labels, [_, _, _, ab, root]) = three_leaf_tree();
    assert_eq!(tree.set_root(ab), Err(TreeError::AlreadyAttached(ab)));
    assert_eq!(tree.root_index(), root);
}

#[test]
fn test_traversal_orders() {
    let (tree, _labels, [a, b, c, ab, root]) = three_leaf_tree();

    let post: Vec<_> = tree.post_order_iter().map(|v| v.index()).collect();
    assert_eq!(post, vec![a, b, ab, c, root]);

    let pre: Vec<_> = tree.pre_order_iter().map(|v| v.index()).collect();
    assert_eq!(pre, vec![root, ab, a, b, c]);

    // Restartable: a second traversal yields the same sequence
    let post_again: Vec<_> = tree.post_order_iter().map(|v| v.index()).collect();
    assert_eq!(post, post_again);

    // Subtree traversal
    let sub: Vec<_> = tree.post_order_from(ab).map(|v| v.index()).collect();
    assert_eq!(sub, vec![a, b, ab]);
}

// ============= Detach / subdivide =============

#[test]
fn test_detach_leaf_below_root_promotes_sibling_to_root() {
    let (mut tree, _labels, [a, b, c, ab, _root]) = three_leaf_tree();

    let sibling = tree.detach(c).unwrap();
    assert_eq!(sibling, ab);

    // ab took over as root; c is standalone
    assert_eq!(tree.root_index(), ab);
    assert!(!tree[ab].has_parent());
    assert!(!tree[c].has_parent());
    assert_eq!(tree.num_leaves(), 2);
    assert_eq!(tree[ab].children(), Some((a, b)));
}

#[test]
fn test_detach_leaf_with_grandparent_contracts_parent() {
    let (mut tree, _labels, [a, b, c, _ab, root]) = three_leaf_tree();

    // Removing a contracts ab; b moves up below the root
    let sibling = tree.detach(a).unwrap();
    assert_eq!(sibling, b);

    assert_eq!(tree.root_index(), root);
    assert_eq!(tree[root].children(), Some((b, c)));
    assert_eq!(tree[b].parent_index(), Some(root));
    assert_eq!(tree.num_leaves(), 2);
}

#[test]
fn test_detach_root_fails() {
    let (mut tree, _labels, [.., root]) = three_leaf_tree();
    assert!(matches!(
        tree.detach(root),
        Err(TreeError::InvalidOperation(_))
    ));
}

#[test]
fn test_subdivide_inserts_sister_leaf() {
    let (mut tree, mut labels, [a, _b, _c, ab, root]) = three_leaf_tree();

    let d_label = labels.get_or_insert("d");
    let (internal, d) = tree.subdivide(a, d_label);

    // New internal vertex sits between ab and a, with d as the other child
    assert_eq!(tree[internal].parent_index(), Some(ab));
    assert_eq!(tree[internal].children(), Some((a, d)));
    assert_eq!(tree[a].parent_index(), Some(internal));
    assert_eq!(tree[d].parent_index(), Some(internal));
    assert_eq!(tree.root_index(), root);
    assert_eq!(tree.num_leaves(), 4);
}

#[test]
fn test_subdivide_above_root_reroots() {
    let (mut tree, mut labels, [.., root]) = three_leaf_tree();

    let d_label = labels.get_or_insert("d");
    let (internal, d) = tree.subdivide(root, d_label);

    assert_eq!(tree.root_index(), internal);
    assert_eq!(tree[internal].children(), Some((root, d)));
    assert_eq!(tree[root].parent_index(), Some(internal));
    assert_eq!(tree.num_leaves(), 4);
}

#[test]
fn test_subdivide_then_detach_restores_structure() {
    let (mut tree, mut labels, [a, b, _c, ab, root]) = three_leaf_tree();

    let d_label = labels.get_or_insert("d");
    let (_, d) = tree.subdivide(a, d_label);
    let sibling = tree.detach(d).unwrap();

    assert_eq!(sibling, a);
    assert_eq!(tree[ab].children(), Some((a, b)));
    assert_eq!(tree[a].parent_index(), Some(ab));
    assert_eq!(tree.root_index(), root);
    assert_eq!(tree.num_leaves(), 3);
}

#[test]
#[should_panic]
fn test_get_root_panics_on_empty_tree() {
    let tree = Tree::new(2);
    tree.root(); // Should panic
}

#[test]
#[should_panic]
fn test_get_vertex_out_of_bounds() {
    let tree = Tree::new(2);
    let _ = &tree[55];
}

// ============= LeafLabelMap Tests =============

#[test]
fn test_get_or_insert_new_label() {
    let mut map = LeafLabelMap::new(5);
    let index_wrybill = map.get_or_insert("Anarhynchus frontalis");
    assert_eq!(index_wrybill, 0);
    assert!(map.contains_label("Anarhynchus frontalis"));
}

#[test]
fn test_get_or_insert_increments_index() {
    let mut map = LeafLabelMap::new(5);
    let index_kaki = map.get_or_insert("Himantopus novaezelandiae");
    let index_pied = map.get_or_insert("Himantopus leucocephalus");
    assert_eq!(index_kaki, 0);
    assert_eq!(index_pied, 1);
    assert_eq!(map.num_labels(), 2);
}

#[test]
fn test_get_or_insert_returns_same_index_for_duplicate() {
    let mut map = LeafLabelMap::new(5);
    let index_kakapo = map.get_or_insert("Strigops habroptilus");
    let index_kea = map.get_or_insert("Nestor notabilis");
    let index_kaka = map.get_or_insert("Nestor meridionalis");
    let index_popoka = map.get_or_insert("Strigops habroptilus");

    assert_eq!(index_kakapo, index_popoka);
    assert_ne!(index_kakapo, index_kea);
    assert_ne!(index_kakapo, index_kaka);
    assert_eq!(map.num_labels(), 3);
}

#[test]
fn test_get_label_returns_correct_label() {
    let mut map = LeafLabelMap::new(5);
    let index_rock_wren = map.get_or_insert("Xenicus gilviventris");
    assert_eq!(map.get_label(index_rock_wren), Some("Xenicus gilviventris"));
}

#[test]
fn test_get_label_returns_none_for_invalid_index() {
    let map = LeafLabelMap::new(5);
    assert_eq!(map.get_label(0), None);
}
