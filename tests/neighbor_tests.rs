use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use test_log::test;
use treevec::metric::hamming;
use treevec::neighbor::{
    lazy_random_neighbor, neighborhood, random_neighbor, random_tree, random_vector,
};
use treevec::vector::validate;

#[test]
fn test_neighborhood_size() {
    // (n - 1)(n - 2) neighbors for n leaves
    assert_eq!(neighborhood(&[]).count(), 0);
    assert_eq!(neighborhood(&[0]).count(), 0);
    assert_eq!(neighborhood(&[0, 0]).count(), 2);
    assert_eq!(neighborhood(&[0, 1, -2]).count(), 6);
    assert_eq!(neighborhood(&[0, 0, 0, 0, 0]).count(), 20);
}

#[test]
fn test_neighborhood_members_differ_in_one_position() {
    let center = vec![0, 1, -2, 3];
    let neighbors: Vec<_> = neighborhood(&center).collect();
    assert_eq!(neighbors.len(), 12);

    let unique: HashSet<_> = neighbors.iter().collect();
    assert_eq!(unique.len(), neighbors.len());

    for neighbor in &neighbors {
        validate(neighbor).unwrap();
        assert_eq!(hamming(neighbor, &center).unwrap(), 1);
    }
}

#[test]
fn test_neighborhood_three_leaves_explicit() {
    let neighbors: HashSet<_> = neighborhood(&[0, 1]).collect();
    let expected: HashSet<_> = [vec![0, -1], vec![0, 0]].into_iter().collect();
    assert_eq!(neighbors, expected);
}

// ============= Random sampling =============

#[test]
fn test_random_vector_is_valid() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in [1, 2, 5, 40] {
        for _ in 0..100 {
            let vector = random_vector(n, &mut rng);
            assert_eq!(vector.len(), n - 1);
            validate(&vector).unwrap();
        }
    }
}

#[test]
fn test_random_vector_reproducible_under_seed() {
    let a = random_vector(20, &mut StdRng::seed_from_u64(99));
    let b = random_vector(20, &mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}

#[test]
fn test_random_vector_covers_full_range() {
    // Position 1 only holds -1, 0, 1; all three must show up over 200 draws
    let mut rng = StdRng::seed_from_u64(5);
    let seen: HashSet<i32> = (0..200).map(|_| random_vector(3, &mut rng)[1]).collect();
    assert_eq!(seen, HashSet::from([-1, 0, 1]));
}

#[test]
fn test_random_tree_has_requested_leaves() {
    let mut rng = StdRng::seed_from_u64(3);
    for n in [1, 2, 7, 25] {
        let (tree, labels) = random_tree(n, &mut rng).unwrap();
        assert_eq!(tree.num_leaves(), n);
        assert_eq!(labels.num_labels(), n);
        assert!(tree.is_valid());
    }
}

// ============= Random neighbors =============

#[test]
fn test_random_neighbor_none_for_tiny_vectors() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(random_neighbor(&[], &mut rng), None);
    assert_eq!(random_neighbor(&[0], &mut rng), None);
}

#[test]
fn test_random_neighbor_always_at_distance_one() {
    let mut rng = StdRng::seed_from_u64(17);
    let centers = [vec![0, 0], vec![0, 1, -2], vec![0, -1, 2, -3, 4]];
    for center in &centers {
        for _ in 0..300 {
            let neighbor = random_neighbor(center, &mut rng).unwrap();
            validate(&neighbor).unwrap();
            assert_eq!(hamming(&neighbor, center).unwrap(), 1, "center {center:?}");
        }
    }
}

#[test]
fn test_random_neighbor_reaches_whole_neighborhood() {
    let center = vec![0, 1, -2];
    let full: HashSet<_> = neighborhood(&center).collect();

    let mut rng = StdRng::seed_from_u64(23);
    let sampled: HashSet<_> = (0..300)
        .map(|_| random_neighbor(&center, &mut rng).unwrap())
        .collect();

    assert_eq!(sampled, full);
}

#[test]
fn test_lazy_random_neighbor_moves_at_most_one_position() {
    let mut rng = StdRng::seed_from_u64(31);
    let center = vec![0, 1, -2, 3];
    for _ in 0..300 {
        let neighbor = lazy_random_neighbor(&center, &mut rng);
        validate(&neighbor).unwrap();
        assert!(hamming(&neighbor, &center).unwrap() <= 1);
    }
}

#[test]
fn test_lazy_random_neighbor_may_stand_still() {
    // A single-entry vector can only map to itself
    let mut rng = StdRng::seed_from_u64(41);
    assert_eq!(lazy_random_neighbor(&[0], &mut rng), vec![0]);
    assert_eq!(lazy_random_neighbor(&[], &mut rng), Vec::<i32>::new());

    // Longer vectors hit the center too, given enough draws
    let center = vec![0, 0];
    let hit_center = (0..200).any(|_| lazy_random_neighbor(&center, &mut rng) == center);
    assert!(hit_center);
}
