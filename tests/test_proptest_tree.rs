//! Property-based tests for the R-tree.


use boxtree::{Rectangle, SplitAlgorithm, Tree};
use proptest::prelude::*;
use shared::CAPACITY;

prop_compose! {
    fn arb_rectangle()(
        x in -200.0..200.0,
        y in -200.0..200.0,
        w in 0.1..50.0,
        h in 0.1..50.0,
    ) -> Rectangle {
        Rectangle::new(x, y, x + w, y + h).unwrap()
    }
}

fn arb_algorithm() -> impl Strategy<Value = SplitAlgorithm> {
    prop_oneof![
        Just(SplitAlgorithm::Quadratic),
        Just(SplitAlgorithm::Linear),
        Just(SplitAlgorithm::RStar),
    ]
}

proptest! {
    #[test]
    fn test_search_by_own_box_always_finds_the_point(
        rects in prop::collection::vec(arb_rectangle(), 1..60),
        algorithm in arb_algorithm(),
    ) {
        let mut tree = Tree::new(CAPACITY, algorithm).unwrap();
        for (i, r) in rects.iter().enumerate() {
            tree.insert(*r, i);
        }
        for (i, r) in rects.iter().enumerate() {
            let hits = tree.search(r);
            prop_assert!(hits.contains(&&i));
        }
    }

    #[test]
    fn test_window_search_only_returns_intersecting_entries(
        rects in prop::collection::vec(arb_rectangle(), 1..60),
        query in arb_rectangle(),
        algorithm in arb_algorithm(),
    ) {
        let mut tree = Tree::new(CAPACITY, algorithm).unwrap();
        for (i, r) in rects.iter().enumerate() {
            tree.insert(*r, i);
        }
        let hits = tree.search(&query);
        for id in hits {
            prop_assert!(rects[*id].intersects(&query));
        }
    }

    #[test]
    fn test_delete_then_search_never_finds_deleted_entry(
        rects in prop::collection::vec(arb_rectangle(), 1..40),
        algorithm in arb_algorithm(),
    ) {
        let mut tree = Tree::new(CAPACITY, algorithm).unwrap();
        for (i, r) in rects.iter().enumerate() {
            tree.insert(*r, i);
        }
        let (victim_box, victim_id) = (rects[0], 0usize);
        prop_assert!(tree.delete(&victim_box, &victim_id));
        let hits = tree.search(&victim_box);
        prop_assert!(!hits.contains(&&victim_id));
        prop_assert_eq!(tree.len(), rects.len() - 1);
    }

    #[test]
    fn test_nearest_distance_matches_some_entry_in_tree(
        rects in prop::collection::vec(arb_rectangle(), 1..40),
        target_x in -200.0..200.0,
        target_y in -200.0..200.0,
        algorithm in arb_algorithm(),
    ) {
        let mut tree = Tree::new(CAPACITY, algorithm).unwrap();
        for (i, r) in rects.iter().enumerate() {
            tree.insert(*r, i);
        }
        let (found, dist) = tree.nearest(target_x, target_y);
        prop_assert!(found.is_some());
        let expected_min = rects
            .iter()
            .map(|r| r.mbr_distance(target_x, target_y))
            .fold(f64::INFINITY, f64::min);
        prop_assert!((dist - expected_min).abs() < 1e-6);
    }

    #[test]
    fn test_node_fill_never_exceeds_capacity(
        rects in prop::collection::vec(arb_rectangle(), 1..80),
        algorithm in arb_algorithm(),
    ) {
        let mut tree = Tree::new(CAPACITY, algorithm).unwrap();
        for (i, r) in rects.iter().enumerate() {
            tree.insert(*r, i);
        }
        prop_assert!(tree.stats().average_node_fill <= CAPACITY as f64);
    }
}
