
use boxtree::{SplitAlgorithm, Tree};
use shared::*;

#[test]
fn test_bulk_load_empty_input_yields_empty_tree() {
    let mut tree: Tree<&str> = Tree::new(CAPACITY, SplitAlgorithm::Quadratic).unwrap();
    tree.bulk_load(Vec::new());
    assert!(tree.is_empty());
    assert_eq!(tree.stats().height, 1);
}

#[test]
fn test_bulk_load_contains_every_item() {
    for algorithm in ALGORITHMS {
        let mut tree = Tree::new(CAPACITY, algorithm).unwrap();
        let items = pseudo_random_rectangles(60, 0xBADC0DE);
        tree.bulk_load(items.clone());
        assert_eq!(tree.len(), items.len());

        for (bbox, id) in &items {
            assert!(tree.search(bbox).contains(&id));
        }
    }
}

#[test]
fn test_bulk_loaded_tree_supports_further_inserts_and_deletes() {
    let mut tree = Tree::new(CAPACITY, SplitAlgorithm::Linear).unwrap();
    let items = pseudo_random_rectangles(20, 42);
    tree.bulk_load(items.clone());

    let extra = rect(500.0, 500.0, 501.0, 501.0);
    tree.insert(extra, 999usize);
    assert_eq!(tree.len(), 21);
    assert!(tree.search(&extra).contains(&&999));

    let (first_bbox, first_id) = items[0];
    assert!(tree.delete(&first_bbox, &first_id));
    assert_eq!(tree.len(), 20);
}

#[test]
fn test_bulk_load_replaces_previous_contents() {
    let mut tree = Tree::new(CAPACITY, SplitAlgorithm::Quadratic).unwrap();
    tree.insert(rect(0.0, 0.0, 1.0, 1.0), "old");
    tree.bulk_load(vec![(rect(9.0, 9.0, 10.0, 10.0), "new")]);
    assert_eq!(tree.len(), 1);
    assert!(tree.search(&rect(0.0, 0.0, 1.0, 1.0)).is_empty());
    assert_eq!(tree.search(&rect(9.0, 9.0, 10.0, 10.0)), vec![&"new"]);
}
