use boxtree::{Rectangle, SplitAlgorithm, Tree};
use tracing::info;

fn main() {
    test_rtree();
}

fn test_rtree() {
    println!("{}", "=".repeat(100));
    println!("R-Tree Example");

    let mut tree = Tree::new(4, SplitAlgorithm::RStar).expect("4 is a valid capacity");

    info!("Inserting rectangles into the tree");
    tree.insert(Rectangle::new(1.0, 2.0, 2.0, 3.0).unwrap(), "A");
    tree.insert(Rectangle::new(3.0, 4.0, 4.0, 5.0).unwrap(), "B");
    tree.insert(Rectangle::new(2.0, 3.0, 3.0, 4.0).unwrap(), "C");
    tree.insert(Rectangle::new(5.0, 6.0, 6.0, 7.0).unwrap(), "D");
    tree.insert(Rectangle::new(7.0, 8.0, 8.0, 9.0).unwrap(), "E");

    let query = Rectangle::new(0.0, 0.0, 4.0, 4.0).unwrap();
    info!("Searching window {:?}", query);
    let found = tree.search(&query);
    println!("Found in window: {found:?}");

    let (nearest, dist) = tree.nearest(0.0, 0.0);
    println!("Nearest to (0, 0): {nearest:?} at distance {dist:.3}");

    info!("Deleting entry B");
    tree.delete(&Rectangle::new(3.0, 4.0, 4.0, 5.0).unwrap(), &"B");

    let stats = tree.stats();
    println!(
        "Stats: {} nodes, {} leaves, height {}, avg fill {:.2}",
        stats.node_count, stats.leaf_count, stats.height, stats.average_node_fill
    );

    #[cfg(feature = "serde")]
    {
        let path = std::env::temp_dir().join("boxtree_demo.bin");
        tree.save(&path).expect("save should succeed");
        let reloaded: Tree<&str> =
            Tree::load(&path, 4, SplitAlgorithm::RStar).expect("load should succeed");
        println!("Reloaded tree holds {} entries", reloaded.len());
        let _ = std::fs::remove_file(&path);
    }
}
