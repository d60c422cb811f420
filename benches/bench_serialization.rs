#![allow(dead_code)]
use shared::*;

use boxtree::{SplitAlgorithm, Tree};
use criterion::{criterion_group, Criterion};

fn build_tree() -> Tree<usize> {
    let mut tree = Tree::new(BENCH_NODE_CAPACITY, SplitAlgorithm::RStar).unwrap();
    for (rect, id) in generate_rectangles(BENCH_NUM_INSERT) {
        tree.insert(rect, id);
    }
    tree
}

fn bench_serialize(_c: &mut Criterion) {
    let tree = build_tree();
    let persisted = tree.to_persisted();

    let mut cc = configure_criterion();
    cc.bench_function("tree_serialize", |b| {
        b.iter(|| {
            let _encoded = bincode::serialize(&persisted).unwrap();
        })
    });
}

fn bench_deserialize(_c: &mut Criterion) {
    let tree = build_tree();
    let encoded = bincode::serialize(&tree.to_persisted()).unwrap();

    let mut cc = configure_criterion();
    cc.bench_function("tree_deserialize", |b| {
        b.iter(|| {
            let persisted: boxtree::PersistedTree<usize> =
                bincode::deserialize(&encoded[..]).unwrap();
            let _tree: Tree<usize> = Tree::from_persisted(&persisted);
        })
    });
}

criterion_group!(benches, bench_serialize, bench_deserialize);
