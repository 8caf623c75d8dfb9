// Integration tests for the binary search tree tracer

use algotrace::engine::{Tracer, TreeTracer};
use algotrace::entity::{Entity, EntityKind};
use algotrace::snapshot::Snapshot;

fn sample_tree() -> TreeTracer {
    let mut tracer = TreeTracer::new();
    assert_eq!(tracer.preload(&[50, 25, 75, 15]), 4);
    tracer
}

fn node_ids(snapshot: &Snapshot) -> Vec<(i64, usize)> {
    snapshot
        .entities
        .iter()
        .filter(|e| e.kind() == EntityKind::TreeNode)
        .map(|e| (e.value().unwrap(), e.id()))
        .collect()
}

fn highlighted_values(snapshot: &Snapshot) -> Vec<i64> {
    snapshot
        .highlighted()
        .filter(|e| e.kind() == EntityKind::TreeNode)
        .filter_map(Entity::value)
        .collect()
}

#[test]
fn test_search_found() {
    let tracer = sample_tree();
    let trace = tracer.search(15);

    let messages: Vec<&str> = trace.iter().map(|s| s.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Starting BST search for value 15",
            "Checking node 50, moving to left",
            "Checking node 25, moving to left",
            "Found value 15 at this node",
            "Value 15 found in the tree",
        ]
    );
    assert_eq!(highlighted_values(&trace.step_at(3)), vec![15]);
    // Final snapshot keeps the last highlights
    assert_eq!(trace.step_at(4).entities, trace.step_at(3).entities);
}

#[test]
fn test_search_not_found_leaves_tree_alone() {
    let tracer = sample_tree();
    let trace = tracer.search(99);

    assert_eq!(trace.step_count(), 4);
    assert_eq!(trace.step_at(2).message, "Checking node 75, moving to right");
    assert_eq!(trace.last().unwrap().message, "Value 99 not found in the tree");
    assert_eq!(tracer.tree().values(), vec![15, 25, 50, 75]);
}

#[test]
fn test_insert_reassigns_identity() {
    let mut tracer = sample_tree();
    let trace = tracer.insert(10);

    // initial + path 50, 25, 15 + final
    assert_eq!(trace.step_count(), 5);
    assert_eq!(trace.step_at(0).message, "Starting BST insertion for value 10");
    assert_eq!(trace.step_at(3).message, "Comparing with node 15");

    let before = trace.step_at(0);
    assert_eq!(node_ids(&before), vec![(15, 2), (25, 1), (50, 0), (75, 3)]);

    let last = trace.last().unwrap();
    assert_eq!(last.message, "Inserted 10 into the tree");
    // Fresh layout pass: 10 takes pre-order slot 3 and 75 moves to 4
    assert_eq!(
        node_ids(last),
        vec![(10, 3), (15, 2), (25, 1), (50, 0), (75, 4)]
    );
    assert_eq!(highlighted_values(last), vec![10]);
    assert_eq!(tracer.tree().len(), 5);
}

#[test]
fn test_insert_path_highlights_parent_edge() {
    let mut tracer = sample_tree();
    let trace = tracer.insert(20);

    let at_25 = trace.step_at(2);
    assert_eq!(at_25.message, "Comparing with node 25");
    let edges: Vec<(usize, usize)> = at_25
        .highlighted()
        .filter_map(Entity::endpoints)
        .collect();
    assert_eq!(edges, vec![(0, 1)]);

    // The root has no incoming edge
    let at_root = trace.step_at(1);
    assert!(at_root.highlighted().all(|e| e.kind() == EntityKind::TreeNode));
}

#[test]
fn test_duplicate_insert_is_reported() {
    let mut tracer = sample_tree();
    let trace = tracer.insert(25);

    assert_eq!(trace.step_count(), 4);
    let last = trace.last().unwrap();
    assert_eq!(last.message, "Value 25 is already in the tree");
    assert_eq!(highlighted_values(last), vec![25]);
    assert_eq!(tracer.tree().len(), 4);
}

#[test]
fn test_insert_into_empty_tree() {
    let mut tracer = TreeTracer::new();
    let trace = tracer.run(0, 42, None).unwrap();
    assert_eq!(trace.step_count(), 2);
    assert!(trace.step_at(0).entities.is_empty());
    assert_eq!(node_ids(&trace.step_at(1)), vec![(42, 0)]);

    // The tree persists between runs
    let search = tracer.run(1, 42, None).unwrap();
    assert_eq!(search.last().unwrap().message, "Value 42 found in the tree");
    assert!(tracer.run(2, 42, None).is_err());
}

#[test]
fn test_tree_layout_positions() {
    let tracer = sample_tree();
    let trace = tracer.search(50);
    let positions: Vec<(i64, f64, f64)> = trace
        .step_at(0)
        .entities
        .iter()
        .filter(|e| e.kind() == EntityKind::TreeNode)
        .map(|e| (e.value().unwrap(), e.position().x, e.position().y))
        .collect();
    assert_eq!(
        positions,
        vec![
            (15, 250.0, 260.0),
            (25, 300.0, 160.0),
            (50, 400.0, 60.0),
            (75, 500.0, 160.0),
        ]
    );
}
