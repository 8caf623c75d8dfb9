//! Binary search tree driver
//!
//! Insert and search run the real recursive descent first, recording the
//! values visited along the way, and only then replay that path as
//! snapshots. Highlights are therefore reconstructed from the recorded path
//! rather than interleaved with the mutation.
//!
//! Every snapshot is projected from a [`TreeArena`], a layout pass that
//! assigns node and edge ids afresh. An insertion changes the tree's shape,
//! so its final snapshot comes from a new pass whose ids are unrelated to the
//! ids of the snapshots before it.

use crate::entity::project::{BinaryNode, TreeArena};
use crate::entity::Highlight;
use crate::snapshot::TraceRecorder;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct Node {
    value: i64,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(value: i64) -> Self {
        Node {
            value,
            left: None,
            right: None,
        }
    }
}

impl BinaryNode for Node {
    fn value(&self) -> i64 {
        self.value
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// Binary search tree without duplicates, kept across runs of the tree family
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    root: Option<Box<Node>>,
    len: usize,
}

impl SearchTree {
    pub fn new() -> Self {
        SearchTree { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Insert without tracing. Returns `false` for a duplicate.
    pub fn insert(&mut self, value: i64) -> bool {
        let mut path = Vec::new();
        self.insert_with_path(value, &mut path)
    }

    pub fn contains(&self, value: i64) -> bool {
        let mut path = Vec::new();
        find(self.root.as_deref(), value, &mut path)
    }

    /// Values in ascending order
    pub fn values(&self) -> Vec<i64> {
        fn walk(node: Option<&Node>, out: &mut Vec<i64>) {
            if let Some(node) = node {
                walk(node.left.as_deref(), out);
                out.push(node.value);
                walk(node.right.as_deref(), out);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        walk(self.root.as_deref(), &mut out);
        out
    }

    fn insert_with_path(&mut self, value: i64, path: &mut Vec<i64>) -> bool {
        let inserted = insert_at(&mut self.root, value, path);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn layout(&self) -> TreeArena {
        TreeArena::build(self.root.as_deref())
    }
}

/// Descend from `slot`, recording every value compared against
fn insert_at(slot: &mut Option<Box<Node>>, value: i64, path: &mut Vec<i64>) -> bool {
    let mut slot = slot;
    while let Some(node) = slot {
        path.push(node.value);
        slot = match value.cmp(&node.value) {
            Ordering::Less => &mut node.left,
            Ordering::Greater => &mut node.right,
            Ordering::Equal => return false,
        };
    }
    *slot = Some(Box::new(Node::new(value)));
    true
}

fn find(node: Option<&Node>, value: i64, path: &mut Vec<i64>) -> bool {
    let mut current = node;
    while let Some(node) = current {
        path.push(node.value);
        current = match value.cmp(&node.value) {
            Ordering::Equal => return true,
            Ordering::Less => node.left.as_deref(),
            Ordering::Greater => node.right.as_deref(),
        };
    }
    false
}

/// Record one snapshot per path entry on a fixed layout pass: the node being
/// looked at, and the edge that led to it from the previous path node
fn replay_path(
    rec: &mut TraceRecorder,
    arena: &TreeArena,
    path: &[i64],
    message: impl Fn(i64) -> String,
) {
    for (i, &value) in path.iter().enumerate() {
        let node = arena.id_of(value);
        let edge = match (i.checked_sub(1).and_then(|p| arena.id_of(path[p])), node) {
            (Some(parent), Some(child)) => arena.edge_between(parent, child),
            _ => None,
        };

        let nodes: Vec<usize> = node.into_iter().collect();
        let edges: Vec<usize> = edge.into_iter().collect();
        rec.record(
            arena.project(Highlight::Ids(&nodes), Highlight::Ids(&edges)),
            message(value),
        );
    }
}

/// Insert `value`, then replay the descent. Returns `false` for a duplicate.
pub fn insert(rec: &mut TraceRecorder, tree: &mut SearchTree, value: i64) -> bool {
    let before = tree.layout();
    rec.record(
        before.project(Highlight::None, Highlight::None),
        format!("Starting BST insertion for value {}", value),
    );

    let mut path = Vec::new();
    let inserted = tree.insert_with_path(value, &mut path);

    replay_path(rec, &before, &path, |v| format!("Comparing with node {}", v));

    // Shape changed: new pass, new ids
    let after = tree.layout();
    let target: Vec<usize> = after.id_of(value).into_iter().collect();
    let message = if inserted {
        format!("Inserted {} into the tree", value)
    } else {
        format!("Value {} is already in the tree", value)
    };
    rec.record(after.project(Highlight::Ids(&target), Highlight::None), message);

    inserted
}

/// Search for `value` and replay the descent. The tree is not modified.
pub fn search(rec: &mut TraceRecorder, tree: &SearchTree, value: i64) -> bool {
    let arena = tree.layout();
    rec.record(
        arena.project(Highlight::None, Highlight::None),
        format!("Starting BST search for value {}", value),
    );

    let mut path = Vec::new();
    let found = find(tree.root.as_deref(), value, &mut path);

    replay_path(rec, &arena, &path, |v| {
        if v == value {
            format!("Found value {} at this node", value)
        } else {
            let side = if value < v { "left" } else { "right" };
            format!("Checking node {}, moving to {}", v, side)
        }
    });

    let message = if found {
        format!("Value {} found in the tree", value)
    } else {
        format!("Value {} not found in the tree", value)
    };
    rec.repeat(message);

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untraced_insert_keeps_order() {
        let mut tree = SearchTree::new();
        for v in [50, 25, 75, 15, 60] {
            assert!(tree.insert(v));
        }
        assert!(!tree.insert(25));
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.values(), vec![15, 25, 50, 60, 75]);
        assert!(tree.contains(60));
        assert!(!tree.contains(61));
    }

    #[test]
    fn test_insert_into_empty_tree() {
        let mut tree = SearchTree::new();
        let mut rec = TraceRecorder::new();
        assert!(insert(&mut rec, &mut tree, 50));

        let trace = rec.finalize();
        // initial (empty) + final, no path
        assert_eq!(trace.step_count(), 2);
        assert!(trace.step_at(0).entities.is_empty());
        let last = trace.step_at(1);
        assert_eq!(last.entities.len(), 1);
        assert!(last.entities[0].is_highlighted());
    }

    #[test]
    fn test_path_edges_are_highlighted() {
        let mut tree = SearchTree::new();
        for v in [50, 25, 15] {
            tree.insert(v);
        }
        let mut rec = TraceRecorder::new();
        assert!(search(&mut rec, &tree, 15));
        let trace = rec.finalize();

        // initial, 50, 25, 15, final
        assert_eq!(trace.step_count(), 5);
        let at_25 = trace.step_at(2);
        let lit_edges: Vec<_> = at_25
            .highlighted()
            .filter_map(|e| e.endpoints())
            .collect();
        // 50 is arena id 0, 25 is arena id 1
        assert_eq!(lit_edges, vec![(0, 1)]);
        assert_eq!(trace.step_at(3).message, "Found value 15 at this node");
    }
}
