//! Entity projector
//!
//! Converts a driver's working structure into a fresh entity collection.
//! Positions always come from [`super::layout`]; the projector never keeps
//! state between calls, except for [`TreeArena`], which *is* one layout pass.

use super::layout;
use super::{Entity, Highlight, Position};
use rustc_hash::FxHashMap;

/// DP array: one cell per index, laid out in a row
pub fn project_array(values: &[i64], highlight: Highlight<'_>) -> Vec<Entity> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| Entity::ArrayCell {
            id: i,
            value,
            position: layout::array_cell(i),
            highlighted: highlight.contains(i),
            swapping: false,
        })
        .collect()
}

/// Sorting array: one bar per index. `swapping` marks the highlighted bars
/// as the pair about to be exchanged.
pub fn project_bars(values: &[i64], highlight: Highlight<'_>, swapping: bool) -> Vec<Entity> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let highlighted = highlight.contains(i);
            Entity::ArrayCell {
                id: i,
                value,
                position: layout::array_bar(i, value),
                highlighted,
                swapping: swapping && highlighted,
            }
        })
        .collect()
}

/// Row-major id of a table cell
pub fn table_id(row: usize, col: usize, cols: usize) -> usize {
    row * cols + col
}

/// DP table: one cell per `(row, col)`, ids in row-major order.
/// Rows are expected to share one width.
pub fn project_table(table: &[Vec<i64>], highlight: Highlight<'_>) -> Vec<Entity> {
    let cols = table.first().map_or(0, Vec::len);
    let mut cells = Vec::with_capacity(table.len() * cols);

    for (row, values) in table.iter().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            let id = table_id(row, col, cols);
            cells.push(Entity::TableCell {
                id,
                row,
                col,
                value,
                position: layout::table_cell(row, col),
                highlighted: highlight.contains(id),
                swapping: false,
            });
        }
    }

    cells
}

/// A directed half of an undirected graph edge, as the projector sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSpec {
    pub source: usize,
    pub target: usize,
    pub weight: i64,
}

/// Graph: nodes first (in the given order), then edges.
///
/// `edge_active` decides per directed `(source, target)` pair; overlays are
/// rebuilt from scratch on every call.
pub fn project_graph(
    nodes: &[usize],
    edges: &[EdgeSpec],
    node_highlight: Highlight<'_>,
    edge_active: &dyn Fn(usize, usize) -> bool,
) -> Vec<Entity> {
    let count = nodes.len();
    let mut positions: FxHashMap<usize, Position> = FxHashMap::default();
    let mut entities = Vec::with_capacity(count + edges.len());

    for (index, &node) in nodes.iter().enumerate() {
        let position = layout::graph_node(index, count);
        positions.insert(node, position);
        entities.push(Entity::GraphNode {
            id: node,
            value: node as i64,
            position,
            highlighted: node_highlight.contains(node),
        });
    }

    for (id, edge) in edges.iter().enumerate() {
        let from = positions.get(&edge.source).copied().unwrap_or_default();
        let to = positions.get(&edge.target).copied().unwrap_or_default();
        entities.push(Entity::GraphEdge {
            id,
            source: edge.source,
            target: edge.target,
            weight: edge.weight,
            position: from.midpoint(to),
            highlighted: edge_active(edge.source, edge.target),
        });
    }

    entities
}

/// Read-only view of a binary tree node, enough to lay the tree out
pub trait BinaryNode {
    fn value(&self) -> i64;
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;
}

/// One node placed by a layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaNode {
    pub value: i64,
    pub position: Position,
}

/// The result of one tree layout pass.
///
/// Node ids are pre-order indices into this arena and edge ids are indices
/// into its edge list. A new pass after any mutation produces a new arena with
/// unrelated ids; nothing may carry ids from one arena to another.
#[derive(Debug, Clone, Default)]
pub struct TreeArena {
    nodes: Vec<ArenaNode>,
    edges: Vec<(usize, usize)>,
    by_value: FxHashMap<i64, usize>,
}

impl TreeArena {
    /// Lay out the tree rooted at `root` from scratch
    pub fn build<N: BinaryNode>(root: Option<&N>) -> Self {
        let mut arena = TreeArena::default();
        if let Some(node) = root {
            arena.place(node, layout::TREE_ROOT, layout::TREE_SPACING);
        }
        arena
    }

    fn place<N: BinaryNode>(&mut self, node: &N, position: Position, spacing: f64) -> usize {
        let id = self.nodes.len();
        self.nodes.push(ArenaNode {
            value: node.value(),
            position,
        });
        self.by_value.insert(node.value(), id);

        let (left_pos, right_pos, next) = layout::tree_children(position, spacing);
        if let Some(left) = node.left() {
            let child = self.place(left, left_pos, next);
            self.edges.push((id, child));
        }
        if let Some(right) = node.right() {
            let child = self.place(right, right_pos, next);
            self.edges.push((id, child));
        }
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Arena id of the node holding `value` in this pass
    pub fn id_of(&self, value: i64) -> Option<usize> {
        self.by_value.get(&value).copied()
    }

    pub fn node(&self, id: usize) -> Option<&ArenaNode> {
        self.nodes.get(id)
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Entities for this pass: nodes ordered by value, then edges in
    /// creation order. Both selectors take arena ids.
    pub fn project(&self, nodes: Highlight<'_>, edges: Highlight<'_>) -> Vec<Entity> {
        let mut order: Vec<usize> = (0..self.nodes.len()).collect();
        order.sort_by_key(|&id| self.nodes[id].value);

        let mut entities = Vec::with_capacity(self.nodes.len() + self.edges.len());
        for id in order {
            let node = &self.nodes[id];
            entities.push(Entity::TreeNode {
                id,
                value: node.value,
                position: node.position,
                highlighted: nodes.contains(id),
            });
        }

        for (edge_id, &(source, target)) in self.edges.iter().enumerate() {
            entities.push(Entity::TreeEdge {
                id: edge_id,
                source,
                target,
                position: self.nodes[source]
                    .position
                    .midpoint(self.nodes[target].position),
                highlighted: edges.contains(edge_id),
            });
        }

        entities
    }

    /// Edge id for the parent/child pair, if this pass has it
    pub fn edge_between(&self, source: usize, target: usize) -> Option<usize> {
        self.edges
            .iter()
            .position(|&(s, t)| s == source && t == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leafy {
        value: i64,
        left: Option<Box<Leafy>>,
        right: Option<Box<Leafy>>,
    }

    impl BinaryNode for Leafy {
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

    fn leaf(value: i64) -> Option<Box<Leafy>> {
        Some(Box::new(Leafy {
            value,
            left: None,
            right: None,
        }))
    }

    #[test]
    fn test_table_ids_are_row_major() {
        let table = vec![vec![0, 0, 0], vec![0, 5, 0]];
        let target = table_id(1, 1, 3);
        let cells = project_table(&table, Highlight::Ids(&[target]));
        assert_eq!(cells.len(), 6);
        assert_eq!(target, 4);
        assert!(cells[4].is_highlighted());
        assert_eq!(cells[4].value(), Some(5));
        assert_eq!(cells.iter().filter(|c| c.is_highlighted()).count(), 1);
    }

    #[test]
    fn test_bars_only_swap_highlighted() {
        let bars = project_bars(&[3, 1, 2], Highlight::Ids(&[0, 2]), true);
        assert!(bars[0].is_swapping());
        assert!(!bars[1].is_swapping());
        assert!(bars[2].is_swapping());
    }

    #[test]
    fn test_tree_arena_preorder_ids() {
        let root = Leafy {
            value: 50,
            left: Some(Box::new(Leafy {
                value: 25,
                left: leaf(15),
                right: None,
            })),
            right: leaf(75),
        };
        let arena = TreeArena::build(Some(&root));

        assert_eq!(arena.len(), 4);
        assert_eq!(arena.id_of(50), Some(0));
        assert_eq!(arena.id_of(25), Some(1));
        assert_eq!(arena.id_of(15), Some(2));
        assert_eq!(arena.id_of(75), Some(3));
        // child edges are recorded once the child subtree is placed
        assert_eq!(arena.edges(), &[(1, 2), (0, 1), (0, 3)]);
        assert_eq!(arena.node(2).map(|n| n.position), Some(Position::new(250.0, 260.0)));

        let entities = arena.project(Highlight::Ids(&[2]), Highlight::None);
        let values: Vec<i64> = entities.iter().take(4).filter_map(Entity::value).collect();
        assert_eq!(values, vec![15, 25, 50, 75]);
        assert!(entities[0].is_highlighted());
    }

    #[test]
    fn test_empty_tree_projects_nothing() {
        let arena = TreeArena::build::<Leafy>(None);
        assert!(arena.is_empty());
        assert!(arena.project(Highlight::None, Highlight::None).is_empty());
    }
}
