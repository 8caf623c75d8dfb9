//! Undirected weighted graph and its traversal drivers
//!
//! The graph is built through [`Graph::add_node`] and [`Graph::add_edge`].
//! Every undirected edge is stored as two directed halves, so a snapshot
//! carries both `a → b` and `b → a` edge entities and overlays highlight the
//! half that was actually traversed.
//!
//! # Snapshot points
//!
//! - DFS / BFS: one per visited node, plus the initial and final states
//! - Dijkstra: one per settled node and one per strict distance improvement
//!
//! Traversal-edge overlays are rebuilt for every snapshot from the pairs
//! accumulated so far; nothing is diffed.

use crate::entity::project::{project_graph, EdgeSpec};
use crate::entity::{Entity, Highlight};
use crate::errors::EngineError;
use crate::snapshot::TraceRecorder;
use rustc_hash::FxHashSet;
use std::collections::{BTreeSet, VecDeque};

pub type NodeId = usize;
pub type Weight = i64;

/// Outgoing half of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    target: NodeId,
    weight: Weight,
}

/// Adjacency-list graph; node ids are handed out sequentially from 0
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            adjacency: Vec::new(),
        }
    }

    /// The fixed 6-node, 9-edge demonstration graph
    pub fn demo() -> Self {
        let mut graph = Graph::new();
        for _ in 0..6 {
            graph.add_node();
        }
        graph.add_edge(0, 1, 4);
        graph.add_edge(0, 2, 2);
        graph.add_edge(1, 2, 5);
        graph.add_edge(1, 3, 10);
        graph.add_edge(2, 3, 3);
        graph.add_edge(2, 4, 7);
        graph.add_edge(3, 4, 4);
        graph.add_edge(3, 5, 6);
        graph.add_edge(4, 5, 1);
        graph
    }

    pub fn add_node(&mut self) -> NodeId {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    /// Connect two existing nodes in both directions with the same weight.
    /// Returns `false` (and changes nothing) when an endpoint does not exist.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: Weight) -> bool {
        if !self.contains(source) || !self.contains(target) {
            return false;
        }
        self.adjacency[source].push(Edge { target, weight });
        self.adjacency[target].push(Edge {
            target: source,
            weight,
        });
        true
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node < self.adjacency.len()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
    }

    /// Neighbours of `node` in insertion order
    pub fn neighbours(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Weight)> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flatten()
            .map(|e| (e.target, e.weight))
    }

    /// Every directed half, grouped by source node
    pub fn edge_specs(&self) -> Vec<EdgeSpec> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(source, edges)| {
                edges.iter().map(move |e| EdgeSpec {
                    source,
                    target: e.target,
                    weight: e.weight,
                })
            })
            .collect()
    }

    fn check_start(&self, start: NodeId) -> Result<(), EngineError> {
        if self.contains(start) {
            Ok(())
        } else {
            Err(EngineError::UnknownNode {
                node: start,
                count: self.node_count(),
            })
        }
    }
}

/// Cached projector inputs for one run over an unchanging graph
struct GraphView {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeSpec>,
}

impl GraphView {
    fn new(graph: &Graph) -> Self {
        GraphView {
            nodes: (0..graph.node_count()).collect(),
            edges: graph.edge_specs(),
        }
    }

    fn project(&self, current: Option<NodeId>, edge_active: &dyn Fn(usize, usize) -> bool) -> Vec<Entity> {
        match current {
            Some(node) => project_graph(&self.nodes, &self.edges, Highlight::Ids(&[node]), edge_active),
            None => project_graph(&self.nodes, &self.edges, Highlight::None, edge_active),
        }
    }

    /// Highlight the current node and every accumulated traversal pair
    fn project_traversal(&self, current: NodeId, pairs: &[(NodeId, NodeId)]) -> Vec<Entity> {
        self.project(Some(current), &|s, t| pairs.contains(&(s, t)))
    }
}

/// Depth-first search from `start`. Returns the visit order.
///
/// Nodes may be pushed several times; a node is skipped when popped after it
/// was already visited. Neighbours are pushed in reverse so the first-declared
/// neighbour is explored first.
pub fn dfs(rec: &mut TraceRecorder, graph: &Graph, start: NodeId) -> Result<Vec<NodeId>, EngineError> {
    graph.check_start(start)?;
    let view = GraphView::new(graph);

    rec.record(
        view.project(None, &|_, _| false),
        format!("Starting DFS from node {}", start),
    );

    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut order = Vec::new();
    let mut stack = vec![start];
    let mut pairs: Vec<(NodeId, NodeId)> = Vec::new();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        order.push(current);

        rec.record(
            view.project_traversal(current, &pairs),
            format!("Visiting node {}", current),
        );

        let neighbours: Vec<NodeId> = graph.neighbours(current).map(|(n, _)| n).collect();
        for &neighbour in neighbours.iter().rev() {
            if !visited.contains(&neighbour) {
                stack.push(neighbour);
                pairs.push((current, neighbour));
            }
        }
    }

    rec.repeat("DFS traversal complete");
    Ok(order)
}

/// Breadth-first search from `start`. Returns the visit order.
///
/// Nodes are marked when enqueued, so none is queued twice.
pub fn bfs(rec: &mut TraceRecorder, graph: &Graph, start: NodeId) -> Result<Vec<NodeId>, EngineError> {
    graph.check_start(start)?;
    let view = GraphView::new(graph);

    rec.record(
        view.project(None, &|_, _| false),
        format!("Starting BFS from node {}", start),
    );

    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);
    let mut pairs: Vec<(NodeId, NodeId)> = Vec::new();
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        order.push(current);

        rec.record(
            view.project_traversal(current, &pairs),
            format!("Visiting node {}", current),
        );

        for (neighbour, _) in graph.neighbours(current) {
            if visited.insert(neighbour) {
                queue.push_back(neighbour);
                pairs.push((current, neighbour));
            }
        }
    }

    rec.repeat("BFS traversal complete");
    Ok(order)
}

/// Dijkstra's shortest paths from `start`. Returns the distance of every
/// node, `None` when unreachable.
///
/// The next node is found by a linear scan of the unvisited set in ascending
/// id order with a strict `<`, so ties go to the smallest id.
pub fn dijkstra(
    rec: &mut TraceRecorder,
    graph: &Graph,
    start: NodeId,
) -> Result<Vec<Option<Weight>>, EngineError> {
    graph.check_start(start)?;
    let view = GraphView::new(graph);

    rec.record(
        view.project(None, &|_, _| false),
        format!("Starting Dijkstra's algorithm from node {}", start),
    );

    let count = graph.node_count();
    let mut distances: Vec<Option<Weight>> = vec![None; count];
    let mut previous: Vec<Option<NodeId>> = vec![None; count];
    let mut unvisited: BTreeSet<NodeId> = (0..count).collect();
    distances[start] = Some(0);
    let mut last_settled = start;

    loop {
        let mut best: Option<(NodeId, Weight)> = None;
        for &node in &unvisited {
            if let Some(d) = distances[node] {
                if best.map_or(true, |(_, b)| d < b) {
                    best = Some((node, d));
                }
            }
        }
        // Nothing reachable is left
        let Some((current, distance)) = best else {
            break;
        };
        last_settled = current;

        let tree = previous.clone();
        let in_tree = |s: NodeId, t: NodeId| tree[t] == Some(s);
        rec.record(
            view.project(Some(current), &in_tree),
            format!("Processing node {} with distance {}", current, distance),
        );

        unvisited.remove(&current);

        for (neighbour, weight) in graph.neighbours(current) {
            // An overflowing path is never shorter
            let Some(alt) = distance.checked_add(weight) else {
                continue;
            };
            if distances[neighbour].map_or(true, |d| alt < d) {
                distances[neighbour] = Some(alt);
                previous[neighbour] = Some(current);

                let relaxed = |s: NodeId, t: NodeId| in_tree(s, t) || (s == current && t == neighbour);
                rec.record(
                    view.project(Some(current), &relaxed),
                    format!("Updated distance to node {} to {}", neighbour, alt),
                );
            }
        }
    }

    let summary = distances
        .iter()
        .enumerate()
        .map(|(node, d)| match d {
            Some(d) => format!("{}={}", node, d),
            None => format!("{}=inf", node),
        })
        .collect::<Vec<_>>()
        .join(", ");
    rec.record(
        view.project(Some(last_settled), &|s, t| previous[t] == Some(s)),
        format!("Dijkstra's algorithm complete\nDistances: {}", summary),
    );

    Ok(distances)
}
