//! Family tracers
//!
//! A tracer owns whatever state its family keeps between runs (the graph, the
//! search tree, configured inputs), builds a fresh [`TraceRecorder`] for every
//! run and hands back the finished [`Trace`]. Rejected input never reaches the
//! caller as an error: the recorder is reset and the run yields an empty trace.
//! Only an unknown selector code is reported as [`EngineError::UnknownAlgorithm`].

use crate::algorithms::graph::{self, Graph, NodeId, Weight};
use crate::algorithms::tree::{self, SearchTree};
use crate::algorithms::{dp, sort};
use crate::algorithms::{DpAlgorithm, Family, GraphAlgorithm, SortAlgorithm, TreeOperation};
use crate::config::{DpSettings, SortSettings};
use crate::errors::EngineError;
use crate::snapshot::{Trace, TraceRecorder};
use std::fmt;
use tracing::{debug, info, warn};

/// Largest random array a selector-based sort run will generate
pub const MAX_RANDOM_SIZE: usize = 200;

/// Largest number of values the search tree will hold
pub const MAX_TREE_SIZE: usize = 512;

/// Integer-selector entry point shared by all families
pub trait Tracer {
    fn family(&self) -> Family;

    /// Run algorithm `selector` of this family.
    ///
    /// `primary` is the family's main parameter (n, capacity, start node,
    /// array size, tree value); `secondary` is only read by sorting (seed).
    fn run(&mut self, selector: i32, primary: i64, secondary: Option<i64>) -> Result<Trace, EngineError>;
}

/// Run `driver` against a fresh recorder and finalize it. A driver error
/// leaves the trace empty.
fn record_with<T: fmt::Debug>(
    family: Family,
    algorithm: &'static str,
    driver: impl FnOnce(&mut TraceRecorder) -> Result<T, EngineError>,
) -> Trace {
    let mut recorder = TraceRecorder::new();
    match driver(&mut recorder) {
        Ok(outcome) => {
            let trace = recorder.finalize();
            info!(%family, algorithm, steps = trace.step_count(), ?outcome, "trace finalized");
            trace
        }
        Err(err) => {
            warn!(%family, algorithm, error = %err, "input rejected, trace left empty");
            recorder.reset();
            recorder.finalize()
        }
    }
}

fn unknown(family: Family, code: i32) -> EngineError {
    EngineError::UnknownAlgorithm { family, code }
}

/// Fibonacci, knapsack and LCS. Knapsack items and LCS strings come from the
/// settings when run through a selector.
#[derive(Debug, Clone, Default)]
pub struct DpTracer {
    settings: DpSettings,
}

impl DpTracer {
    pub fn new(settings: DpSettings) -> Self {
        DpTracer { settings }
    }

    pub fn fibonacci(&self, n: i64) -> Trace {
        debug!(n, "running fibonacci");
        record_with(Family::Dp, "fibonacci", |rec| dp::fibonacci(rec, n))
    }

    pub fn knapsack(&self, values: &[i64], weights: &[i64], capacity: i64) -> Trace {
        debug!(?values, ?weights, capacity, "running knapsack");
        record_with(Family::Dp, "knapsack", |rec| {
            dp::knapsack(rec, values, weights, capacity)
        })
    }

    pub fn lcs(&self, first: &str, second: &str) -> Trace {
        debug!(first, second, "running lcs");
        record_with(Family::Dp, "lcs", |rec| dp::lcs(rec, first, second))
    }
}

impl Tracer for DpTracer {
    fn family(&self) -> Family {
        Family::Dp
    }

    fn run(&mut self, selector: i32, primary: i64, _secondary: Option<i64>) -> Result<Trace, EngineError> {
        let algorithm = DpAlgorithm::from_code(selector).ok_or_else(|| unknown(Family::Dp, selector))?;
        let trace = match algorithm {
            DpAlgorithm::Fibonacci => self.fibonacci(primary),
            DpAlgorithm::Knapsack => self.knapsack(
                &self.settings.knapsack_values,
                &self.settings.knapsack_weights,
                primary,
            ),
            DpAlgorithm::Lcs => self.lcs(&self.settings.lcs_first, &self.settings.lcs_second),
        };
        Ok(trace)
    }
}

/// DFS, BFS and Dijkstra over a graph that persists between runs
#[derive(Debug, Clone, Default)]
pub struct GraphTracer {
    graph: Graph,
}

impl GraphTracer {
    pub fn new() -> Self {
        GraphTracer { graph: Graph::new() }
    }

    pub fn with_graph(graph: Graph) -> Self {
        GraphTracer { graph }
    }

    pub fn add_node(&mut self) -> NodeId {
        self.graph.add_node()
    }

    /// Returns `false` when either endpoint is missing
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: Weight) -> bool {
        let added = self.graph.add_edge(source, target, weight);
        if !added {
            debug!(source, target, "edge dropped, endpoint missing");
        }
        added
    }

    /// Replace the current graph with the demonstration graph
    pub fn load_demo(&mut self) {
        self.graph = Graph::demo();
    }

    pub fn clear(&mut self) {
        self.graph.clear();
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Run `algorithm` from `start`, loading the demo graph first if the
    /// graph has no nodes
    pub fn traverse(&mut self, algorithm: GraphAlgorithm, start: NodeId) -> Trace {
        if self.graph.is_empty() {
            debug!("graph is empty, loading demo graph");
            self.load_demo();
        }
        debug!(?algorithm, start, nodes = self.graph.node_count(), "running graph algorithm");

        let network = &self.graph;
        match algorithm {
            GraphAlgorithm::Dfs => record_with(Family::Graph, "dfs", |rec| graph::dfs(rec, network, start)),
            GraphAlgorithm::Bfs => record_with(Family::Graph, "bfs", |rec| graph::bfs(rec, network, start)),
            GraphAlgorithm::Dijkstra => {
                record_with(Family::Graph, "dijkstra", |rec| graph::dijkstra(rec, network, start))
            }
        }
    }
}

impl Tracer for GraphTracer {
    fn family(&self) -> Family {
        Family::Graph
    }

    fn run(&mut self, selector: i32, primary: i64, _secondary: Option<i64>) -> Result<Trace, EngineError> {
        let algorithm =
            GraphAlgorithm::from_code(selector).ok_or_else(|| unknown(Family::Graph, selector))?;
        // Negative starts can never name a node
        let start = usize::try_from(primary).unwrap_or(usize::MAX);
        Ok(self.traverse(algorithm, start))
    }
}

/// Quicksort, mergesort and heapsort over given or randomly drawn arrays
#[derive(Debug, Clone, Default)]
pub struct SortTracer {
    settings: SortSettings,
}

impl SortTracer {
    pub fn new(settings: SortSettings) -> Self {
        SortTracer { settings }
    }

    pub fn sort(&self, algorithm: SortAlgorithm, values: Vec<i64>) -> Trace {
        debug!(?algorithm, len = values.len(), "running sort");
        record_with(Family::Sort, algorithm.label(), |rec| {
            Ok(sort::sort(rec, algorithm, values))
        })
    }

    /// Array for a selector run: negative `size` means the configured
    /// default, `seed` falls back to the configured one
    pub fn generate(&self, size: i64, seed: Option<u64>) -> Result<Vec<i64>, EngineError> {
        let size = match usize::try_from(size) {
            Ok(size) => size,
            Err(_) => self.settings.default_size,
        };
        if size > MAX_RANDOM_SIZE {
            return Err(EngineError::invalid(
                "sort",
                format!("array size {} exceeds {}", size, MAX_RANDOM_SIZE),
            ));
        }
        if self.settings.min_value > self.settings.max_value {
            return Err(EngineError::invalid(
                "sort",
                format!(
                    "value range {}..={} is empty",
                    self.settings.min_value, self.settings.max_value
                ),
            ));
        }
        let seed = seed.or(self.settings.seed);
        Ok(sort::random_values(
            size,
            self.settings.min_value,
            self.settings.max_value,
            seed,
        ))
    }
}

impl Tracer for SortTracer {
    fn family(&self) -> Family {
        Family::Sort
    }

    fn run(&mut self, selector: i32, primary: i64, secondary: Option<i64>) -> Result<Trace, EngineError> {
        let algorithm =
            SortAlgorithm::from_code(selector).ok_or_else(|| unknown(Family::Sort, selector))?;
        let seed = secondary.map(|s| s as u64);
        match self.generate(primary, seed) {
            Ok(values) => Ok(self.sort(algorithm, values)),
            Err(err) => {
                warn!(error = %err, "input rejected, trace left empty");
                Ok(Trace::default())
            }
        }
    }
}

/// Insert and search on a search tree that persists between runs
#[derive(Debug, Clone, Default)]
pub struct TreeTracer {
    tree: SearchTree,
}

impl TreeTracer {
    pub fn new() -> Self {
        TreeTracer { tree: SearchTree::new() }
    }

    /// Insert `values` without recording anything. Returns how many were new.
    /// Values past [`MAX_TREE_SIZE`] are dropped.
    pub fn preload(&mut self, values: &[i64]) -> usize {
        let tree = &mut self.tree;
        let inserted = values
            .iter()
            .filter(|&&v| tree.len() < MAX_TREE_SIZE && tree.insert(v))
            .count();
        debug!(inserted, total = self.tree.len(), "tree preloaded");
        inserted
    }

    pub fn insert(&mut self, value: i64) -> Trace {
        debug!(value, size = self.tree.len(), "running tree insert");
        let bst = &mut self.tree;
        record_with(Family::Tree, "insert", |rec| {
            if bst.len() >= MAX_TREE_SIZE && !bst.contains(value) {
                return Err(EngineError::invalid(
                    "insert",
                    format!("tree already holds {} values", MAX_TREE_SIZE),
                ));
            }
            Ok(tree::insert(rec, bst, value))
        })
    }

    pub fn search(&self, value: i64) -> Trace {
        debug!(value, size = self.tree.len(), "running tree search");
        record_with(Family::Tree, "search", |rec| Ok(tree::search(rec, &self.tree, value)))
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }
}

impl Tracer for TreeTracer {
    fn family(&self) -> Family {
        Family::Tree
    }

    fn run(&mut self, selector: i32, primary: i64, _secondary: Option<i64>) -> Result<Trace, EngineError> {
        let operation =
            TreeOperation::from_code(selector).ok_or_else(|| unknown(Family::Tree, selector))?;
        let trace = match operation {
            TreeOperation::Insert => self.insert(primary),
            TreeOperation::Search => self.search(primary),
        };
        Ok(trace)
    }
}
