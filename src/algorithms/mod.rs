//! Instrumented algorithm drivers
//!
//! Each driver runs a textbook algorithm over private working state and calls
//! [`TraceRecorder::record`] at every decision point, before anything later
//! depends on that decision. Drivers never number or finalize snapshots; that
//! is left to the tracer that owns the recorder.
//!
//! - [`dp`]: Fibonacci, 0-1 Knapsack, longest common subsequence
//! - [`graph`]: undirected weighted graph, DFS, BFS, Dijkstra
//! - [`sort`]: quicksort, mergesort, heapsort
//! - [`tree`]: binary search tree insert and search
//!
//! A driver returns `Err` only for rejected input; the caller then throws the
//! partially recorded snapshots away.
//!
//! [`TraceRecorder::record`]: crate::snapshot::TraceRecorder::record

pub mod dp;
pub mod graph;
pub mod sort;
pub mod tree;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four algorithm families, each with its own trace slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Dp,
    Graph,
    Sort,
    Tree,
}

impl Family {
    pub const ALL: [Family; 4] = [Family::Dp, Family::Graph, Family::Sort, Family::Tree];

    /// Slot index used by per-family storage
    pub fn index(self) -> usize {
        match self {
            Family::Dp => 0,
            Family::Graph => 1,
            Family::Sort => 2,
            Family::Tree => 3,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Dp => "dynamic programming",
            Family::Graph => "graph",
            Family::Sort => "sorting",
            Family::Tree => "tree",
        };
        f.write_str(name)
    }
}

/// Dynamic programming selectors (codes 0, 1, 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpAlgorithm {
    Fibonacci,
    Knapsack,
    Lcs,
}

/// Graph selectors (codes 0, 1, 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphAlgorithm {
    Dfs,
    Bfs,
    Dijkstra,
}

/// Sorting selectors (codes 0, 1, 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAlgorithm {
    QuickSort,
    MergeSort,
    HeapSort,
}

/// Tree selectors (codes 0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOperation {
    Insert,
    Search,
}

impl DpAlgorithm {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(DpAlgorithm::Fibonacci),
            1 => Some(DpAlgorithm::Knapsack),
            2 => Some(DpAlgorithm::Lcs),
            _ => None,
        }
    }
}

impl GraphAlgorithm {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(GraphAlgorithm::Dfs),
            1 => Some(GraphAlgorithm::Bfs),
            2 => Some(GraphAlgorithm::Dijkstra),
            _ => None,
        }
    }
}

impl SortAlgorithm {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SortAlgorithm::QuickSort),
            1 => Some(SortAlgorithm::MergeSort),
            2 => Some(SortAlgorithm::HeapSort),
            _ => None,
        }
    }

    /// Name used in narration ("Initial array for QuickSort")
    pub fn label(self) -> &'static str {
        match self {
            SortAlgorithm::QuickSort => "QuickSort",
            SortAlgorithm::MergeSort => "MergeSort",
            SortAlgorithm::HeapSort => "HeapSort",
        }
    }
}

impl TreeOperation {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(TreeOperation::Insert),
            1 => Some(TreeOperation::Search),
            _ => None,
        }
    }
}
