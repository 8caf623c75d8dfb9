//! # Introduction
//!
//! algotrace runs classic algorithms under instrumentation and records a
//! snapshot of the algorithm's visible state at every meaningful operation.
//! A finished trace can be queried step by step, exported as JSON, or replayed
//! forward and backward in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Tracer → Driver → Entity projector → TraceRecorder → Trace → Host / TUI / JSON
//! ```
//!
//! 1. [`engine`]: one tracer per family; owns persistent state (graph, search
//!    tree) and turns rejected input into an empty trace.
//! 2. [`algorithms`]: the instrumented drivers for dynamic programming, graph
//!    traversal, sorting and binary search trees.
//! 3. [`entity`]: layout formulas and the projector that turns working state
//!    into positioned, highlighted [`entity::Entity`] values.
//! 4. [`snapshot`]: [`snapshot::TraceRecorder`] and the immutable
//!    [`snapshot::Trace`] with its query interface.
//! 5. [`host`]: integer-coded boundary with per-family slots and explicitly
//!    released step buffers; [`wire`] provides its JSON encodings.
//! 6. [`ui`]: ratatui replay viewer; not part of the stable library API.
//!
//! ## Algorithms
//!
//! | Family | Selector 0 | 1 | 2 |
//! |---|---|---|---|
//! | dynamic programming | Fibonacci | 0-1 Knapsack | LCS |
//! | graph | DFS | BFS | Dijkstra |
//! | sorting | quicksort | mergesort | heapsort |
//! | tree | insert | search | |

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod entity;
pub mod errors;
pub mod host;
pub mod snapshot;
pub mod ui;
pub mod wire;
