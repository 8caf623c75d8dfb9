//! Error types for the trace engine
//!
//! [`EngineError`] covers everything the library can report. Only
//! [`EngineError::UnknownAlgorithm`] ever escapes a tracer run: input errors
//! raised inside a driver are absorbed by the tracer, which turns them into an
//! empty trace.

use crate::algorithms::Family;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by drivers, tracers and the ambient layers around them
#[derive(Error, Debug)]
pub enum EngineError {
    /// Selector code does not name an algorithm of this family
    #[error("unknown {family} algorithm selector {code}")]
    UnknownAlgorithm { family: Family, code: i32 },

    /// Well-typed but unusable input (mismatched knapsack items, empty strings, ...)
    #[error("invalid input for {algorithm}: {reason}")]
    InvalidInput {
        algorithm: &'static str,
        reason: String,
    },

    /// Graph traversal started from a node the graph does not contain
    #[error("node {node} is not in the graph ({count} nodes)")]
    UnknownNode { node: usize, count: usize },

    /// Configuration file could not be used
    #[error("configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidInput`]
    pub fn invalid(algorithm: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            algorithm,
            reason: reason.into(),
        }
    }

    /// True for errors that mean "the input was rejected", as opposed to
    /// a bad selector or an ambient failure
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput { .. } | EngineError::UnknownNode { .. }
        )
    }
}
