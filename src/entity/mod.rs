//! Renderable entities and the projector that builds them
//!
//! Every snapshot owns a freshly built `Vec<Entity>`. Entities are produced by
//! the functions in [`project`] from a driver's private working structure and
//! are never mutated after they have been recorded.
//!
//! - [`layout`]: pure position formulas (linear, grid, circular, tree)
//! - [`project`]: structure + [`Highlight`] selector → entity collection
//!
//! # Identity
//!
//! | Entity | `id` |
//! |---|---|
//! | array cell | index in the array |
//! | table cell | `row * cols + col` |
//! | graph node | node id |
//! | graph edge | index in the flattened directed edge list |
//! | tree node / edge | index in the layout arena of one layout pass |
//!
//! Tree identities are only meaningful inside the snapshot that carries them.

pub mod layout;
pub mod project;

use serde::{Deserialize, Serialize};

/// 2-D position in layout space (x grows right, y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Point halfway between two positions
    pub fn midpoint(self, other: Position) -> Self {
        Position {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// One render object inside a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    ArrayCell {
        id: usize,
        value: i64,
        position: Position,
        highlighted: bool,
        swapping: bool,
    },
    TableCell {
        id: usize,
        row: usize,
        col: usize,
        value: i64,
        position: Position,
        highlighted: bool,
        swapping: bool,
    },
    GraphNode {
        id: usize,
        value: i64,
        position: Position,
        highlighted: bool,
    },
    GraphEdge {
        id: usize,
        source: usize,
        target: usize,
        weight: i64,
        position: Position,
        highlighted: bool,
    },
    TreeNode {
        id: usize,
        value: i64,
        position: Position,
        highlighted: bool,
    },
    TreeEdge {
        id: usize,
        source: usize,
        target: usize,
        position: Position,
        highlighted: bool,
    },
}

/// Discriminant of [`Entity`], handy for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    ArrayCell,
    TableCell,
    GraphNode,
    GraphEdge,
    TreeNode,
    TreeEdge,
}

impl Entity {
    pub fn id(&self) -> usize {
        match self {
            Entity::ArrayCell { id, .. }
            | Entity::TableCell { id, .. }
            | Entity::GraphNode { id, .. }
            | Entity::GraphEdge { id, .. }
            | Entity::TreeNode { id, .. }
            | Entity::TreeEdge { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::ArrayCell { .. } => EntityKind::ArrayCell,
            Entity::TableCell { .. } => EntityKind::TableCell,
            Entity::GraphNode { .. } => EntityKind::GraphNode,
            Entity::GraphEdge { .. } => EntityKind::GraphEdge,
            Entity::TreeNode { .. } => EntityKind::TreeNode,
            Entity::TreeEdge { .. } => EntityKind::TreeEdge,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Entity::ArrayCell { position, .. }
            | Entity::TableCell { position, .. }
            | Entity::GraphNode { position, .. }
            | Entity::GraphEdge { position, .. }
            | Entity::TreeNode { position, .. }
            | Entity::TreeEdge { position, .. } => *position,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        match self {
            Entity::ArrayCell { highlighted, .. }
            | Entity::TableCell { highlighted, .. }
            | Entity::GraphNode { highlighted, .. }
            | Entity::GraphEdge { highlighted, .. }
            | Entity::TreeNode { highlighted, .. }
            | Entity::TreeEdge { highlighted, .. } => *highlighted,
        }
    }

    /// Only array and table cells can be marked as being swapped
    pub fn is_swapping(&self) -> bool {
        match self {
            Entity::ArrayCell { swapping, .. } | Entity::TableCell { swapping, .. } => *swapping,
            _ => false,
        }
    }

    /// Numeric payload: cell/node value or edge weight. Tree edges carry none.
    pub fn value(&self) -> Option<i64> {
        match self {
            Entity::ArrayCell { value, .. }
            | Entity::TableCell { value, .. }
            | Entity::GraphNode { value, .. }
            | Entity::TreeNode { value, .. } => Some(*value),
            Entity::GraphEdge { weight, .. } => Some(*weight),
            Entity::TreeEdge { .. } => None,
        }
    }

    /// Endpoints of an edge entity
    pub fn endpoints(&self) -> Option<(usize, usize)> {
        match self {
            Entity::GraphEdge { source, target, .. } | Entity::TreeEdge { source, target, .. } => {
                Some((*source, *target))
            }
            _ => None,
        }
    }

    /// Text shown for this entity in a replay
    pub fn display_value(&self) -> String {
        match self {
            Entity::TreeEdge { source, target, .. } => format!("{} → {}", source, target),
            Entity::GraphEdge {
                source,
                target,
                weight,
                ..
            } => format!("{} → {} ({})", source, target, weight),
            other => other.value().map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

/// Selects which entities of a projection are "active"
#[derive(Clone, Copy)]
pub enum Highlight<'a> {
    None,
    Ids(&'a [usize]),
    Where(&'a dyn Fn(usize) -> bool),
}

impl Highlight<'_> {
    pub fn contains(&self, id: usize) -> bool {
        match self {
            Highlight::None => false,
            Highlight::Ids(ids) => ids.contains(&id),
            Highlight::Where(pred) => pred(id),
        }
    }
}

impl std::fmt::Debug for Highlight<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Highlight::None => write!(f, "Highlight::None"),
            Highlight::Ids(ids) => write!(f, "Highlight::Ids({:?})", ids),
            Highlight::Where(_) => write!(f, "Highlight::Where(..)"),
        }
    }
}
