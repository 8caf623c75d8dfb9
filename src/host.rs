//! Integer-coded boundary over the four tracers
//!
//! The host keeps one trace slot per family. A run replaces its family's slot
//! wholesale; an unknown selector leaves it untouched and returns `-1`.
//!
//! Encoded step data lives in buffers owned by the host. Every buffer handed
//! out by [`Host::step_data`] stays alive until [`Host::free_step_data`] is
//! called for it; nothing is reclaimed implicitly.

use crate::algorithms::graph::{NodeId, Weight};
use crate::algorithms::Family;
use crate::config::Settings;
use crate::engine::{DpTracer, GraphTracer, SortTracer, Tracer, TreeTracer};
use crate::errors::EngineError;
use crate::snapshot::{Snapshot, Trace};
use crate::wire;
use rustc_hash::FxHashMap;
use tracing::{trace, warn};

/// Handle to an encoded step buffer
pub type BufferId = u64;

/// Returned by [`Host::run`] for an unknown selector
pub const UNKNOWN_SELECTOR: i64 = -1;

/// Which fields an encoded step carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `step`, `totalSteps`, `message`
    Summary,
    /// Summary plus `entities`
    Full,
}

pub struct Host {
    dp: DpTracer,
    graph: GraphTracer,
    sort: SortTracer,
    tree: TreeTracer,
    slots: [Trace; 4],
    buffers: FxHashMap<BufferId, String>,
    next_buffer: BufferId,
}

impl Default for Host {
    fn default() -> Self {
        Host::new(&Settings::default())
    }
}

impl Host {
    pub fn new(settings: &Settings) -> Self {
        Host {
            dp: DpTracer::new(settings.dp.clone()),
            graph: GraphTracer::new(),
            sort: SortTracer::new(settings.sort.clone()),
            tree: TreeTracer::new(),
            slots: Default::default(),
            buffers: FxHashMap::default(),
            next_buffer: 1,
        }
    }

    fn tracer_mut(&mut self, family: Family) -> &mut dyn Tracer {
        match family {
            Family::Dp => &mut self.dp,
            Family::Graph => &mut self.graph,
            Family::Sort => &mut self.sort,
            Family::Tree => &mut self.tree,
        }
    }

    /// Run `selector` of `family` and store the trace in the family's slot.
    /// Returns the new step count, or [`UNKNOWN_SELECTOR`].
    pub fn run(&mut self, family: Family, selector: i32, primary: i64, secondary: Option<i64>) -> i64 {
        match self.tracer_mut(family).run(selector, primary, secondary) {
            Ok(trace) => {
                let count = trace.step_count();
                self.slots[family.index()] = trace;
                count as i64
            }
            Err(err) => {
                warn!(%family, selector, error = %err, "run refused");
                UNKNOWN_SELECTOR
            }
        }
    }

    /// Trace currently held for `family`
    pub fn trace(&self, family: Family) -> &Trace {
        &self.slots[family.index()]
    }

    pub fn step_count(&self, family: Family) -> usize {
        self.trace(family).step_count()
    }

    pub fn step_at(&self, family: Family, index: usize) -> Snapshot {
        self.trace(family).step_at(index)
    }

    pub fn add_node(&mut self) -> NodeId {
        self.graph.add_node()
    }

    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: Weight) -> bool {
        self.graph.add_edge(source, target, weight)
    }

    /// Insert values into the search tree without recording a trace
    pub fn preload_tree(&mut self, values: &[i64]) -> usize {
        self.tree.preload(values)
    }

    /// Encode step `index` of `family` into a new buffer. Out-of-range
    /// indices encode the empty snapshot.
    pub fn step_data(&mut self, family: Family, index: usize, encoding: Encoding) -> Result<BufferId, EngineError> {
        let snapshot = self.step_at(family, index);
        let text = match encoding {
            Encoding::Summary => wire::encode_summary(&snapshot)?,
            Encoding::Full => wire::encode_full(&snapshot)?,
        };

        let id = self.next_buffer;
        self.next_buffer += 1;
        trace!(id, bytes = text.len(), %family, index, "step buffer acquired");
        self.buffers.insert(id, text);
        Ok(id)
    }

    pub fn buffer(&self, id: BufferId) -> Option<&str> {
        self.buffers.get(&id).map(String::as_str)
    }

    /// Release a buffer. Returns `false` if it was never handed out or was
    /// already freed.
    pub fn free_step_data(&mut self, id: BufferId) -> bool {
        let freed = self.buffers.remove(&id).is_some();
        trace!(id, freed, "step buffer released");
        freed
    }

    /// Buffers handed out and not yet released
    pub fn outstanding_buffers(&self) -> usize {
        self.buffers.len()
    }
}
