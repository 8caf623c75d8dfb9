// Snapshot recording and step retrieval

use crate::entity::Entity;
use serde::{Deserialize, Serialize};

/// One recorded state of an algorithm run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub entities: Vec<Entity>,
    pub message: String,
    /// 1-based position within the trace; 0 only for the default snapshot
    pub step: usize,
    /// Length of the finished trace, identical on every snapshot of it
    pub total_steps: usize,
}

impl Snapshot {
    /// Entities flagged as active in this step
    pub fn highlighted(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_highlighted())
    }

    /// True for the placeholder returned by out-of-range queries
    pub fn is_empty(&self) -> bool {
        self.step == 0
    }
}

/// Append-only builder for one run's snapshots
///
/// Steps are numbered as they are recorded; `total_steps` is left at zero
/// until [`TraceRecorder::finalize`] back-fills it.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    snapshots: Vec<Snapshot>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        TraceRecorder {
            snapshots: Vec::new(),
        }
    }

    /// Drop everything recorded so far
    pub fn reset(&mut self) {
        self.snapshots.clear();
    }

    /// Add a snapshot to the trace
    pub fn record(&mut self, entities: Vec<Entity>, message: impl Into<String>) {
        let step = self.snapshots.len() + 1;
        self.snapshots.push(Snapshot {
            entities,
            message: message.into(),
            step,
            total_steps: 0,
        });
    }

    /// Record a copy of the previous snapshot's entities under a new message
    pub fn repeat(&mut self, message: impl Into<String>) {
        let entities = self.last_entities().to_vec();
        self.record(entities, message);
    }

    /// Entities of the most recent snapshot (empty when nothing was recorded)
    pub fn last_entities(&self) -> &[Entity] {
        self.snapshots
            .last()
            .map(|s| s.entities.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number every snapshot with the final count and hand the trace over.
    /// The recorder is empty afterwards.
    pub fn finalize(&mut self) -> Trace {
        let mut snapshots = std::mem::take(&mut self.snapshots);
        let total = snapshots.len();
        for snapshot in &mut snapshots {
            snapshot.total_steps = total;
        }
        Trace { snapshots }
    }
}

/// The finished, immutable snapshot sequence of one run
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Trace {
    snapshots: Vec<Snapshot>,
}

impl Trace {
    /// Rebuild a trace from snapshots read back from storage.
    ///
    /// Returns `None` unless the snapshots form a finished trace (steps
    /// `1..=n` in order, every `total_steps == n`).
    pub fn from_snapshots(snapshots: Vec<Snapshot>) -> Option<Self> {
        let total = snapshots.len();
        let well_formed = snapshots
            .iter()
            .enumerate()
            .all(|(i, s)| s.step == i + 1 && s.total_steps == total);
        well_formed.then_some(Trace { snapshots })
    }

    /// Number of snapshots
    pub fn step_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Snapshot at 0-based `index`, or the default snapshot when out of range
    pub fn step_at(&self, index: usize) -> Snapshot {
        self.snapshots.get(index).cloned().unwrap_or_default()
    }

    /// Borrowing variant of [`Trace::step_at`]
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_numbered_and_finalized() {
        let mut recorder = TraceRecorder::new();
        recorder.record(Vec::new(), "first");
        recorder.record(Vec::new(), "second");
        recorder.repeat("third");
        assert_eq!(recorder.len(), 3);

        let trace = recorder.finalize();
        assert!(recorder.is_empty());
        assert_eq!(trace.step_count(), 3);
        for (i, snapshot) in trace.iter().enumerate() {
            assert_eq!(snapshot.step, i + 1);
            assert_eq!(snapshot.total_steps, 3);
        }
        assert_eq!(trace.step_at(2).message, "third");
    }

    #[test]
    fn test_out_of_range_is_default() {
        let trace = TraceRecorder::new().finalize();
        assert_eq!(trace.step_count(), 0);
        assert_eq!(trace.step_at(0), Snapshot::default());
        assert!(trace.step_at(usize::MAX).is_empty());
    }

    #[test]
    fn test_reset_discards_partial_trace() {
        let mut recorder = TraceRecorder::new();
        recorder.record(Vec::new(), "partial");
        recorder.reset();
        assert!(recorder.finalize().is_empty());
    }

    #[test]
    fn test_from_snapshots_rejects_gaps() {
        let mut recorder = TraceRecorder::new();
        recorder.record(Vec::new(), "a");
        recorder.record(Vec::new(), "b");
        let trace = recorder.finalize();

        let good = trace.snapshots().to_vec();
        assert!(Trace::from_snapshots(good).is_some());

        let mut bad = trace.snapshots().to_vec();
        bad.remove(0);
        assert!(Trace::from_snapshots(bad).is_none());
    }
}
