// Integration tests for the sorting tracers

use algotrace::algorithms::SortAlgorithm;
use algotrace::engine::{SortTracer, Tracer};
use algotrace::entity::Entity;
use algotrace::snapshot::{Snapshot, Trace};
use proptest::prelude::*;

const ALL: [SortAlgorithm; 3] = [
    SortAlgorithm::QuickSort,
    SortAlgorithm::MergeSort,
    SortAlgorithm::HeapSort,
];

fn bar_values(snapshot: &Snapshot) -> Vec<i64> {
    snapshot.entities.iter().filter_map(Entity::value).collect()
}

fn trace_is_well_formed(trace: &Trace) -> bool {
    let total = trace.step_count();
    trace
        .iter()
        .enumerate()
        .all(|(i, s)| s.step == i + 1 && s.total_steps == total)
}

#[test]
fn test_every_algorithm_sorts_sample() {
    let tracer = SortTracer::default();
    for algorithm in ALL {
        let trace = tracer.sort(algorithm, vec![64, 34, 25, 12, 22, 11, 90]);
        assert!(trace_is_well_formed(&trace));

        let first = trace.step_at(0);
        assert_eq!(first.message, format!("Initial array for {}", algorithm.label()));
        assert_eq!(bar_values(&first), vec![64, 34, 25, 12, 22, 11, 90]);

        let last = trace.last().unwrap();
        assert_eq!(last.message, format!("Array sorted with {}", algorithm.label()));
        assert_eq!(bar_values(last), vec![11, 12, 22, 25, 34, 64, 90]);
    }
}

#[test]
fn test_bar_positions_follow_values() {
    let trace = SortTracer::default().sort(SortAlgorithm::QuickSort, vec![30, 10]);
    let first = trace.step_at(0);
    let positions: Vec<(f64, f64)> = first
        .entities
        .iter()
        .map(|e| (e.position().x, e.position().y))
        .collect();
    assert_eq!(positions, vec![(50.0, 240.0), (100.0, 280.0)]);
}

#[test]
fn test_swaps_are_flagged() {
    let trace = SortTracer::default().sort(SortAlgorithm::HeapSort, vec![3, 1, 2, 5, 4]);
    let mut swaps = 0;
    for snapshot in &trace {
        let swapping = snapshot.entities.iter().filter(|e| e.is_swapping()).count();
        if snapshot.message.starts_with("Swap") || snapshot.message.starts_with("Move root") {
            assert!(swapping >= 1, "{} has no swapping cells", snapshot.message);
            swaps += 1;
        } else {
            assert_eq!(swapping, 0, "{} marks cells as swapping", snapshot.message);
        }
    }
    assert!(swaps > 0);
}

#[test]
fn test_tiny_arrays_have_no_comparisons() {
    let tracer = SortTracer::default();
    for values in [vec![], vec![42]] {
        assert_eq!(tracer.sort(SortAlgorithm::QuickSort, values.clone()).step_count(), 2);
        assert_eq!(tracer.sort(SortAlgorithm::MergeSort, values.clone()).step_count(), 2);
        // heapsort keeps its two phase markers
        assert_eq!(tracer.sort(SortAlgorithm::HeapSort, values).step_count(), 4);
    }
}

#[test]
fn test_step_counts_grow_with_size() {
    let tracer = SortTracer::default();
    for algorithm in ALL {
        let mut previous_sorted = 0;
        let mut previous_reversed = 0;
        for size in 0..8i64 {
            let sorted: Vec<i64> = (0..size).collect();
            let reversed: Vec<i64> = (0..size).rev().collect();

            let steps_sorted = tracer.sort(algorithm, sorted).step_count();
            let steps_reversed = tracer.sort(algorithm, reversed).step_count();
            assert!(steps_sorted >= previous_sorted, "{:?} sorted size {}", algorithm, size);
            assert!(steps_reversed >= previous_reversed, "{:?} reversed size {}", algorithm, size);
            previous_sorted = steps_sorted;
            previous_reversed = steps_reversed;
        }
    }
}

#[test]
fn test_selector_runs() {
    let mut tracer = SortTracer::default();

    let a = tracer.run(0, 12, Some(5)).unwrap();
    let b = tracer.run(0, 12, Some(5)).unwrap();
    assert_eq!(a, b);
    let values = bar_values(&a.step_at(0));
    assert_eq!(values.len(), 12);
    assert!(values.iter().all(|v| (10..=100).contains(v)));

    // Negative size falls back to the configured default
    assert_eq!(bar_values(&tracer.run(1, -1, Some(1)).unwrap().step_at(0)).len(), 10);
    // Zero size is an empty array
    assert_eq!(tracer.run(2, 0, None).unwrap().step_count(), 4);

    assert!(tracer.run(3, 5, None).is_err());
}

proptest! {
    #[test]
    fn prop_final_snapshot_is_sorted(values in prop::collection::vec(-500i64..500, 0..24)) {
        let tracer = SortTracer::default();
        let mut expected = values.clone();
        expected.sort();

        for algorithm in ALL {
            let trace = tracer.sort(algorithm, values.clone());
            prop_assert!(trace_is_well_formed(&trace));
            let last = trace.last().unwrap();
            prop_assert_eq!(bar_values(last), expected.clone());
        }

        // swap-based sorts show a permutation of the input at every step
        for algorithm in [SortAlgorithm::QuickSort, SortAlgorithm::HeapSort] {
            let trace = tracer.sort(algorithm, values.clone());
            for snapshot in &trace {
                let mut shown = bar_values(snapshot);
                shown.sort();
                prop_assert_eq!(shown, expected.clone());
            }
        }
    }
}
