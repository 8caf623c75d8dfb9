// Integration tests for the dynamic programming tracers

use algotrace::engine::{DpTracer, Tracer};
use algotrace::entity::Entity;
use algotrace::snapshot::Trace;

fn assert_well_formed(trace: &Trace) {
    let total = trace.step_count();
    for (i, snapshot) in trace.iter().enumerate() {
        assert_eq!(snapshot.step, i + 1, "step numbering has a gap at {}", i);
        assert_eq!(snapshot.total_steps, total);
    }
}

fn highlighted_ids(trace: &Trace, index: usize) -> Vec<usize> {
    trace.step_at(index).highlighted().map(Entity::id).collect()
}

#[test]
fn test_fibonacci_ten() {
    let trace = DpTracer::default().fibonacci(10);
    assert_well_formed(&trace);

    // initial + i = 2..=10 + final
    assert_eq!(trace.step_count(), 11);
    assert_eq!(
        trace.step_at(0).message,
        "Calculating Fibonacci(10) using Dynamic Programming"
    );
    assert_eq!(
        trace.step_at(1).message,
        "Computing Fibonacci(2) = Fibonacci(1) + Fibonacci(0) = 1 + 0 = 1"
    );
    assert_eq!(trace.last().unwrap().message, "Fibonacci(10) = 55");

    let initial: Vec<i64> = trace.step_at(0).entities.iter().filter_map(Entity::value).collect();
    assert_eq!(initial, vec![0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert!(highlighted_ids(&trace, 0).is_empty());
    assert_eq!(highlighted_ids(&trace, 1), vec![2]);
    assert_eq!(highlighted_ids(&trace, 10), vec![10]);
}

#[test]
fn test_fibonacci_zero_has_single_cell() {
    let trace = DpTracer::default().fibonacci(0);
    assert_eq!(trace.step_count(), 2);
    assert_eq!(trace.step_at(0).entities.len(), 1);
    assert_eq!(trace.step_at(1).message, "Fibonacci(0) = 0");
}

#[test]
fn test_fibonacci_out_of_range_is_empty() {
    let tracer = DpTracer::default();
    assert_eq!(tracer.fibonacci(-1).step_count(), 0);
    assert_eq!(tracer.fibonacci(93).step_count(), 0);
    assert_eq!(tracer.fibonacci(92).step_count(), 93);
}

#[test]
fn test_knapsack_classic_instance() {
    let trace = DpTracer::default().knapsack(&[60, 100, 120], &[10, 20, 30], 50);
    assert_well_formed(&trace);

    let first = trace.step_at(0);
    assert!(first
        .message
        .starts_with("Solving 0-1 Knapsack Problem with 3 items and capacity 50\nItems: ["));
    // 4 rows x 51 columns
    assert_eq!(first.entities.len(), 4 * 51);

    // First cell computed is (1, 0): id 1 * 51 + 0
    assert_eq!(highlighted_ids(&trace, 1), vec![51]);
    assert_eq!(
        trace.step_at(1).message,
        "Item 1 (weight=10) is too heavy for capacity 0, take previous value 0"
    );

    let last = trace.last().unwrap();
    assert!(last.message.starts_with("Maximum value: 220"));
    assert!(last.highlighted().next().is_none());
}

#[test]
fn test_knapsack_zero_capacity() {
    let trace = DpTracer::default().knapsack(&[5], &[1], 0);
    // initial + one cell + final
    assert_eq!(trace.step_count(), 3);
    assert!(trace.last().unwrap().message.starts_with("Maximum value: 0"));
    assert!(trace.last().unwrap().message.ends_with("Items chosen: none"));
}

#[test]
fn test_knapsack_rejects_bad_items() {
    let tracer = DpTracer::default();
    assert!(tracer.knapsack(&[1, 2], &[1], 5).is_empty());
    assert!(tracer.knapsack(&[], &[], 5).is_empty());
    assert!(tracer.knapsack(&[1], &[1], -1).is_empty());
    assert!(tracer.knapsack(&[1], &[-1], 5).is_empty());
}

#[test]
fn test_lcs_classic_instance() {
    let trace = DpTracer::default().lcs("ABCBDAB", "BDCABA");
    assert_well_formed(&trace);

    // initial + 7 * 6 cells + final
    assert_eq!(trace.step_count(), 44);
    assert_eq!(
        trace.step_at(1).message,
        "Characters don't match: A != B, taking max of up and left"
    );
    assert_eq!(
        trace.step_at(4).message,
        "Characters match: A = A, incrementing from diagonal"
    );
    assert_eq!(trace.last().unwrap().message, "Length of LCS: 4\nLCS: \"BDAB\"");
}

#[test]
fn test_lcs_rejects_empty_string() {
    let tracer = DpTracer::default();
    assert!(tracer.lcs("", "ABC").is_empty());
    assert!(tracer.lcs("ABC", "").is_empty());
}

#[test]
fn test_selectors_use_configured_inputs() {
    let mut tracer = DpTracer::default();

    let knapsack = tracer.run(1, 50, None).unwrap();
    assert!(knapsack.last().unwrap().message.starts_with("Maximum value: 220"));

    let lcs = tracer.run(2, 0, None).unwrap();
    assert_eq!(lcs.step_count(), 44);

    assert!(tracer.run(3, 0, None).is_err());
}

#[test]
fn test_step_queries_are_idempotent() {
    let trace = DpTracer::default().fibonacci(5);
    assert_eq!(trace.step_at(3), trace.step_at(3));
    assert!(trace.step_at(trace.step_count()).is_empty());
    assert!(trace.get(99).is_none());
}
