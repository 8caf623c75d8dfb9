//! Dynamic programming drivers
//!
//! One snapshot per computed cell. Each message instantiates the recurrence
//! with the concrete operands, so the replay shows the arithmetic and not
//! only the table.

use crate::entity::project::{project_array, project_table, table_id};
use crate::entity::Highlight;
use crate::errors::EngineError;
use crate::snapshot::TraceRecorder;

/// Largest `n` whose Fibonacci number fits in an `i64`
pub const FIBONACCI_MAX_N: i64 = 92;

/// Largest knapsack capacity; every cell of the table is one snapshot
pub const MAX_KNAPSACK_CAPACITY: i64 = 500;

/// Fill `fib[0..=n]` bottom-up. Returns `Fibonacci(n)`.
pub fn fibonacci(rec: &mut TraceRecorder, n: i64) -> Result<i64, EngineError> {
    if !(0..=FIBONACCI_MAX_N).contains(&n) {
        return Err(EngineError::invalid(
            "fibonacci",
            format!("n must be between 0 and {}, got {}", FIBONACCI_MAX_N, n),
        ));
    }
    let n = n as usize;

    let mut fib = vec![0i64; n + 1];
    if n >= 1 {
        fib[1] = 1;
    }

    rec.record(
        project_array(&fib, Highlight::None),
        format!("Calculating Fibonacci({}) using Dynamic Programming", n),
    );

    for i in 2..=n {
        fib[i] = fib[i - 1] + fib[i - 2];
        rec.record(
            project_array(&fib, Highlight::Ids(&[i])),
            format!(
                "Computing Fibonacci({}) = Fibonacci({}) + Fibonacci({}) = {} + {} = {}",
                i,
                i - 1,
                i - 2,
                fib[i - 1],
                fib[i - 2],
                fib[i]
            ),
        );
    }

    rec.record(
        project_array(&fib, Highlight::Ids(&[n])),
        format!("Fibonacci({}) = {}", n, fib[n]),
    );

    Ok(fib[n])
}

/// 0-1 knapsack over `dp[item][capacity]`. Returns the best total value.
///
/// Ties between excluding and including an item keep the excluded value.
pub fn knapsack(
    rec: &mut TraceRecorder,
    values: &[i64],
    weights: &[i64],
    capacity: i64,
) -> Result<i64, EngineError> {
    if values.is_empty() || weights.is_empty() {
        return Err(EngineError::invalid("knapsack", "values and weights must not be empty"));
    }
    if values.len() != weights.len() {
        return Err(EngineError::invalid(
            "knapsack",
            format!(
                "{} values but {} weights",
                values.len(),
                weights.len()
            ),
        ));
    }
    if capacity < 0 {
        return Err(EngineError::invalid(
            "knapsack",
            format!("capacity must not be negative, got {}", capacity),
        ));
    }
    if capacity > MAX_KNAPSACK_CAPACITY {
        return Err(EngineError::invalid(
            "knapsack",
            format!("capacity {} exceeds {}", capacity, MAX_KNAPSACK_CAPACITY),
        ));
    }
    if let Some(w) = weights.iter().find(|&&w| w < 0) {
        return Err(EngineError::invalid(
            "knapsack",
            format!("weights must not be negative, got {}", w),
        ));
    }

    let n = values.len();
    let cap = capacity as usize;
    let cols = cap + 1;
    let mut dp = vec![vec![0i64; cols]; n + 1];

    let items = values
        .iter()
        .zip(weights)
        .map(|(v, w)| format!("(value={}, weight={})", v, w))
        .collect::<Vec<_>>()
        .join(", ");
    rec.record(
        project_table(&dp, Highlight::None),
        format!(
            "Solving 0-1 Knapsack Problem with {} items and capacity {}\nItems: [{}]",
            n, capacity, items
        ),
    );

    for i in 1..=n {
        let value = values[i - 1];
        let weight = weights[i - 1];
        for w in 0..=cap {
            let excluding = dp[i - 1][w];
            let message = if weight as usize > w {
                dp[i][w] = excluding;
                format!(
                    "Item {} (weight={}) is too heavy for capacity {}, take previous value {}",
                    i, weight, w, excluding
                )
            } else {
                let including = value
                    .checked_add(dp[i - 1][w - weight as usize])
                    .ok_or_else(|| {
                        EngineError::invalid(
                            "knapsack",
                            format!("total value overflows at item {} and capacity {}", i, w),
                        )
                    })?;
                dp[i][w] = if including > excluding { including } else { excluding };
                format!(
                    "For item {} (value={}, weight={}) and capacity {}:\nMax of (excluding={}, including={}) = {}",
                    i, value, weight, w, excluding, including, dp[i][w]
                )
            };

            rec.record(
                project_table(&dp, Highlight::Ids(&[table_id(i, w, cols)])),
                message,
            );
        }
    }

    let best = dp[n][cap];
    let chosen = chosen_items(&dp, weights, cap);
    let chosen = if chosen.is_empty() {
        "none".to_string()
    } else {
        chosen
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    rec.record(
        project_table(&dp, Highlight::None),
        format!("Maximum value: {}\nItems chosen: {}", best, chosen),
    );

    Ok(best)
}

/// Walk back from `dp[n][cap]`; an item was taken wherever its row changed
/// the value. Returns 1-based item numbers in ascending order.
fn chosen_items(dp: &[Vec<i64>], weights: &[i64], cap: usize) -> Vec<usize> {
    let mut chosen = Vec::new();
    let mut w = cap;
    for i in (1..dp.len()).rev() {
        if dp[i][w] != dp[i - 1][w] {
            chosen.push(i);
            w -= weights[i - 1] as usize;
        }
    }
    chosen.reverse();
    chosen
}

/// Longest common subsequence of `first` and `second`, compared per `char`.
/// Returns the reconstructed subsequence.
///
/// Reconstruction is reported in the final message only; it emits no
/// snapshots of its own.
pub fn lcs(rec: &mut TraceRecorder, first: &str, second: &str) -> Result<String, EngineError> {
    if first.is_empty() || second.is_empty() {
        return Err(EngineError::invalid("lcs", "both strings must be non-empty"));
    }

    let a: Vec<char> = first.chars().collect();
    let b: Vec<char> = second.chars().collect();
    let (m, n) = (a.len(), b.len());
    let cols = n + 1;
    let mut dp = vec![vec![0i64; cols]; m + 1];

    rec.record(
        project_table(&dp, Highlight::None),
        format!(
            "Finding Longest Common Subsequence of \"{}\" and \"{}\"",
            first, second
        ),
    );

    for i in 1..=m {
        for j in 1..=n {
            let message = if a[i - 1] == b[j - 1] {
                dp[i][j] = dp[i - 1][j - 1] + 1;
                format!(
                    "Characters match: {} = {}, incrementing from diagonal",
                    a[i - 1],
                    b[j - 1]
                )
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
                format!(
                    "Characters don't match: {} != {}, taking max of up and left",
                    a[i - 1],
                    b[j - 1]
                )
            };

            rec.record(
                project_table(&dp, Highlight::Ids(&[table_id(i, j, cols)])),
                message,
            );
        }
    }

    // Up only when strictly better, otherwise left
    let mut subsequence = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            subsequence.push(a[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] > dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    let subsequence: String = subsequence.into_iter().rev().collect();

    rec.record(
        project_table(&dp, Highlight::None),
        format!("Length of LCS: {}\nLCS: \"{}\"", dp[m][n], subsequence),
    );

    Ok(subsequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_zero_and_one() {
        let mut rec = TraceRecorder::new();
        assert_eq!(fibonacci(&mut rec, 0).unwrap(), 0);
        // initial + final, nothing computed
        assert_eq!(rec.len(), 2);

        let mut rec = TraceRecorder::new();
        assert_eq!(fibonacci(&mut rec, 1).unwrap(), 1);
        assert_eq!(rec.len(), 2);
    }

    #[test]
    fn test_fibonacci_rejects_overflow() {
        let mut rec = TraceRecorder::new();
        assert!(fibonacci(&mut rec, FIBONACCI_MAX_N + 1).is_err());
        assert!(fibonacci(&mut rec, -1).is_err());
        assert!(rec.is_empty());

        let mut rec = TraceRecorder::new();
        assert_eq!(
            fibonacci(&mut rec, FIBONACCI_MAX_N).unwrap(),
            7_540_113_804_746_346_429
        );
    }

    #[test]
    fn test_knapsack_chosen_items() {
        let mut rec = TraceRecorder::new();
        let best = knapsack(&mut rec, &[60, 100, 120], &[10, 20, 30], 50).unwrap();
        assert_eq!(best, 220);
        let trace = rec.finalize();
        let last = trace.last().unwrap();
        assert!(last.message.contains("Items chosen: 2, 3"));
        // initial + 3 * 51 cells + final
        assert_eq!(trace.step_count(), 1 + 3 * 51 + 1);
    }

    #[test]
    fn test_knapsack_rejects_huge_capacity() {
        let mut rec = TraceRecorder::new();
        assert!(knapsack(&mut rec, &[1], &[1], MAX_KNAPSACK_CAPACITY + 1).is_err());
        assert!(knapsack(&mut rec, &[1], &[1], i64::MAX).is_err());
        assert!(rec.is_empty());
        assert!(knapsack(&mut rec, &[1], &[1], MAX_KNAPSACK_CAPACITY).is_ok());
    }

    #[test]
    fn test_knapsack_value_overflow_is_rejected() {
        let mut rec = TraceRecorder::new();
        let err = knapsack(&mut rec, &[i64::MAX, 1], &[1, 1], 2).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_knapsack_tie_keeps_excluding() {
        // Item 2 gives the same value as item 1 at capacity 1
        let mut rec = TraceRecorder::new();
        let best = knapsack(&mut rec, &[5, 5], &[1, 1], 1).unwrap();
        assert_eq!(best, 5);
        let trace = rec.finalize();
        assert!(trace.last().unwrap().message.contains("Items chosen: 1"));
    }

    #[test]
    fn test_lcs_with_unicode() {
        let mut rec = TraceRecorder::new();
        assert_eq!(lcs(&mut rec, "aéb", "éb").unwrap(), "éb");
    }
}
