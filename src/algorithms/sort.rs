//! Sorting drivers
//!
//! The recursive algorithms keep their textbook shape; every comparison, swap
//! intent and post-swap state goes through [`SortRun::snap`] so the recorder
//! sees them in order. A swap is always three snapshots: the comparison that
//! motivates it, the pair marked as swapping, and the array after the swap.

use super::SortAlgorithm;
use crate::entity::project::project_bars;
use crate::entity::Highlight;
use crate::snapshot::TraceRecorder;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Working array plus the recorder it reports to
struct SortRun<'r> {
    rec: &'r mut TraceRecorder,
    values: Vec<i64>,
}

impl SortRun<'_> {
    fn snap(&mut self, message: String, active: &[usize], swapping: bool) {
        self.rec.record(
            project_bars(&self.values, Highlight::Ids(active), swapping),
            message,
        );
    }

    fn quick_sort(&mut self, low: usize, high: usize) {
        if low >= high {
            return;
        }

        self.snap(format!("Sorting segment [{} to {}]", low, high), &[low, high], false);

        let pivot = self.values[high];
        self.snap(format!("Pivot: {} (index {})", pivot, high), &[high], false);

        // `store` is one past the last element known to be smaller than the pivot
        let mut store = low;
        for j in low..high {
            self.snap(
                format!("Compare {} with pivot {}", self.values[j], pivot),
                &[j, high],
                false,
            );

            if self.values[j] < pivot {
                self.snap(
                    format!("Swap {} and {}", self.values[store], self.values[j]),
                    &[store, j],
                    true,
                );
                self.values.swap(store, j);
                self.snap("After swap".to_string(), &[store, j], false);
                store += 1;
            }
        }

        self.snap(
            format!("Swap {} and pivot {}", self.values[store], self.values[high]),
            &[store, high],
            true,
        );
        self.values.swap(store, high);
        self.snap(
            format!("After placing pivot at position {}", store),
            &[store],
            false,
        );

        if store > low {
            self.quick_sort(low, store - 1);
        }
        self.quick_sort(store + 1, high);
    }

    fn merge_sort(&mut self, left: usize, right: usize) {
        if left >= right {
            return;
        }

        self.snap(format!("Sorting segment [{} to {}]", left, right), &[left, right], false);

        let mid = left + (right - left) / 2;
        self.snap(
            format!(
                "Split into [{} to {}] and [{} to {}]",
                left,
                mid,
                mid + 1,
                right
            ),
            &[],
            false,
        );

        self.merge_sort(left, mid);
        self.merge_sort(mid + 1, right);
        self.merge(left, mid, right);
    }

    fn merge(&mut self, left: usize, mid: usize, right: usize) {
        self.snap(
            "Copying elements to temporary arrays".to_string(),
            &[left, right],
            false,
        );

        let lhs = self.values[left..=mid].to_vec();
        let rhs = self.values[mid + 1..=right].to_vec();
        let (mut i, mut j, mut k) = (0, 0, left);

        while i < lhs.len() && j < rhs.len() {
            self.snap(
                format!("Compare {} and {}", lhs[i], rhs[j]),
                &[left + i, mid + 1 + j],
                false,
            );

            // `<=` keeps equal elements in their original order
            let placed = if lhs[i] <= rhs[j] {
                i += 1;
                lhs[i - 1]
            } else {
                j += 1;
                rhs[j - 1]
            };
            self.values[k] = placed;
            self.snap(format!("Place {} at position {}", placed, k), &[k], false);
            k += 1;
        }

        for &value in &lhs[i..] {
            self.values[k] = value;
            self.snap(
                format!("Copy remaining element {} from left array", value),
                &[k],
                false,
            );
            k += 1;
        }

        for &value in &rhs[j..] {
            self.values[k] = value;
            self.snap(
                format!("Copy remaining element {} from right array", value),
                &[k],
                false,
            );
            k += 1;
        }
    }

    fn heap_sort(&mut self) {
        let n = self.values.len();

        self.snap("Building heap (rearranging array)".to_string(), &[], false);
        for i in (0..n / 2).rev() {
            self.heapify(n, i);
        }
        self.snap("Heap built successfully".to_string(), &[], false);

        for end in (1..n).rev() {
            self.snap(format!("Move root {} to end", self.values[0]), &[0, end], true);
            self.values.swap(0, end);
            self.snap(
                "After moving root, re-heapify remaining heap".to_string(),
                &[0, end],
                false,
            );
            self.heapify(end, 0);
        }
    }

    /// Sift `root` down within the first `size` elements
    fn heapify(&mut self, size: usize, root: usize) {
        let mut largest = root;
        let left = 2 * root + 1;
        let right = 2 * root + 2;

        self.snap(format!("Heapifying subtree rooted at index {}", root), &[root], false);

        if left < size {
            self.snap(
                format!(
                    "Compare {} with left child {}",
                    self.values[root], self.values[left]
                ),
                &[root, left],
                false,
            );
            if self.values[left] > self.values[largest] {
                largest = left;
            }
        }

        if right < size {
            self.snap(
                format!(
                    "Compare {} with right child {}",
                    self.values[largest], self.values[right]
                ),
                &[largest, right],
                false,
            );
            if self.values[right] > self.values[largest] {
                largest = right;
            }
        }

        if largest != root {
            self.snap(
                format!("Swap {} and {}", self.values[root], self.values[largest]),
                &[root, largest],
                true,
            );
            self.values.swap(root, largest);
            self.snap("After swap".to_string(), &[root, largest], false);
            self.heapify(size, largest);
        }
    }
}

/// Sort `values` with `algorithm`, recording every step. Returns the sorted
/// array. Empty and single-element arrays only produce the initial and final
/// snapshots (plus heapsort's fixed phase markers).
pub fn sort(rec: &mut TraceRecorder, algorithm: SortAlgorithm, values: Vec<i64>) -> Vec<i64> {
    let label = algorithm.label();
    let mut run = SortRun { rec, values };

    run.snap(format!("Initial array for {}", label), &[], false);

    let len = run.values.len();
    match algorithm {
        SortAlgorithm::QuickSort if len > 1 => run.quick_sort(0, len - 1),
        SortAlgorithm::MergeSort if len > 1 => run.merge_sort(0, len - 1),
        SortAlgorithm::HeapSort => run.heap_sort(),
        _ => {}
    }

    run.snap(format!("Array sorted with {}", label), &[], false);
    run.values
}

/// `size` values drawn uniformly from `min..=max`; a fixed `seed` makes the
/// array reproducible
pub fn random_values(size: usize, min: i64, max: i64, seed: Option<u64>) -> Vec<i64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    (0..size).map(|_| rng.random_range(min..=max)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(algorithm: SortAlgorithm, values: Vec<i64>) -> Vec<String> {
        let mut rec = TraceRecorder::new();
        sort(&mut rec, algorithm, values);
        rec.finalize().iter().map(|s| s.message.clone()).collect()
    }

    #[test]
    fn test_quick_sort_pair_snapshots() {
        let msgs = messages(SortAlgorithm::QuickSort, vec![2, 1]);
        assert_eq!(
            msgs,
            vec![
                "Initial array for QuickSort",
                "Sorting segment [0 to 1]",
                "Pivot: 1 (index 1)",
                "Compare 2 with pivot 1",
                "Swap 2 and pivot 1",
                "After placing pivot at position 0",
                "Array sorted with QuickSort",
            ]
        );
    }

    #[test]
    fn test_merge_sort_pair_snapshots() {
        let msgs = messages(SortAlgorithm::MergeSort, vec![2, 1]);
        assert_eq!(
            msgs,
            vec![
                "Initial array for MergeSort",
                "Sorting segment [0 to 1]",
                "Split into [0 to 0] and [1 to 1]",
                "Copying elements to temporary arrays",
                "Compare 2 and 1",
                "Place 1 at position 0",
                "Copy remaining element 2 from left array",
                "Array sorted with MergeSort",
            ]
        );
    }

    #[test]
    fn test_heap_sort_single_element() {
        let msgs = messages(SortAlgorithm::HeapSort, vec![7]);
        assert_eq!(
            msgs,
            vec![
                "Initial array for HeapSort",
                "Building heap (rearranging array)",
                "Heap built successfully",
                "Array sorted with HeapSort",
            ]
        );
    }

    #[test]
    fn test_seeded_values_are_reproducible() {
        let a = random_values(12, 10, 100, Some(7));
        let b = random_values(12, 10, 100, Some(7));
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (10..=100).contains(v)));
    }
}
