//! Bottom-up merge sort.
//!
//! Runs of doubling width are merged through a scratch buffer and written
//! back one element per step, so every frame shows a real state of the
//! sequence.

use crate::algorithms::{AlgorithmAdapter, StepFuture};
use crate::engine::{Highlight, Sequence, StepContext};
use crate::error::VizResult;

/// Iterative merge sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl AlgorithmAdapter for MergeSort {
    fn id(&self) -> &'static str {
        "merge"
    }

    fn name(&self) -> &'static str {
        "Merge sort"
    }

    fn sort<'a>(&'a self, sequence: &'a mut Sequence, ctx: &'a mut StepContext) -> StepFuture<'a> {
        Box::pin(async move {
            let n = sequence.len();
            let mut width = 1;
            while width < n {
                let mut lo = 0;
                while lo < n - width {
                    let mid = lo + width;
                    let hi = (lo + 2 * width).min(n);
                    merge_runs(sequence, ctx, lo, mid, hi).await?;
                    lo += 2 * width;
                }
                width *= 2;
            }
            Ok(())
        })
    }
}

/// Merge the sorted runs `lo..mid` and `mid..hi`.
async fn merge_runs(
    sequence: &mut Sequence,
    ctx: &mut StepContext,
    lo: usize,
    mid: usize,
    hi: usize,
) -> VizResult<()> {
    let left = sequence.values()[lo..mid].to_vec();
    let right = sequence.values()[mid..hi].to_vec();
    let (mut i, mut j, mut k) = (0, 0, lo);

    while i < left.len() && j < right.len() {
        let highlight = Highlight::pair(k, mid + j);
        if left[i] <= right[j] {
            sequence.set(k, left[i]);
            i += 1;
        } else {
            sequence.set(k, right[j]);
            j += 1;
        }
        ctx.step(sequence, highlight).await?;
        k += 1;
    }

    for &value in left[i..].iter().chain(&right[j..]) {
        sequence.set(k, value);
        ctx.step(sequence, Highlight::single(k)).await?;
        k += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::run_sort;

    #[test]
    fn test_sorts_odd_length() {
        let (seq, _, _) = run_sort(&MergeSort, &[5, 3, 8, 1, 7]);
        assert_eq!(seq.values(), &[1, 3, 5, 7, 8]);
    }

    #[test]
    fn test_one_step_per_written_element() {
        // Widths 1, 2: four writes each.
        let (_, summary, _) = run_sort(&MergeSort, &[4, 3, 2, 1]);
        assert_eq!(summary.steps, 8);
    }

    #[test]
    fn test_is_stable_on_equal_keys() {
        let (seq, _, _) = run_sort(&MergeSort, &[2, 2, 1, 1]);
        assert_eq!(seq.values(), &[1, 1, 2, 2]);
    }
}
