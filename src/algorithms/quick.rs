//! Quick sort.
//!
//! Lomuto partitioning with the last element as pivot. Pending ranges live
//! on an explicit stack instead of recursing, which keeps the future a
//! single state machine.

use crate::algorithms::{AlgorithmAdapter, StepFuture};
use crate::engine::{Highlight, Sequence, StepContext};
use crate::error::VizResult;

/// Partition-exchange sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl AlgorithmAdapter for QuickSort {
    fn id(&self) -> &'static str {
        "quick"
    }

    fn name(&self) -> &'static str {
        "Quick sort"
    }

    fn sort<'a>(&'a self, sequence: &'a mut Sequence, ctx: &'a mut StepContext) -> StepFuture<'a> {
        Box::pin(async move {
            let n = sequence.len();
            if n < 2 {
                return Ok(());
            }
            let mut pending = vec![(0, n - 1)];
            while let Some((lo, hi)) = pending.pop() {
                let pivot = partition(sequence, ctx, lo, hi).await?;
                if pivot > lo + 1 {
                    pending.push((lo, pivot - 1));
                }
                if pivot + 1 < hi {
                    pending.push((pivot + 1, hi));
                }
            }
            Ok(())
        })
    }
}

/// Partition `lo..=hi` around `sequence[hi]`; returns the pivot's final index.
async fn partition(sequence: &mut Sequence, ctx: &mut StepContext, lo: usize, hi: usize) -> VizResult<usize> {
    let pivot = sequence.get(hi);
    let mut store = lo;
    for j in lo..hi {
        if sequence.get(j) < pivot {
            sequence.swap(store, j);
            store += 1;
        }
        ctx.step(sequence, Highlight::pair(j, hi)).await?;
    }
    sequence.swap(store, hi);
    ctx.step(sequence, Highlight::pair(store, hi)).await?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::run_sort;

    #[test]
    fn test_sorts() {
        let (seq, _, _) = run_sort(&QuickSort, &[9, 4, 7, 1, 3]);
        assert_eq!(seq.values(), &[1, 3, 4, 7, 9]);
    }

    #[test]
    fn test_two_elements() {
        let (seq, summary, _) = run_sort(&QuickSort, &[2, 1]);
        assert_eq!(seq.values(), &[1, 2]);
        assert_eq!(summary.steps, 2);
    }

    #[test]
    fn test_descending_input_does_not_overflow_stack() {
        let values: Vec<u32> = (1..=200).rev().collect();
        let (seq, _, _) = run_sort(&QuickSort, &values);
        assert!(seq.is_sorted());
    }
}
