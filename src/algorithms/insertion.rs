//! Insertion sort.

use crate::algorithms::{AlgorithmAdapter, StepFuture};
use crate::engine::{Highlight, Sequence, StepContext};

/// Sinks each element left through the sorted prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl AlgorithmAdapter for InsertionSort {
    fn id(&self) -> &'static str {
        "insertion"
    }

    fn name(&self) -> &'static str {
        "Insertion sort"
    }

    fn sort<'a>(&'a self, sequence: &'a mut Sequence, ctx: &'a mut StepContext) -> StepFuture<'a> {
        Box::pin(async move {
            for i in 1..sequence.len() {
                let mut j = i;
                while j > 0 {
                    let out_of_order = sequence.get(j - 1) > sequence.get(j);
                    if out_of_order {
                        sequence.swap(j - 1, j);
                    }
                    ctx.step(sequence, Highlight::pair(j - 1, j)).await?;
                    if !out_of_order {
                        break;
                    }
                    j -= 1;
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::run_sort;

    #[test]
    fn test_sorts() {
        let (seq, _, _) = run_sort(&InsertionSort, &[5, 3, 8, 1]);
        assert_eq!(seq.values(), &[1, 3, 5, 8]);
    }

    #[test]
    fn test_sorted_input_is_linear() {
        let (_, summary, _) = run_sort(&InsertionSort, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(summary.steps, 5);
    }

    #[test]
    fn test_reversed_input_is_quadratic() {
        let (_, summary, _) = run_sort(&InsertionSort, &[4, 3, 2, 1]);
        assert_eq!(summary.steps, 6);
    }
}
