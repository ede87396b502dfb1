//! Selection sort.

use crate::algorithms::{AlgorithmAdapter, StepFuture};
use crate::engine::{Highlight, Sequence, StepContext};

/// Scans the unsorted suffix for its minimum and swaps it into place.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl AlgorithmAdapter for SelectionSort {
    fn id(&self) -> &'static str {
        "selection"
    }

    fn name(&self) -> &'static str {
        "Selection sort"
    }

    fn sort<'a>(&'a self, sequence: &'a mut Sequence, ctx: &'a mut StepContext) -> StepFuture<'a> {
        Box::pin(async move {
            let n = sequence.len();
            for i in 0..n.saturating_sub(1) {
                let mut min = i;
                for j in i + 1..n {
                    if sequence.get(j) < sequence.get(min) {
                        min = j;
                    }
                    ctx.step(sequence, Highlight::pair(min, j)).await?;
                }
                if min != i {
                    sequence.swap(i, min);
                    ctx.step(sequence, Highlight::pair(i, min)).await?;
                }
            }
            Ok(())
        })
    }
}
