//! Bubble sort with early exit.

use crate::algorithms::{AlgorithmAdapter, StepFuture};
use crate::engine::{Highlight, Sequence, StepContext};

/// Compares neighbours, swapping out-of-order pairs; stops after a pass
/// without swaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl AlgorithmAdapter for BubbleSort {
    fn id(&self) -> &'static str {
        "bubble"
    }

    fn name(&self) -> &'static str {
        "Bubble sort"
    }

    fn sort<'a>(&'a self, sequence: &'a mut Sequence, ctx: &'a mut StepContext) -> StepFuture<'a> {
        Box::pin(async move {
            let n = sequence.len();
            for pass in 0..n.saturating_sub(1) {
                let mut swapped = false;
                for j in 0..n - 1 - pass {
                    if sequence.get(j) > sequence.get(j + 1) {
                        sequence.swap(j, j + 1);
                        swapped = true;
                    }
                    ctx.step(sequence, Highlight::pair(j, j + 1)).await?;
                }
                if !swapped {
                    break;
                }
            }
            Ok(())
        })
    }
}
