//! Sorting algorithms drivable by the step sequencer.
//!
//! Each algorithm implements [`AlgorithmAdapter`]: it mutates the sequence
//! one atomic action at a time and awaits [`StepContext::step`] after each
//! action. Algorithms differ only in the order of actions they choose.
//!
//! # Example
//!
//! ```rust
//! use sortviz::algorithms::AlgorithmRegistry;
//!
//! let registry = AlgorithmRegistry::builtin();
//! assert!(registry.contains("quick"));
//! assert_eq!(registry.ids().next(), Some("bubble"));
//! ```

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

use std::future::Future;
use std::pin::Pin;

use indexmap::IndexMap;

use crate::engine::{Sequence, StepContext};
use crate::error::{VizError, VizResult};

pub use bubble::BubbleSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;

/// Future returned by [`AlgorithmAdapter::sort`].
///
/// Not `Send`: runs live on the single UI thread.
pub type StepFuture<'a> = Pin<Box<dyn Future<Output = VizResult<()>> + 'a>>;

/// Capability a sorting algorithm implements to be animated.
pub trait AlgorithmAdapter {
    /// Registry identifier, e.g. `"bubble"`.
    fn id(&self) -> &'static str;

    /// Human readable name.
    fn name(&self) -> &'static str;

    /// Sort the real prefix of `sequence` in place, calling
    /// [`StepContext::step`] after every atomic action.
    ///
    /// Resolves once the sequence is ordered; no step may follow.
    ///
    /// # Errors
    ///
    /// Must propagate errors from `ctx.step` (cancellation, step limit) and
    /// may report its own failure as [`VizError::AlgorithmFailed`].
    fn sort<'a>(&'a self, sequence: &'a mut Sequence, ctx: &'a mut StepContext) -> StepFuture<'a>;
}

/// Algorithms keyed by identifier, in registration order.
pub struct AlgorithmRegistry {
    adapters: IndexMap<&'static str, Box<dyn AlgorithmAdapter>>,
}

impl AlgorithmRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: IndexMap::new(),
        }
    }

    /// Registry holding every built-in algorithm.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(BubbleSort);
        registry.register(SelectionSort);
        registry.register(InsertionSort);
        registry.register(QuickSort);
        registry.register(MergeSort);
        registry
    }

    /// Add an adapter, replacing any with the same id.
    pub fn register<A: AlgorithmAdapter + 'static>(&mut self, adapter: A) {
        self.adapters.insert(adapter.id(), Box::new(adapter));
    }

    /// Look up an adapter by id.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::UnknownAlgorithm`] when no adapter has that id.
    pub fn get(&self, id: &str) -> VizResult<&dyn AlgorithmAdapter> {
        self.adapters
            .get(id)
            .map(AsRef::as_ref)
            .ok_or_else(|| VizError::UnknownAlgorithm(id.to_string()))
    }

    /// Adapter at a registration position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&dyn AlgorithmAdapter> {
        self.adapters.get_index(index).map(|(_, adapter)| adapter.as_ref())
    }

    /// Registration position of `id`.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.adapters.get_index_of(id)
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.adapters.contains_key(id)
    }

    /// Registered ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.adapters.keys().copied()
    }

    /// Registered adapters in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn AlgorithmAdapter> {
        self.adapters.values().map(AsRef::as_ref)
    }

    /// Number of registered adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers shared by the per-algorithm tests.

    use super::AlgorithmAdapter;
    use crate::config::PacingConfig;
    use crate::engine::{Highlight, Sequence, SequenceSummary, StepSequencer};
    use crate::renderers::{share, FrameRenderer};

    /// Collects highlights and values of every frame.
    #[derive(Default)]
    pub struct Tape {
        pub frames: Vec<(Vec<u32>, Highlight)>,
    }

    impl FrameRenderer for Tape {
        fn initial(&mut self, _values: &[u32]) {}

        fn update(&mut self, values: &[u32], highlight: Highlight) {
            self.frames.push((values.to_vec(), highlight));
        }

        fn finish(&mut self) {}
    }

    /// Run `algorithm` over `values` with no pacing delay.
    pub fn run_sort(algorithm: &dyn AlgorithmAdapter, values: &[u32]) -> (Sequence, SequenceSummary, Tape) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .expect("runtime");
        let (tape, shared) = share(Tape::default());
        let sequencer = StepSequencer::new(
            shared,
            PacingConfig {
                delay_ms: 0,
                ..PacingConfig::default()
            },
        );
        let mut sequence = Sequence::from_values(values);
        let summary = runtime
            .block_on(sequencer.run(&mut sequence, algorithm))
            .expect("sort completes");
        drop(sequencer);
        let tape = std::rc::Rc::try_unwrap(tape)
            .ok()
            .expect("sole owner")
            .into_inner();
        (sequence, summary, tape)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::run_sort;
    use super::*;

    #[test]
    fn test_builtin_order() {
        let registry = AlgorithmRegistry::builtin();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, vec!["bubble", "selection", "insertion", "quick", "merge"]);
        assert_eq!(registry.len(), 5);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_unknown_algorithm() {
        let registry = AlgorithmRegistry::builtin();
        let err = registry.get("bogo").err().expect("unknown id");
        assert!(matches!(err, VizError::UnknownAlgorithm(ref id) if id == "bogo"));
    }

    #[test]
    fn test_position_and_index_agree() {
        let registry = AlgorithmRegistry::builtin();
        let pos = registry.position("quick").expect("quick registered");
        assert_eq!(registry.get_index(pos).map(AlgorithmAdapter::id), Some("quick"));
        assert!(registry.get_index(99).is_none());
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = AlgorithmRegistry::new();
        registry.register(BubbleSort);
        registry.register(BubbleSort);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_are_distinct() {
        let registry = AlgorithmRegistry::builtin();
        let mut names: Vec<_> = registry.iter().map(AlgorithmAdapter::name).collect();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_every_algorithm_handles_duplicates() {
        for algorithm in AlgorithmRegistry::builtin().iter() {
            let (seq, _, _) = run_sort(algorithm, &[4, 1, 4, 2, 1, 4]);
            assert_eq!(seq.values(), &[1, 1, 2, 4, 4, 4], "{}", algorithm.id());
        }
    }

    #[test]
    fn test_every_algorithm_skips_trivial_input() {
        for algorithm in AlgorithmRegistry::builtin().iter() {
            let (_, summary, tape) = run_sort(algorithm, &[7]);
            assert_eq!(summary.steps, 0, "{}", algorithm.id());
            assert_eq!(tape.frames.len(), 1);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn prop_every_algorithm_sorts(values in prop::collection::vec(1u32..500, 0..40)) {
                let mut expected = values.clone();
                expected.sort_unstable();

                for algorithm in AlgorithmRegistry::builtin().iter() {
                    let (seq, _, tape) = run_sort(algorithm, &values);
                    prop_assert_eq!(seq.values(), expected.as_slice(), "{}", algorithm.id());

                    let sentinel = seq.sentinel();
                    for (frame, highlight) in &tape.frames {
                        prop_assert_eq!(frame.len(), values.len() + 1);
                        prop_assert_eq!(frame.last().copied(), Some(sentinel));
                        for index in highlight.indices() {
                            prop_assert!(index < values.len());
                        }
                    }
                }
            }
        }
    }
}
