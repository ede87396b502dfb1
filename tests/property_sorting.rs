//! Property tests over the whole engine.

use proptest::prelude::*;
use sortviz::config::{ChartConfig, PacingConfig};
use sortviz::prelude::*;
use sortviz::renderers::BarFill;

fn run(algorithm: &str, raw: &[Option<u32>]) -> (Sequence, BarChart, RunOutcome) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("runtime");
    let (chart, shared) = share(BarChart::new(ChartConfig::default()));
    let controller = RunController::new(
        shared,
        PacingConfig {
            delay_ms: 1,
            ..PacingConfig::default()
        },
    );
    let registry = AlgorithmRegistry::builtin();
    let mut seq = Sequence::from_raw(raw);
    chart.borrow_mut().initial(seq.rendered());
    let outcome = runtime.block_on(controller.start(&mut seq, registry.get(algorithm).expect("registered")));
    drop(controller);
    let chart = chart.borrow().clone();
    (seq, chart, outcome)
}

fn algorithm() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["bubble", "selection", "insertion", "quick", "merge"])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn filtered_input_sorts_with_sentinel_last(
        algorithm in algorithm(),
        raw in prop::collection::vec(prop::option::of(0u32..200), 0..30),
    ) {
        let mut expected: Vec<u32> = raw.iter().flatten().copied().filter(|&v| v != 0).collect();
        expected.sort_unstable();
        let sentinel = expected.last().copied().unwrap_or(0) + 1;

        let (seq, chart, outcome) = run(algorithm, &raw);

        prop_assert!(outcome.is_completed());
        prop_assert_eq!(seq.values(), expected.as_slice());
        prop_assert_eq!(seq.sentinel(), sentinel);
        let drawn = chart.values();
        prop_assert_eq!(drawn.len(), expected.len() + 1);
        prop_assert_eq!(drawn.last().copied(), Some(sentinel));
        prop_assert!(chart.elements().iter().all(|e| e.fill == BarFill::Done));
    }

    #[test]
    fn bars_rest_on_the_chart_floor(
        algorithm in algorithm(),
        values in prop::collection::vec(1u32..1000, 1..25),
    ) {
        let raw: Vec<Option<u32>> = values.into_iter().map(Some).collect();
        let (_, chart, _) = run(algorithm, &raw);
        let floor = chart.config().height;
        for element in chart.elements() {
            prop_assert!(element.height >= 0.0);
            prop_assert!((element.y + element.height - floor).abs() < 1e-9);
        }
    }
}
