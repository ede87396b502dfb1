//! Integration tests for the TUI module.

use super::sort_app::{AppAction, SortApp};
use crate::config::{DataSize, VizConfig};
use crate::engine::{Control, RunState};
use crossterm::event::KeyCode;

fn config(seed: u64) -> VizConfig {
    VizConfig::builder()
        .seed(seed)
        .delay_ms(1)
        .size(DataSize::Small)
        .algorithm("quick")
        .build()
}

#[tokio::test(start_paused = true)]
async fn test_sort_app_lifecycle() {
    let mut app = SortApp::new(config(3)).expect("valid config");

    // Idle with everything enabled
    assert_eq!(app.state(), RunState::Idle);
    assert!(app.is_enabled(Control::Start));
    assert_eq!(app.algorithm_name(), "Quick sort");

    // Start and run to completion
    assert_eq!(app.handle_key(KeyCode::Char('s')), AppAction::Start);
    let outcome = app.begin_run().expect("start enabled").run().await;
    assert!(outcome.is_completed());
    assert_eq!(app.state(), RunState::Finished);

    // Selectors come back, start does not
    assert!(app.is_enabled(Control::Algorithm));
    assert!(!app.is_enabled(Control::Start));
    app.handle_key(KeyCode::Char('a'));
    assert_eq!(app.algorithm_name(), "Merge sort");

    // Reset draws a new dataset and re-arms start
    let before = app.sequence.clone();
    app.handle_key(KeyCode::Char('r'));
    assert_ne!(app.sequence, before);
    assert!(app.is_enabled(Control::Start));

    // Second run with the new algorithm
    let outcome = app.begin_run().expect("start enabled").run().await;
    assert!(outcome.is_completed());
    assert_eq!(app.controller.completed_runs(), 2);

    app.handle_key(KeyCode::Char('q'));
    assert!(app.should_quit());
}

#[test]
fn test_same_seed_same_dataset() {
    let a = SortApp::new(config(11)).expect("valid config");
    let b = SortApp::new(config(11)).expect("valid config");
    assert_eq!(a.sequence, b.sequence);
    assert_eq!(a.chart.borrow().values(), b.chart.borrow().values());
}

#[test]
fn test_tick_counts_frames() {
    let mut app = SortApp::new(config(1)).expect("valid config");
    for _ in 0..3 {
        app.tick();
    }
    assert_eq!(app.frame_count, 3);
}
