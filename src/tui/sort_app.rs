//! Sorting visualizer TUI application state and logic.
//!
//! Terminal I/O lives in the `sort-tui` binary. This module holds the
//! controls, the dataset and the chart model so they can be tested without
//! a terminal.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::KeyCode;
use tracing::debug;

use crate::algorithms::{AlgorithmAdapter, AlgorithmRegistry};
use crate::config::{DataSize, VizConfig};
use crate::engine::{Control, DataRng, RunController, RunOutcome, RunState, Sequence};
use crate::error::{VizError, VizResult};
use crate::renderers::tui::column_to_chart_x;
use crate::renderers::{share, BarChart, FrameRenderer};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Nothing beyond redrawing.
    None,
    /// Spawn the run returned by [`SortApp::begin_run`].
    Start,
    /// Leave the application.
    Quit,
}

/// A run detached from the app so it can be spawned on the local task set.
pub struct RunJob {
    controller: Rc<RunController>,
    registry: Rc<AlgorithmRegistry>,
    algorithm: usize,
    sequence: Sequence,
}

impl RunJob {
    /// Drive the run to its outcome.
    pub async fn run(mut self) -> RunOutcome {
        let Some(adapter) = self.registry.get_index(self.algorithm) else {
            return RunOutcome::Aborted(VizError::UnknownAlgorithm(format!("#{}", self.algorithm)));
        };
        self.controller.start(&mut self.sequence, adapter).await
    }
}

/// Application state for the sorting visualizer.
pub struct SortApp {
    /// Loaded configuration.
    pub config: VizConfig,
    /// Available algorithms.
    pub registry: Rc<AlgorithmRegistry>,
    /// Run state machine shared with spawned runs.
    pub controller: Rc<RunController>,
    /// Chart model drawn every frame.
    pub chart: Rc<RefCell<BarChart>>,
    /// Selected data size.
    pub data_size: DataSize,
    /// Selected algorithm, as a registry position.
    pub algorithm: usize,
    /// Dataset the next run sorts.
    pub sequence: Sequence,
    /// Dataset generator.
    pub rng: DataRng,
    /// Hovered bar.
    pub hover: Option<usize>,
    /// Frame counter.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl SortApp {
    /// Create the application and draw the first dataset.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::UnknownAlgorithm`] if the configured algorithm is
    /// not registered.
    pub fn new(config: VizConfig) -> VizResult<Self> {
        let registry = AlgorithmRegistry::builtin();
        let algorithm = registry
            .position(&config.algorithm)
            .ok_or_else(|| VizError::UnknownAlgorithm(config.algorithm.clone()))?;

        let (chart, shared) = share(BarChart::new(config.chart.clone()));
        let controller = RunController::new(shared, config.pacing.clone());

        let mut app = Self {
            registry: Rc::new(registry),
            controller: Rc::new(controller),
            chart,
            data_size: config.dataset.size,
            algorithm,
            sequence: Sequence::default(),
            rng: DataRng::new(config.dataset.seed),
            hover: None,
            frame_count: 0,
            should_quit: false,
            config,
        };
        app.regenerate();
        Ok(app)
    }

    /// Handle a key press.
    ///
    /// Keys of disabled controls are ignored.
    pub fn handle_key(&mut self, key: KeyCode) -> AppAction {
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                AppAction::Quit
            }
            KeyCode::Char('s') | KeyCode::Enter if self.controller.is_enabled(Control::Start) => {
                AppAction::Start
            }
            KeyCode::Char('r') => {
                self.reset();
                AppAction::None
            }
            KeyCode::Char('d') if self.controller.is_enabled(Control::DataSize) => {
                self.data_size = self.data_size.next();
                self.regenerate();
                AppAction::None
            }
            KeyCode::Char('a') if self.controller.is_enabled(Control::Algorithm) => {
                self.algorithm = (self.algorithm + 1) % self.registry.len().max(1);
                AppAction::None
            }
            KeyCode::Right => {
                let next = self.hover.map_or(0, |i| i + 1);
                self.hover_bar(next);
                AppAction::None
            }
            KeyCode::Left => {
                let prev = self.hover.map_or(0, |i| i.saturating_sub(1));
                self.hover_bar(prev);
                AppAction::None
            }
            KeyCode::Esc => {
                self.leave();
                AppAction::None
            }
            _ => AppAction::None,
        }
    }

    /// Package the current selection as a run.
    ///
    /// Returns `None` while the start control is disabled.
    #[must_use]
    pub fn begin_run(&self) -> Option<RunJob> {
        if !self.controller.is_enabled(Control::Start) {
            return None;
        }
        Some(RunJob {
            controller: Rc::clone(&self.controller),
            registry: Rc::clone(&self.registry),
            algorithm: self.algorithm,
            sequence: self.sequence.clone(),
        })
    }

    /// Reset controls, cancel any run and draw a fresh dataset.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.regenerate();
    }

    /// Hover the bar under a column of the chart area.
    ///
    /// `column` is relative to the chart area, which is `width` columns wide.
    pub fn hover_at_column(&mut self, column: u16, width: u16) {
        let index = {
            let chart = self.chart.borrow();
            let x = column_to_chart_x(column, width, chart.config().width);
            chart.element_at(x)
        };
        match index {
            Some(index) => self.hover_bar(index),
            None => self.leave(),
        }
    }

    /// Remove the hover label.
    pub fn leave(&mut self) {
        self.hover = None;
        self.chart.borrow_mut().leave();
    }

    /// Count a drawn frame.
    pub fn tick(&mut self) {
        self.frame_count += 1;
    }

    /// Whether the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current run state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.controller.state()
    }

    /// Whether `control` accepts input.
    #[must_use]
    pub fn is_enabled(&self, control: Control) -> bool {
        self.controller.is_enabled(control)
    }

    /// Name of the selected algorithm.
    #[must_use]
    pub fn algorithm_name(&self) -> &'static str {
        self.registry
            .get_index(self.algorithm)
            .map_or("?", AlgorithmAdapter::name)
    }

    /// Text of the elapsed-time display.
    #[must_use]
    pub fn elapsed_text(&self) -> String {
        self.controller.controls().elapsed_text().to_string()
    }

    fn hover_bar(&mut self, index: usize) {
        let mut chart = self.chart.borrow_mut();
        let last = chart.elements().len().checked_sub(1);
        let Some(last) = last else {
            return;
        };
        let index = index.min(last);
        if chart.hover(index).is_some() {
            self.hover = Some(index);
        }
    }

    fn regenerate(&mut self) {
        let raw = self
            .rng
            .dataset_for(self.data_size, self.config.dataset.max_value);
        self.sequence = Sequence::from_raw(&raw);
        self.hover = None;
        self.chart.borrow_mut().initial(self.sequence.rendered());
        debug!(size = %self.data_size, seed = self.rng.seed(), "dataset generated");
    }
}
