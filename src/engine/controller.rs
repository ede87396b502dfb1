//! Run state machine.
//!
//! One [`RunController`] per visualization. It owns the run state, the
//! control panel the UI reads, and the cancellation token of the in-flight
//! run. Methods take `&self` so the draw loop and the run task can share the
//! controller through an `Rc` on a single cooperative thread.

use std::cell::{Cell, RefCell};
use std::fmt;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::algorithms::AlgorithmAdapter;
use crate::config::PacingConfig;
use crate::engine::clock::{ElapsedTime, RunClock};
use crate::engine::sequencer::{CancelToken, StepSequencer};
use crate::engine::Sequence;
use crate::error::VizError;
use crate::renderers::SharedRenderer;

/// Where a visualization is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RunState {
    /// Waiting for a start signal.
    #[default]
    Idle,
    /// An algorithm is being animated.
    Running,
    /// The last run completed.
    Finished,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "IDLE",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
        };
        f.write_str(label)
    }
}

/// A UI control the controller can enable or disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Start button.
    Start,
    /// Data-size selector.
    DataSize,
    /// Algorithm selector.
    Algorithm,
}

/// Enabled flags of the controls plus the elapsed-time display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlPanel {
    start: bool,
    data_size: bool,
    algorithm: bool,
    elapsed: String,
}

impl ControlPanel {
    /// Whether `control` accepts input.
    #[must_use]
    pub const fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::Start => self.start,
            Control::DataSize => self.data_size,
            Control::Algorithm => self.algorithm,
        }
    }

    /// Text of the elapsed-time display.
    #[must_use]
    pub fn elapsed_text(&self) -> &str {
        &self.elapsed
    }

    /// Whether all three controls are enabled.
    #[must_use]
    pub const fn all_enabled(&self) -> bool {
        self.start && self.data_size && self.algorithm
    }

    fn set_all(&mut self, enabled: bool) {
        self.start = enabled;
        self.data_size = enabled;
        self.algorithm = enabled;
    }

    fn set_selectors(&mut self, enabled: bool) {
        self.data_size = enabled;
        self.algorithm = enabled;
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            start: true,
            data_size: true,
            algorithm: true,
            elapsed: ElapsedTime::ZERO.to_string(),
        }
    }
}

/// What a call to [`RunController::start`] amounted to.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every step ran; timing was published.
    Completed {
        /// Wall-clock duration of the run.
        elapsed: ElapsedTime,
        /// Steps rendered.
        steps: u64,
    },
    /// A run was already in progress; nothing changed.
    Ignored,
    /// A reset cancelled the run.
    Cancelled,
    /// The adapter failed; controls were re-enabled.
    Aborted(VizError),
}

impl RunOutcome {
    /// Whether the run completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Owns run state, controls and timing for one visualization.
pub struct RunController {
    renderer: SharedRenderer,
    pacing: PacingConfig,
    state: Cell<RunState>,
    controls: RefCell<ControlPanel>,
    cancel: RefCell<Option<CancelToken>>,
    completed_runs: Cell<u64>,
    last_error: RefCell<Option<String>>,
}

impl RunController {
    /// Create an idle controller rendering into `renderer`.
    #[must_use]
    pub fn new(renderer: SharedRenderer, pacing: PacingConfig) -> Self {
        Self {
            renderer,
            pacing,
            state: Cell::new(RunState::Idle),
            controls: RefCell::new(ControlPanel::default()),
            cancel: RefCell::new(None),
            completed_runs: Cell::new(0),
            last_error: RefCell::new(None),
        }
    }

    /// Current run state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state.get()
    }

    /// Snapshot of the control panel.
    #[must_use]
    pub fn controls(&self) -> ControlPanel {
        self.controls.borrow().clone()
    }

    /// Whether `control` accepts input right now.
    #[must_use]
    pub fn is_enabled(&self, control: Control) -> bool {
        self.controls.borrow().is_enabled(control)
    }

    /// Number of runs that completed and published timing.
    #[must_use]
    pub fn completed_runs(&self) -> u64 {
        self.completed_runs.get()
    }

    /// Message of the last aborted run, cleared by the next start or reset.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    /// Pacing used for runs.
    #[must_use]
    pub const fn pacing(&self) -> &PacingConfig {
        &self.pacing
    }

    /// Animate `algorithm` over `sequence`.
    ///
    /// Ignored while a run is in progress. Otherwise disables the controls,
    /// drives the sequencer and finalizes state according to how the run
    /// ended. Errors never escape: they are logged and reported in the
    /// outcome.
    pub async fn start(&self, sequence: &mut Sequence, algorithm: &dyn AlgorithmAdapter) -> RunOutcome {
        if self.state.get() == RunState::Running {
            debug!(algorithm = algorithm.id(), "start ignored: run already in progress");
            return RunOutcome::Ignored;
        }

        self.state.set(RunState::Running);
        self.controls.borrow_mut().set_all(false);
        *self.last_error.borrow_mut() = None;
        let cancel = CancelToken::new();
        *self.cancel.borrow_mut() = Some(cancel.clone());

        info!(
            algorithm = algorithm.id(),
            elements = sequence.len(),
            delay_ms = self.pacing.delay_ms,
            "run started"
        );
        let clock = RunClock::start();

        let sequencer = StepSequencer::new(self.renderer.clone(), self.pacing.clone())
            .with_cancel(cancel.clone());
        let result = sequencer.run(sequence, algorithm).await;

        // A reset may have replaced or cleared the token while we were suspended.
        let current = self
            .cancel
            .borrow()
            .as_ref()
            .is_some_and(|token| token.same_as(&cancel));
        if !current {
            debug!(algorithm = algorithm.id(), "superseded run unwound");
            return RunOutcome::Cancelled;
        }
        *self.cancel.borrow_mut() = None;

        match result {
            Ok(summary) => {
                let elapsed = clock.elapsed();
                self.state.set(RunState::Finished);
                {
                    let mut controls = self.controls.borrow_mut();
                    controls.set_selectors(true);
                    controls.elapsed = elapsed.to_string();
                }
                self.renderer.borrow_mut().finish();
                self.completed_runs.set(self.completed_runs.get() + 1);
                info!(
                    algorithm = algorithm.id(),
                    steps = summary.steps,
                    elapsed = %elapsed,
                    "run finished"
                );
                RunOutcome::Completed {
                    elapsed,
                    steps: summary.steps,
                }
            }
            Err(err) if err.is_cancellation() => {
                self.state.set(RunState::Idle);
                info!(algorithm = algorithm.id(), "run cancelled");
                RunOutcome::Cancelled
            }
            Err(err) => {
                self.state.set(RunState::Idle);
                self.controls.borrow_mut().set_all(true);
                error!(algorithm = algorithm.id(), error = %err, "run aborted");
                *self.last_error.borrow_mut() = Some(err.to_string());
                RunOutcome::Aborted(err)
            }
        }
    }

    /// Re-enable every control, zero the timing display and cancel any
    /// in-flight run. Always leaves the controller `Idle`, so a start issued
    /// right after a reset begins a new run.
    pub fn reset(&self) {
        {
            let mut controls = self.controls.borrow_mut();
            controls.set_all(true);
            controls.elapsed = ElapsedTime::ZERO.to_string();
        }
        *self.last_error.borrow_mut() = None;

        // The cancelled task unwinds on its next poll; it no longer owns
        // any state once its token is gone.
        if let Some(token) = self.cancel.borrow_mut().take() {
            token.cancel();
            info!("reset cancelled in-flight run");
        }
        self.state.set(RunState::Idle);
        debug!(state = %self.state.get(), "controls reset");
    }
}
