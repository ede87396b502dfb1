//! Step sequencing: drives an adapter one visualizable step at a time.
//!
//! Every step renders a frame and then awaits the pacing timer. The wait is
//! a cooperative yield, so the host's draw loop and input handling run in
//! between steps. A [`CancelToken`] is checked at each suspension point.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Notify;
use tracing::{debug, trace};

use crate::algorithms::AlgorithmAdapter;
use crate::config::PacingConfig;
use crate::engine::{Frame, Highlight, Sequence};
use crate::error::{VizError, VizResult};
use crate::renderers::SharedRenderer;

/// Single-threaded cancellation signal.
///
/// Clones share state: cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Rc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: Cell<bool>,
    notify: Notify,
}

impl CancelToken {
    /// Create an uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel and wake every waiter.
    pub fn cancel(&self) {
        self.inner.cancelled.set(true);
        self.inner.notify.notify_waiters();
    }

    /// Whether `cancel` has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Whether `other` is a clone of this token.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Resolve once the token is cancelled.
    pub async fn cancelled(&self) {
        // Register before checking the flag so a concurrent cancel is not lost.
        let notified = self.inner.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// Handle an adapter uses to publish a step and wait for pacing.
pub struct StepContext {
    renderer: SharedRenderer,
    delay: Duration,
    step_limit: u64,
    steps: u64,
    cancel: CancelToken,
}

impl StepContext {
    fn new(renderer: SharedRenderer, pacing: &PacingConfig, cancel: CancelToken) -> Self {
        Self {
            renderer,
            delay: pacing.delay(),
            step_limit: pacing.step_limit,
            steps: 0,
            cancel,
        }
    }

    /// Render the current state with `highlight`, then suspend for the
    /// pacing delay.
    ///
    /// # Errors
    ///
    /// - [`VizError::Cancelled`] if the run was cancelled before or during
    ///   the wait; no frame is rendered after cancellation.
    /// - [`VizError::StepLimitExceeded`] once the step limit is reached.
    pub async fn step(&mut self, sequence: &Sequence, highlight: Highlight) -> VizResult<()> {
        if self.cancel.is_cancelled() {
            return Err(VizError::Cancelled);
        }
        if self.steps >= self.step_limit {
            return Err(VizError::StepLimitExceeded {
                limit: self.step_limit,
            });
        }

        self.render(sequence, highlight);
        self.steps += 1;

        tokio::select! {
            () = tokio::time::sleep(self.delay) => Ok(()),
            () = self.cancel.cancelled() => Err(VizError::Cancelled),
        }
    }

    /// Steps rendered so far.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Whether the run has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn render(&self, sequence: &Sequence, highlight: Highlight) {
        let frame = Frame::of(sequence, highlight);
        trace!(step = self.steps, ?highlight, "frame");
        self.renderer.borrow_mut().update(frame.values, frame.highlight);
    }
}

/// Outcome of a run that completed every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceSummary {
    /// Steps rendered, excluding the final frame.
    pub steps: u64,
}

/// Drives adapters against a sequence with paced rendering.
pub struct StepSequencer {
    renderer: SharedRenderer,
    pacing: PacingConfig,
    cancel: CancelToken,
}

impl StepSequencer {
    /// Create a sequencer rendering into `renderer`.
    #[must_use]
    pub fn new(renderer: SharedRenderer, pacing: PacingConfig) -> Self {
        Self {
            renderer,
            pacing,
            cancel: CancelToken::new(),
        }
    }

    /// Use `cancel` to stop the run from outside.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run `algorithm` to completion over `sequence`.
    ///
    /// Sequences with fewer than two real elements complete with zero steps.
    /// A final frame without highlight is always rendered on success.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures, [`VizError::StepLimitExceeded`] and
    /// [`VizError::Cancelled`]. There is no retry or resume.
    pub async fn run(
        &self,
        sequence: &mut Sequence,
        algorithm: &dyn AlgorithmAdapter,
    ) -> VizResult<SequenceSummary> {
        let mut ctx = StepContext::new(self.renderer.clone(), &self.pacing, self.cancel.clone());

        if sequence.len() >= 2 {
            algorithm.sort(sequence, &mut ctx).await?;
        }

        if ctx.is_cancelled() {
            return Err(VizError::Cancelled);
        }
        ctx.render(sequence, Highlight::NONE);

        debug!(
            algorithm = algorithm.id(),
            steps = ctx.steps(),
            elements = sequence.len(),
            "sequence complete"
        );
        Ok(SequenceSummary { steps: ctx.steps() })
    }
}
