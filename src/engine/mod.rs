//! Animation engine.
//!
//! Drives sorting algorithms one visualizable step at a time:
//! - [`Sequence`]: the values being sorted plus a headroom sentinel
//! - [`StepSequencer`]: paced, cancellable stepping of an adapter
//! - [`RunController`]: run state machine, controls and timing
//! - [`DataRng`]: reproducible datasets

pub mod clock;
pub mod controller;
pub mod rng;
pub mod sequence;
pub mod sequencer;

pub use clock::{ElapsedTime, RunClock};
pub use controller::{Control, ControlPanel, RunController, RunOutcome, RunState};
pub use rng::DataRng;
pub use sequence::{Frame, Highlight, Sequence};
pub use sequencer::{CancelToken, SequenceSummary, StepContext, StepSequencer};
