//! # sortviz
//!
//! Step-by-step animation of comparison sorting algorithms as a bar chart.
//!
//! - Algorithms are pluggable [`algorithms::AlgorithmAdapter`]s that await a
//!   paced step after every comparison or swap
//! - [`engine::StepSequencer`] renders each step and yields to the host loop
//! - [`engine::RunController`] owns run state, controls and timing
//! - Renderers implement [`renderers::FrameRenderer`]; the terminal backend
//!   lives behind the `tui` feature
//!
//! ## Example
//!
//! ```rust
//! use sortviz::prelude::*;
//!
//! let config = VizConfig::builder()
//!     .seed(42)
//!     .algorithm("quick")
//!     .build();
//! assert!(config.check().is_ok());
//!
//! let seq = Sequence::from_raw(&[Some(5), Some(3), Some(0), Some(8), None, Some(1)]);
//! assert_eq!(seq.rendered(), &[5, 3, 8, 1, 9]);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,
    clippy::future_not_send,
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod algorithms;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod renderers;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::algorithms::{AlgorithmAdapter, AlgorithmRegistry, StepFuture};
    pub use crate::config::{DataSize, VizConfig, VizConfigBuilder};
    pub use crate::engine::{
        CancelToken, Control, DataRng, ElapsedTime, Highlight, RunController, RunOutcome,
        RunState, Sequence, StepContext, StepSequencer,
    };
    pub use crate::error::{VizError, VizResult};
    pub use crate::renderers::{share, BarChart, FrameRenderer, SharedRenderer};
}

/// Re-export for public API
pub use error::{VizError, VizResult};
