//! Frame renderers.
//!
//! The engine only talks to the [`FrameRenderer`] trait. Backends are
//! swappable without touching the sequencer or the controller.
//!
//! # Architecture
//!
//! ```text
//! StepSequencer ──update()──▶ FrameRenderer
//!                                   │
//!                         ┌─────────┴─────────┐
//!                      BarChart          (any backend)
//!                         │
//!                  BarChartWidget (ratatui, feature "tui")
//! ```

pub mod chart;
#[cfg(feature = "tui")]
pub mod tui;

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::Highlight;

pub use chart::{BarChart, BarFill, HoverLabel, LinearScale, VisualElement};
#[cfg(feature = "tui")]
pub use tui::BarChartWidget;

/// Capability a rendering backend implements to display frames.
pub trait FrameRenderer {
    /// Clear any prior content and draw one bar per value.
    ///
    /// Idempotent: calling it twice leaves exactly one set of bars.
    fn initial(&mut self, values: &[u32]);

    /// Reconcile the bars with a new frame.
    fn update(&mut self, values: &[u32], highlight: Highlight);

    /// Paint every bar in the neutral "done" colour.
    fn finish(&mut self);
}

/// Renderer shared between the run task and the draw loop.
///
/// Single-threaded by construction: borrows are taken for the duration of
/// one call and never held across an `.await`.
pub type SharedRenderer = Rc<RefCell<dyn FrameRenderer>>;

/// Wrap a renderer for sharing with the engine.
///
/// Returns both the concrete handle (for the draw loop) and the trait-object
/// handle (for the engine); they point at the same renderer.
pub fn share<R: FrameRenderer + 'static>(renderer: R) -> (Rc<RefCell<R>>, SharedRenderer) {
    let concrete = Rc::new(RefCell::new(renderer));
    let shared: SharedRenderer = concrete.clone();
    (concrete, shared)
}
