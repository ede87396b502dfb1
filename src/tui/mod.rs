//! TUI module for sortviz.
//!
//! Application state and key handling live here so they can be tested;
//! terminal I/O stays in the `sort-tui` binary.

#[cfg(feature = "tui")]
pub mod sort_app;

#[cfg(test)]
#[cfg(feature = "tui")]
mod tests;
